//! Common test utilities for building workflow graphs.
use flowtext::prelude::*;

/// Parses the compact graph notation produced by `Graph::to_verbose_string`.
///
/// Nodes are `[id:name]`, `[id:label:name]`, with optional `key=value`
/// segments for properties. Links are `[from-to]` or `[status:from-to]`.
///
/// `[0:START][1:AppA][2:END][0-1][1-2]` is the smallest valid graph.
#[allow(dead_code)]
pub fn parse_graph(notation: &str) -> Graph {
    let mut nodes = Vec::new();
    let mut links = Vec::new();

    let inner = notation.trim().trim_start_matches('[').trim_end_matches(']');
    for item in inner.split("][") {
        let parts: Vec<&str> = item.split(':').collect();
        let last = parts[parts.len() - 1];
        if let Some((from, to)) = as_link_ends(last) {
            let link = if parts.len() > 1 {
                Link::transition(from, to, parts[..parts.len() - 1].join(":"))
            } else {
                Link::new(from, to)
            };
            links.push(link);
            continue;
        }

        let id = parts[0];
        let (properties, names): (Vec<&str>, Vec<&str>) =
            parts[1..].iter().partition(|p| p.contains('='));
        let mut node = match names.as_slice() {
            [name] => Node::new(id, *name),
            [label, name] => Node::new(id, *name).with_label(*label),
            _ => panic!("cannot parse node '{}'", item),
        };
        if !properties.is_empty() {
            node = node.with_properties(
                properties
                    .iter()
                    .filter_map(|p| p.split_once('='))
                    .collect(),
            );
        }
        nodes.push(node);
    }
    Graph::new(nodes, links)
}

fn as_link_ends(segment: &str) -> Option<(&str, &str)> {
    let (from, to) = segment.split_once('-')?;
    let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    (numeric(from) && numeric(to)).then_some((from, to))
}

/// Renders the notation, panicking on any reconstruction error.
#[allow(dead_code)]
pub fn render(notation: &str) -> String {
    parse_graph(notation)
        .to_dsl_text()
        .unwrap_or_else(|e| panic!("failed to render {}: {}", notation, e))
}

/// `A && <B || C> && D`
#[allow(dead_code)]
pub fn create_split_graph() -> Graph {
    Graph::builder()
        .start("0")
        .node("1", "A")
        .node("2", "B")
        .node("3", "C")
        .node("4", "D")
        .end("5")
        .link("0", "1")
        .link("1", "2")
        .link("1", "3")
        .link("2", "4")
        .link("3", "4")
        .link("4", "5")
        .build()
        .expect("split graph should build")
}

/// `A 'FAILED'->$FAIL`
#[allow(dead_code)]
pub fn create_failure_graph() -> Graph {
    Graph::builder()
        .start("0")
        .node("1", "A")
        .end("2")
        .node("3", "FAIL")
        .link("0", "1")
        .link("1", "2")
        .transition("1", "3", "FAILED")
        .build()
        .expect("failure graph should build")
}

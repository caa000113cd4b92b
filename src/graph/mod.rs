mod builder;
mod link;
mod node;
mod properties;

pub use builder::GraphBuilder;
pub use link::{Link, TRANSITION_NAME, WILDCARD_TRANSITION};
pub use node::{END, FAIL, LABEL_KEY, Node, NodeRole, START, SYNC};
pub use properties::Properties;

use crate::dsl::DslWriter;
use crate::error::GraphError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A workflow graph: steps and reserved markers joined by flow and transition links.
///
/// Node and link order carries no meaning for correctness, but it drives
/// search order and therefore the exact text produced by [`Graph::to_dsl_text`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }

    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Decodes a graph from its JSON form. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::JsonParseError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, GraphError> {
        serde_json::to_string(self).map_err(|e| GraphError::JsonParseError(e.to_string()))
    }

    pub fn find_node_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Finds the first node with the given name. Only meaningful for the
    /// reserved names, which are expected to be unique.
    pub fn find_node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    /// Outbound links of `node`.
    ///
    /// Unless `include_links_to_end` is set, links to `END` that carry no
    /// properties are left out: they only say "nothing more happens".
    pub fn find_links_from(&self, node: &Node, include_links_to_end: bool) -> Vec<&Link> {
        self.links
            .iter()
            .filter(|link| link.from == node.id())
            .filter(|link| {
                include_links_to_end || !(self.targets_end(link) && link.has_no_properties())
            })
            .collect()
    }

    /// Like [`Graph::find_links_from`], but transitions are dropped too, except
    /// for the `'*'` wildcard.
    pub fn find_links_from_without_transitions(
        &self,
        node: &Node,
        include_links_to_end: bool,
    ) -> Vec<&Link> {
        self.links
            .iter()
            .filter(|link| link.from == node.id())
            .filter(|link| {
                if link.has_transition_set() {
                    link.is_wildcard_transition()
                } else {
                    include_links_to_end || !self.targets_end(link)
                }
            })
            .collect()
    }

    /// Inbound links of `node`.
    pub fn find_links_to(&self, node: &Node) -> Vec<&Link> {
        self.links
            .iter()
            .filter(|link| link.to == node.id())
            .collect()
    }

    fn targets_end(&self, link: &Link) -> bool {
        self.find_node_by_id(&link.to).is_some_and(Node::is_end)
    }

    /// Checks the invariants the DSL reconstruction relies on: a `START` node,
    /// an `END` node, and links that only reference existing nodes.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.find_node_by_name(START).is_none() {
            return Err(GraphError::MissingReservedNode { name: START });
        }
        if self.find_node_by_name(END).is_none() {
            return Err(GraphError::MissingReservedNode { name: END });
        }
        for link in &self.links {
            if self.find_node_by_id(&link.from).is_none() {
                return Err(GraphError::NodeNotFound {
                    missing_node_id: link.from.clone(),
                    source_node_id: link.to.clone(),
                });
            }
            if self.find_node_by_id(&link.to).is_none() {
                return Err(GraphError::NodeNotFound {
                    missing_node_id: link.to.clone(),
                    source_node_id: link.from.clone(),
                });
            }
        }
        Ok(())
    }

    /// Rebuilds the flow/split/transition DSL text this graph represents.
    pub fn to_dsl_text(&self) -> Result<String, GraphError> {
        DslWriter::new(self).write()
    }

    /// Compact debugging form: `[id:label:name:key=value]` for each node,
    /// then `[transition:from-to]` for each link.
    pub fn to_verbose_string(&self) -> String {
        let nodes = self.nodes.iter().map(|n| {
            let properties = n
                .properties()
                .map(|p| p.iter().map(|(k, v)| format!(":{}={}", k, v)).join(""))
                .unwrap_or_default();
            format!("[{}{}]", n, properties)
        });
        let links = self.links.iter().map(|l| format!("[{}]", l));
        nodes.chain(links).join("")
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph:  nodes=#{}  links=#{}",
            self.nodes.len(),
            self.links.len()
        )
    }
}

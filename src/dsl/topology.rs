use crate::error::GraphError;
use crate::graph::{END, Graph, Link, Node, NodeRole, START};
use ahash::{AHashMap, AHashSet};

pub(super) type NodeIdx = usize;
pub(super) type LinkIdx = usize;

/// Index-resolved, read-only view of a graph.
///
/// Nodes and links are addressed by their position in the graph, which gives
/// identity semantics: two nodes with equal contents are still distinct.
/// Every link is resolved once, so the traversal never meets a dangling id.
pub(super) struct Topology<'g> {
    graph: &'g Graph,
    pub(super) start: NodeIdx,
    sources: Vec<NodeIdx>,
    targets: Vec<NodeIdx>,
    /// Outbound links per node, in graph order. Indexed by canonical node.
    outgoing: Vec<Vec<LinkIdx>>,
    /// First node carrying each node's id.
    canonical: Vec<NodeIdx>,
    pub(super) max_depth: usize,
}

impl<'g> Topology<'g> {
    pub(super) fn new(graph: &'g Graph, max_depth: usize) -> Result<Self, GraphError> {
        let find_by_name =
            |name: &str| graph.nodes.iter().position(|n| n.name() == name);
        let start = find_by_name(START).ok_or(GraphError::MissingReservedNode { name: START })?;
        if find_by_name(END).is_none() {
            return Err(GraphError::MissingReservedNode { name: END });
        }

        let mut by_id: AHashMap<&str, NodeIdx> = AHashMap::with_capacity(graph.nodes.len());
        for (idx, node) in graph.nodes.iter().enumerate() {
            by_id.entry(node.id()).or_insert(idx);
        }
        let canonical = graph.nodes.iter().map(|n| by_id[n.id()]).collect();

        let resolve = |id: &str, other: &str| {
            by_id
                .get(id)
                .copied()
                .ok_or_else(|| GraphError::NodeNotFound {
                    missing_node_id: id.to_string(),
                    source_node_id: other.to_string(),
                })
        };
        let mut sources = Vec::with_capacity(graph.links.len());
        let mut targets = Vec::with_capacity(graph.links.len());
        let mut outgoing = vec![Vec::new(); graph.nodes.len()];
        for (idx, link) in graph.links.iter().enumerate() {
            let from = resolve(&link.from, &link.to)?;
            let to = resolve(&link.to, &link.from)?;
            sources.push(from);
            targets.push(to);
            outgoing[from].push(idx);
        }

        Ok(Self {
            graph,
            start,
            sources,
            targets,
            outgoing,
            canonical,
            max_depth,
        })
    }

    pub(super) fn node(&self, idx: NodeIdx) -> &'g Node {
        &self.graph.nodes[idx]
    }

    pub(super) fn link(&self, idx: LinkIdx) -> &'g Link {
        &self.graph.links[idx]
    }

    pub(super) fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }

    pub(super) fn link_count(&self) -> usize {
        self.graph.links.len()
    }

    pub(super) fn source(&self, link: LinkIdx) -> NodeIdx {
        self.sources[link]
    }

    pub(super) fn target(&self, link: LinkIdx) -> NodeIdx {
        self.targets[link]
    }

    pub(super) fn role(&self, node: NodeIdx) -> NodeRole {
        self.node(node).role()
    }

    pub(super) fn is_transition(&self, link: LinkIdx) -> bool {
        self.link(link).has_transition_set()
    }

    /// Outbound links, minus property-less links to `END` unless asked for.
    pub(super) fn links_from(&self, node: NodeIdx, include_links_to_end: bool) -> Vec<LinkIdx> {
        self.outgoing[self.canonical[node]]
            .iter()
            .copied()
            .filter(|&l| {
                include_links_to_end
                    || !(self.role(self.target(l)) == NodeRole::End
                        && self.link(l).has_no_properties())
            })
            .collect()
    }

    /// Outbound plain links (plus `'*'` transitions), minus links to `END`
    /// unless asked for.
    pub(super) fn links_from_without_transitions(
        &self,
        node: NodeIdx,
        include_links_to_end: bool,
    ) -> Vec<LinkIdx> {
        self.outgoing[self.canonical[node]]
            .iter()
            .copied()
            .filter(|&l| {
                let link = self.link(l);
                if link.has_transition_set() {
                    link.is_wildcard_transition()
                } else {
                    include_links_to_end || self.role(self.target(l)) != NodeRole::End
                }
            })
            .collect()
    }

    pub(super) fn count_without_transitions(&self, links: &[LinkIdx]) -> usize {
        links.iter().filter(|&&l| !self.is_transition(l)).count()
    }

    /// True if `candidate` is the target of `link` or reachable from it.
    pub(super) fn found_in_chain(&self, link: LinkIdx, candidate: NodeIdx) -> bool {
        let mut pending = vec![self.target(link)];
        let mut seen = AHashSet::new();
        while let Some(node) = pending.pop() {
            if node == candidate {
                return true;
            }
            if !seen.insert(node) {
                continue;
            }
            pending.extend(
                self.links_from(node, true)
                    .into_iter()
                    .rev()
                    .map(|l| self.target(l)),
            );
        }
        false
    }

    /// True if `b` is reachable from `a` through at least one link.
    pub(super) fn is_successor(&self, a: NodeIdx, b: NodeIdx) -> bool {
        self.links_from(a, true)
            .into_iter()
            .any(|l| self.found_in_chain(l, b))
    }

    pub(super) fn describe(&self, node: NodeIdx) -> String {
        self.node(node).to_string()
    }
}

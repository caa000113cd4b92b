use super::{END, Graph, Link, Node, Properties, START};
use crate::error::GraphError;

/// Fluent construction of a [`Graph`].
///
/// `build` checks that every link resolves to a node; it does not insist on
/// `START`/`END` so partial graphs can still be assembled and inspected.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(self, id: &str) -> Self {
        self.node(id, START)
    }

    pub fn end(self, id: &str) -> Self {
        self.node(id, END)
    }

    pub fn node(mut self, id: &str, name: &str) -> Self {
        self.nodes.push(Node::new(id, name));
        self
    }

    pub fn labelled_node(mut self, id: &str, label: &str, name: &str) -> Self {
        self.nodes.push(Node::new(id, name).with_label(label));
        self
    }

    pub fn node_with_properties<K, V>(
        mut self,
        id: &str,
        name: &str,
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let properties: Properties = properties.into_iter().collect();
        self.nodes.push(Node::new(id, name).with_properties(properties));
        self
    }

    /// Adds an already constructed node.
    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn link(mut self, from: &str, to: &str) -> Self {
        self.links.push(Link::new(from, to));
        self
    }

    pub fn transition(mut self, from: &str, to: &str, status: &str) -> Self {
        self.links.push(Link::transition(from, to, status));
        self
    }

    pub fn build(self) -> Result<Graph, GraphError> {
        for link in &self.links {
            for (id, other) in [(&link.from, &link.to), (&link.to, &link.from)] {
                if !self.nodes.iter().any(|n| n.id() == id) {
                    return Err(GraphError::NodeNotFound {
                        missing_node_id: id.clone(),
                        source_node_id: other.clone(),
                    });
                }
            }
        }
        Ok(Graph::new(self.nodes, self.links))
    }
}

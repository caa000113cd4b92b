use thiserror::Error;

/// Errors raised while validating a graph or rebuilding DSL text from it.
///
/// These are all structural: the graph cannot be rendered as it stands, and
/// retrying will not help.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Invalid workflow graph: no '{name}' node found")]
    MissingReservedNode { name: &'static str },

    #[error(
        "Invalid workflow graph: node '{missing_node_id}' not found, which is required by a link from node '{source_node_id}'"
    )]
    NodeNotFound {
        missing_node_id: String,
        source_node_id: String,
    },

    #[error("Invalid workflow graph: unable to find the end of the split leaving '{split_from}'")]
    SplitEndNotFound { split_from: String },

    #[error("Invalid workflow graph: traversal exceeded the maximum nesting depth of {limit}")]
    RecursionLimit { limit: usize },

    #[error("Invalid workflow graph: failed to parse graph JSON: {0}")]
    JsonParseError(String),
}

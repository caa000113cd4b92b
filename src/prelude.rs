//! Prelude module for convenient imports
//!
//! Re-exports the graph model, the DSL writer and the error type, so a single
//! `use flowtext::prelude::*;` is enough for most callers.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowtext::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/graph.json")?;
//! let graph = Graph::from_json(&json)?;
//! println!("{}", graph.to_dsl_text()?);
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{Graph, GraphBuilder, Link, Node, NodeRole, Properties};

// Reconstruction
pub use crate::dsl::{DslOptions, DslWriter, Rendering};

// Error types
pub use crate::error::GraphError;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

//! # Flowtext - Composed-Task DSL Reconstruction
//!
//! **Flowtext** turns a workflow graph back into the textual composed-task
//! DSL it was built from. A graph is a list of nodes (task steps plus the
//! reserved `START`, `END`, `FAIL` and `SYNC` markers) and a list of links
//! between them. Links are either plain flow edges or *transitions*, taken
//! only when the upstream step exits with a given status.
//!
//! The text uses three composition forms:
//!
//! - sequential flow: `A && B`
//! - parallel split: `<A || B>`, nestable
//! - conditional transition: `A 'FAILED'->$FAIL`
//!
//! ## Core Workflow
//!
//! 1.  **Load a Graph**: decode it from JSON with [`graph::Graph::from_json`], or
//!     assemble it with [`graph::GraphBuilder`].
//! 2.  **Render**: call [`graph::Graph::to_dsl_text`], or use
//!     [`dsl::DslWriter::builder`] to tune the safety limits and learn whether
//!     the rendering was cut short.
//!
//! Rendering never modifies the graph and always yields the same text for the
//! same graph.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowtext::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let graph = Graph::builder()
//!         .start("0")
//!         .node("1", "A")
//!         .node("2", "B")
//!         .node("3", "C")
//!         .node("4", "D")
//!         .end("5")
//!         .link("0", "1")
//!         .link("1", "2")
//!         .link("1", "3")
//!         .link("2", "4")
//!         .link("3", "4")
//!         .link("4", "5")
//!         .build()?;
//!
//!     assert_eq!(graph.to_dsl_text()?, "A && <B || C> && D");
//!
//!     let rendering = DslWriter::builder(&graph).with_drain_limit(100).build().render()?;
//!     assert!(!rendering.truncated);
//!     Ok(())
//! }
//! ```

pub mod dsl;
pub mod error;
pub mod graph;
pub mod prelude;

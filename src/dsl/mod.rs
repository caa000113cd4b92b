//! Rebuilds composed-task DSL text from a [`Graph`].
//!
//! The output language has four constructs:
//!
//! - flow: `a && b`
//! - step: `label: name --key=value`
//! - split: `<a || b && c>`, which may nest
//! - transition: `a 'FAILED'->b`, appended after the step it leaves
//!
//! Reconstruction walks the graph from `START`, recovering flows and (nested)
//! splits from the link structure, then drains any steps that are only
//! reachable through transitions.

mod printer;
mod split;
mod topology;
mod traversal;

pub use printer::{END_TARGET, FAIL_TARGET};

use crate::error::GraphError;
use crate::graph::Graph;
use topology::Topology;
use traversal::Traversal;

/// Upper bound on heads pulled from the leftover-node drain.
pub const DEFAULT_DRAIN_LIMIT: usize = 10_000;

/// Upper bound on nested follow/split-search calls.
pub const DEFAULT_MAX_DEPTH: usize = 1_000;

/// Limits applied to a single reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DslOptions {
    pub drain_limit: usize,
    pub max_depth: usize,
}

impl Default for DslOptions {
    fn default() -> Self {
        Self {
            drain_limit: DEFAULT_DRAIN_LIMIT,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The result of a reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub text: String,
    /// Set when the drain limit stopped reconstruction with nodes left over.
    /// The text is then a partial rendering of a malformed graph.
    pub truncated: bool,
}

/// Writes the DSL text for one graph.
pub struct DslWriter<'g> {
    graph: &'g Graph,
    options: DslOptions,
}

pub struct DslWriterBuilder<'g> {
    graph: &'g Graph,
    options: DslOptions,
}

impl<'g> DslWriterBuilder<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            options: DslOptions::default(),
        }
    }

    pub fn with_drain_limit(mut self, drain_limit: usize) -> Self {
        self.options.drain_limit = drain_limit;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    pub fn with_options(mut self, options: DslOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> DslWriter<'g> {
        DslWriter {
            graph: self.graph,
            options: self.options,
        }
    }
}

impl<'g> DslWriter<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        DslWriterBuilder::new(graph).build()
    }

    pub fn builder(graph: &'g Graph) -> DslWriterBuilder<'g> {
        DslWriterBuilder::new(graph)
    }

    pub fn options(&self) -> DslOptions {
        self.options
    }

    /// Renders the graph, returning only the text.
    pub fn write(&self) -> Result<String, GraphError> {
        self.render().map(|rendering| rendering.text)
    }

    /// Renders the graph.
    ///
    /// Fails if `START` or `END` is missing, a link is dangling, a split has no
    /// common end, or the depth limit is hit. The graph itself is never modified;
    /// all bookkeeping lives in a context private to this call.
    pub fn render(&self) -> Result<Rendering, GraphError> {
        let topology = Topology::new(self.graph, self.options.max_depth)?;
        Traversal::new(&topology).run(self.options.drain_limit)
    }
}

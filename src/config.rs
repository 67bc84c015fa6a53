//! Construction options for [`Graph`](crate::Graph).
//!
//! [`GraphOptions`] is a plain data struct so it can be built in code through
//! its builder methods, or deserialized from a host application's own
//! configuration file. Every field is optional on input and falls back to its
//! default.

use serde::{Deserialize, Serialize};

/// Options accepted by [`Graph::with_options`](crate::Graph::with_options).
///
/// # Examples
///
/// ```rust
/// use keygraph::{Graph, GraphOptions};
///
/// let options = GraphOptions::new().with_label("dependencies").with_capacity(64, 128);
/// let graph: Graph<(), ()> = Graph::with_options(options);
///
/// assert_eq!(graph.label(), Some("dependencies"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Human-readable name for the graph, returned by [`Graph::label`](crate::Graph::label).
    pub label: Option<String>,

    /// Expected number of nodes (default: 0). Large hints are capped when the graph is built.
    pub node_capacity: usize,

    /// Expected number of edges (default: 0). Large hints are capped when the graph is built.
    pub edge_capacity: usize,
}

impl GraphOptions {
    /// Creates options with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the graph label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the node and edge capacity hints.
    #[must_use]
    pub fn with_capacity(mut self, nodes: usize, edges: usize) -> Self {
        self.node_capacity = nodes;
        self.edge_capacity = edges;
        self
    }
}

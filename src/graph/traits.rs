//! Trait definitions for the adjacency query surface.
//!
//! Graph algorithms such as cycle detection or topological sorting are not part
//! of this crate. They live with their callers and consume a graph through the
//! traits defined here, which keeps them independent of [`Graph`](crate::Graph)'s
//! concrete storage.
//!
//! # Architecture
//!
//! The trait hierarchy is minimal and composable:
//!
//! - [`GraphBase`] - Core properties: node count and node key iteration
//! - [`Successors`] - Forward adjacency (targets of outgoing edges)
//! - [`Predecessors`] - Backward adjacency (sources of incoming edges)
//!
//! All adjacency queries return iterators. Unlike the inherent methods on
//! [`Graph`](crate::Graph), which return `None` for unknown keys, the trait
//! methods yield nothing for an unknown key so that generic algorithms need no
//! special casing.

/// Base trait providing core graph properties.
///
/// # Examples
///
/// ```rust
/// use keygraph::{Graph, GraphBase};
///
/// fn describe<G: GraphBase>(graph: &G) -> String {
///     format!("{} nodes", graph.node_count())
/// }
///
/// let mut graph: Graph<(), ()> = Graph::new();
/// graph.add_node("a").add_node("b");
/// assert_eq!(describe(&graph), "2 nodes");
/// ```
pub trait GraphBase {
    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Returns an iterator over all node keys in the graph.
    fn node_keys(&self) -> impl Iterator<Item = &str>;
}

/// Trait for graphs that support forward edge traversal.
///
/// For a directed edge `(u, v)`, `v` is a successor of `u`.
pub trait Successors: GraphBase {
    /// Returns an iterator over the successor keys of `key`.
    ///
    /// Yields nothing if `key` is not a node of the graph.
    fn successors_of<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str>;
}

/// Trait for graphs that support backward edge traversal.
///
/// For a directed edge `(u, v)`, `u` is a predecessor of `v`.
pub trait Predecessors: GraphBase {
    /// Returns an iterator over the predecessor keys of `key`.
    ///
    /// Yields nothing if `key` is not a node of the graph.
    fn predecessors_of<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str>;
}

//! Edge identity for keyed directed graphs.
//!
//! This module provides [`Edge`], the owned identity of a directed edge: the
//! ordered pair of its source and target node keys. Because the graph is a
//! simple digraph, the pair alone identifies an edge; `(a, b)` and `(b, a)`
//! are two different edges.
//!
//! A crate-private borrowed view, [`EdgeRef`], hashes identically to [`Edge`]
//! and implements [`Equivalent`], so the graph can look edges up from a pair of
//! `&str` without allocating.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use indexmap::Equivalent;

/// The identity of a directed edge: an ordered `(source, target)` pair of node keys.
///
/// `Edge` values are produced by the graph (see [`Graph::edges`](crate::Graph::edges),
/// [`Graph::in_edges`](crate::Graph::in_edges) and friends) and can be compared,
/// hashed, ordered and used as map keys by callers. Ordering is lexicographic
/// on `(source, target)`.
///
/// # Examples
///
/// ```rust
/// use keygraph::{Edge, Graph};
///
/// let mut graph: Graph<(), &str> = Graph::new();
/// graph.set_edge("a", "b", "a to b");
///
/// let edge: &Edge = graph.edges().next().unwrap();
/// assert_eq!(edge.source(), "a");
/// assert_eq!(edge.target(), "b");
/// assert_eq!(edge.to_string(), "a -> b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Edge {
    source: String,
    target: String,
}

impl Edge {
    /// Creates an edge identity from its two endpoint keys.
    ///
    /// Constructing an `Edge` does not touch any graph; it is mostly useful for
    /// comparing against query results.
    ///
    /// # Arguments
    ///
    /// * `source` - Key of the node the edge leaves
    /// * `target` - Key of the node the edge enters
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns the key of the node this edge leaves.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the key of the node this edge enters.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns `true` if the edge starts and ends at the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    pub(crate) fn view(&self) -> EdgeRef<'_> {
        EdgeRef::new(&self.source, &self.target)
    }
}

// Must stay in lockstep with `EdgeRef`'s hash.
impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.as_str().hash(state);
        self.target.as_str().hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

impl<S: Into<String>, T: Into<String>> From<(S, T)> for Edge {
    fn from((source, target): (S, T)) -> Self {
        Edge::new(source, target)
    }
}

/// Borrowed `(source, target)` view used for allocation-free table lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeRef<'a> {
    pub(crate) source: &'a str,
    pub(crate) target: &'a str,
}

impl<'a> EdgeRef<'a> {
    pub(crate) fn new(source: &'a str, target: &'a str) -> Self {
        EdgeRef { source, target }
    }

    pub(crate) fn to_edge(self) -> Edge {
        Edge::new(self.source, self.target)
    }
}

impl Hash for EdgeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
    }
}

impl Equivalent<Edge> for EdgeRef<'_> {
    fn equivalent(&self, key: &Edge) -> bool {
        self.source == key.source && self.target == key.target
    }
}

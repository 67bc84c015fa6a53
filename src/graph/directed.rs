//! Core keyed directed graph implementation.
//!
//! This module provides [`Graph`], a mutable directed graph whose nodes are
//! identified by caller-supplied string keys. Nodes and edges each carry an
//! optional value of a caller-chosen type.
//!
//! Internally the graph keeps six coupled indices that every mutation updates
//! together:
//!
//! - the node table (key → optional value),
//! - the edge table ([`Edge`] → optional value),
//! - per-node incoming and outgoing edge sets,
//! - per-node predecessor and successor reference counts.
//!
//! The node and edge tables preserve insertion order, so [`Graph::nodes`] and
//! [`Graph::edges`] iterate deterministically. Lookups and removals are O(1)
//! (removal amortized).

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use crate::{
    config::GraphOptions,
    graph::{
        counts::AdjacencyCounts,
        edge::{Edge, EdgeRef},
        table::OrderedTable,
        traits::{GraphBase, Predecessors, Successors},
    },
    Endpoint, Error, Result,
};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Upper bound applied to capacity hints before pre-allocating.
const MAX_CAPACITY_HINT: usize = 1 << 20;

/// A mutable directed graph with string keys and optional node and edge values.
///
/// `Graph` is a simple digraph: at most one edge exists per ordered pair of
/// nodes, and self-loops are allowed. It does not enforce acyclicity.
///
/// - Generic node values (`N`) and edge values (`E`), each optional per entry
/// - O(1) node and edge lookup by key
/// - Predecessor, successor and neighbor queries in O(degree)
/// - Chainable mutators returning `&mut Self`
///
/// # Missing Keys
///
/// Queries never fail. A lookup of an unknown key returns `None`, which is
/// distinct from a node that exists without a value:
///
/// - `node(k) == None` means `k` is not in the graph
/// - `node(k) == Some(None)` means `k` exists and has no value
/// - `node(k) == Some(Some(v))` means `k` exists with value `v`
///
/// # Endpoint Policy
///
/// [`set_edge`](Self::set_edge) and [`add_edge`](Self::add_edge) create missing
/// endpoint nodes on the fly. Callers that want edge insertion to fail on an
/// unknown endpoint use [`try_set_edge`](Self::try_set_edge) or
/// [`try_add_edge`](Self::try_add_edge) instead.
///
/// # Thread Safety
///
/// `Graph<N, E>` is [`Send`] and [`Sync`] when both `N` and `E` are. It has no
/// internal locking: mutation requires `&mut self`, so sharing a graph between
/// threads that mutate it means wrapping the whole instance in one lock.
///
/// # Examples
///
/// ```rust
/// use keygraph::Graph;
///
/// let mut graph: Graph<u32, &str> = Graph::new();
/// graph
///     .set_node("a", 1)
///     .set_edge("a", "b", "a->b")
///     .set_edge("b", "c", "b->c");
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.node("a"), Some(Some(&1)));
/// assert_eq!(graph.node("b"), Some(None));
///
/// assert_eq!(graph.sources().collect::<Vec<_>>(), vec!["a"]);
/// assert_eq!(graph.sinks().collect::<Vec<_>>(), vec!["c"]);
/// ```
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    /// Graph-level label, fixed at construction
    label: Option<String>,
    /// Node table in insertion order
    nodes: OrderedTable<String, Option<N>>,
    /// Edge table in insertion order
    edges: OrderedTable<Edge, Option<E>>,
    /// Incoming edges per node
    in_edges: FxIndexMap<String, FxIndexSet<Edge>>,
    /// Outgoing edges per node
    out_edges: FxIndexMap<String, FxIndexSet<Edge>>,
    /// Predecessor counts per node
    predecessors: FxIndexMap<String, AdjacencyCounts>,
    /// Successor counts per node
    successors: FxIndexMap<String, AdjacencyCounts>,
    node_count: usize,
    edge_count: usize,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    /// Creates a new empty graph without a label.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let graph: Graph<(), ()> = Graph::new();
    /// assert!(graph.is_empty());
    /// assert_eq!(graph.label(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    /// Creates a new empty graph configured by `options`.
    ///
    /// The label is fixed for the lifetime of the graph. Capacity hints only
    /// pre-size the internal tables and are capped, so an oversized hint never
    /// fails construction; the tables still grow past it on demand.
    ///
    /// # Arguments
    ///
    /// * `options` - Label and capacity hints
    #[must_use]
    pub fn with_options(options: GraphOptions) -> Self {
        let nodes = options.node_capacity.min(MAX_CAPACITY_HINT);
        let edges = options.edge_capacity.min(MAX_CAPACITY_HINT);
        Graph {
            label: options.label,
            nodes: OrderedTable::with_capacity(nodes),
            edges: OrderedTable::with_capacity(edges),
            in_edges: FxIndexMap::with_capacity_and_hasher(nodes, FxBuildHasher),
            out_edges: FxIndexMap::with_capacity_and_hasher(nodes, FxBuildHasher),
            predecessors: FxIndexMap::with_capacity_and_hasher(nodes, FxBuildHasher),
            successors: FxIndexMap::with_capacity_and_hasher(nodes, FxBuildHasher),
            node_count: 0,
            edge_count: 0,
        }
    }

    /// Creates a new empty graph with pre-allocated capacity.
    ///
    /// # Arguments
    ///
    /// * `node_capacity` - Expected number of nodes
    /// * `edge_capacity` - Expected number of edges
    #[must_use]
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self::with_options(GraphOptions::new().with_capacity(node_capacity, edge_capacity))
    }

    /// Returns the label given at construction, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    // ---------------------------------------------------------------------
    // Nodes
    // ---------------------------------------------------------------------

    /// Returns the value stored for a node.
    ///
    /// # Arguments
    ///
    /// * `key` - The node to look up
    ///
    /// # Returns
    ///
    /// - `None` if `key` is not a node of the graph
    /// - `Some(None)` if the node exists without a value
    /// - `Some(Some(&value))` otherwise
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<&str, ()> = Graph::new();
    /// graph.set_node("a", "alpha").add_node("b");
    ///
    /// assert_eq!(graph.node("a"), Some(Some(&"alpha")));
    /// assert_eq!(graph.node("b"), Some(None));
    /// assert_eq!(graph.node("c"), None);
    /// ```
    #[must_use]
    pub fn node(&self, key: &str) -> Option<Option<&N>> {
        self.nodes.get(key).map(Option::as_ref)
    }

    /// Returns a mutable reference to a node's value slot.
    ///
    /// Writing `None` through the returned reference clears the value without
    /// removing the node.
    ///
    /// # Returns
    ///
    /// `None` if `key` is not a node of the graph.
    pub fn node_mut(&mut self, key: &str) -> Option<&mut Option<N>> {
        self.nodes.get_mut(key)
    }

    /// Returns `true` if `key` is a node of the graph.
    #[must_use]
    pub fn has_node(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Inserts a node with a value, or replaces the value of an existing node.
    ///
    /// Replacing the value leaves the node's edges untouched.
    ///
    /// # Arguments
    ///
    /// * `key` - The node key
    /// * `value` - The value to store
    ///
    /// # Returns
    ///
    /// The graph, for chaining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<i32, ()> = Graph::new();
    /// graph.set_node("a", 1).set_node("a", 2);
    ///
    /// assert_eq!(graph.node_count(), 1);
    /// assert_eq!(graph.node("a"), Some(Some(&2)));
    /// ```
    pub fn set_node(&mut self, key: &str, value: N) -> &mut Self {
        self.upsert_node(key);
        if let Some(slot) = self.nodes.get_mut(key) {
            *slot = Some(value);
        }
        self
    }

    /// Ensures a node exists, creating it without a value if necessary.
    ///
    /// An existing node keeps its current value.
    ///
    /// # Returns
    ///
    /// The graph, for chaining.
    pub fn add_node(&mut self, key: &str) -> &mut Self {
        self.upsert_node(key);
        self
    }

    /// Adds every key in `keys` as a node.
    ///
    /// With `Some(value)`, each node is [`set_node`](Self::set_node) to a clone
    /// of the value; with `None`, each is [`add_node`](Self::add_node)ed and
    /// existing values are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<u8, ()> = Graph::new();
    /// graph.set_nodes(["a", "b", "c"], Some(0));
    ///
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.node("c"), Some(Some(&0)));
    /// ```
    pub fn set_nodes<I, S>(&mut self, keys: I, value: Option<N>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        N: Clone,
    {
        for key in keys {
            let key = key.as_ref();
            match &value {
                Some(value) => self.set_node(key, value.clone()),
                None => self.add_node(key),
            };
        }
        self
    }

    /// Removes a node together with every edge incident to it.
    ///
    /// Incoming and outgoing edges are removed first, so no other node keeps
    /// the removed node as a predecessor or successor. Removing an unknown key
    /// is a no-op.
    ///
    /// # Returns
    ///
    /// The graph, for chaining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<(), ()> = Graph::new();
    /// graph.add_edge("a", "b").add_edge("b", "c");
    ///
    /// graph.remove_node("b");
    /// assert_eq!(graph.node_count(), 2);
    /// assert_eq!(graph.edge_count(), 0);
    /// assert_eq!(graph.successors("a").map(|s| s.count()), Some(0));
    /// ```
    pub fn remove_node(&mut self, key: &str) -> &mut Self {
        if !self.nodes.contains_key(key) {
            return self;
        }

        let incident: Vec<Edge> = self
            .in_edges
            .get(key)
            .into_iter()
            .flatten()
            .chain(self.out_edges.get(key).into_iter().flatten())
            .cloned()
            .collect();

        // A self-loop shows up in both sets; the second removal is a no-op.
        let mut removed = 0usize;
        for edge in &incident {
            if self.remove_edge_entry(edge.view()) {
                removed += 1;
            }
        }

        self.nodes.remove(key);
        self.in_edges.swap_remove(key);
        self.out_edges.swap_remove(key);
        self.predecessors.swap_remove(key);
        self.successors.swap_remove(key);
        self.node_count -= 1;
        debug_assert_eq!(self.node_count, self.nodes.len());

        debug!(node = key, edges = removed, "removed node");
        self
    }

    /// Returns an iterator over all node keys in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    /// Returns an iterator over nodes with no incoming edges.
    ///
    /// Isolated nodes are both sources and sinks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<(), ()> = Graph::new();
    /// graph.add_node("x").add_edge("c", "d");
    ///
    /// let sources: Vec<&str> = graph.sources().collect();
    /// assert_eq!(sources, vec!["x", "c"]);
    /// ```
    pub fn sources(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes()
            .filter(|key| self.in_edges.get(*key).is_some_and(|edges| edges.is_empty()))
    }

    /// Returns an iterator over nodes with no outgoing edges.
    pub fn sinks(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes()
            .filter(|key| self.out_edges.get(*key).is_some_and(|edges| edges.is_empty()))
    }

    /// Returns the distinct nodes with an edge into `key`.
    ///
    /// # Returns
    ///
    /// `None` if `key` is not a node of the graph, otherwise an iterator over
    /// predecessor keys in unspecified order.
    #[must_use]
    pub fn predecessors(&self, key: &str) -> Option<impl Iterator<Item = &str> + '_> {
        self.predecessors.get(key).map(|counts| counts.keys())
    }

    /// Returns the distinct nodes with an edge out of `key`.
    ///
    /// # Returns
    ///
    /// `None` if `key` is not a node of the graph, otherwise an iterator over
    /// successor keys in unspecified order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<(), ()> = Graph::new();
    /// graph.add_edge("a", "b");
    ///
    /// assert_eq!(graph.successors("a").unwrap().collect::<Vec<_>>(), vec!["b"]);
    /// assert!(graph.successors("zzz").is_none());
    /// ```
    #[must_use]
    pub fn successors(&self, key: &str) -> Option<impl Iterator<Item = &str> + '_> {
        self.successors.get(key).map(|counts| counts.keys())
    }

    /// Returns the distinct nodes adjacent to `key` in either direction.
    ///
    /// Predecessors come first, followed by successors that are not also
    /// predecessors.
    ///
    /// # Returns
    ///
    /// `None` if `key` is not a node of the graph.
    #[must_use]
    pub fn neighbors(&self, key: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let preds = self.predecessors.get(key)?;
        let succs = self.successors.get(key)?;
        Some(
            preds
                .keys()
                .chain(succs.keys().filter(move |succ| !preds.contains(succ))),
        )
    }

    /// Returns the number of edges entering `key`, or `None` for an unknown key.
    #[must_use]
    pub fn in_degree(&self, key: &str) -> Option<usize> {
        self.in_edges.get(key).map(|edges| edges.len())
    }

    /// Returns the number of edges leaving `key`, or `None` for an unknown key.
    #[must_use]
    pub fn out_degree(&self, key: &str) -> Option<usize> {
        self.out_edges.get(key).map(|edges| edges.len())
    }

    /// Returns `true` if `key` is a node with no successors.
    ///
    /// Unknown keys are not leaves.
    #[must_use]
    pub fn is_leaf(&self, key: &str) -> bool {
        self.successors.get(key).is_some_and(AdjacencyCounts::is_empty)
    }

    // ---------------------------------------------------------------------
    // Edges
    // ---------------------------------------------------------------------

    /// Returns an iterator over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.keys()
    }

    /// Returns the value stored for the edge `source -> target`.
    ///
    /// # Returns
    ///
    /// - `None` if there is no such edge
    /// - `Some(None)` if the edge exists without a value
    /// - `Some(Some(&value))` otherwise
    #[must_use]
    pub fn edge(&self, source: &str, target: &str) -> Option<Option<&E>> {
        self.edges
            .get(&EdgeRef::new(source, target))
            .map(Option::as_ref)
    }

    /// Returns a mutable reference to the value slot of `source -> target`.
    pub fn edge_mut(&mut self, source: &str, target: &str) -> Option<&mut Option<E>> {
        self.edges.get_mut(&EdgeRef::new(source, target))
    }

    /// Returns `true` if the edge `source -> target` exists.
    ///
    /// Edges are directed: `has_edge("a", "b")` says nothing about `b -> a`.
    #[must_use]
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains_key(&EdgeRef::new(source, target))
    }

    /// Inserts the edge `source -> target` with a value, or replaces the value
    /// of the existing edge.
    ///
    /// Missing endpoints are created as nodes without a value. Replacing the
    /// value of an existing edge does not touch adjacency state, so repeating
    /// the call never double-counts the edge.
    ///
    /// # Arguments
    ///
    /// * `source` - The node the edge leaves
    /// * `target` - The node the edge enters
    /// * `value` - The value to store on the edge
    ///
    /// # Returns
    ///
    /// The graph, for chaining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<(), u32> = Graph::new();
    /// graph.set_edge("a", "b", 1).set_edge("a", "b", 2);
    ///
    /// assert_eq!(graph.edge_count(), 1);
    /// assert_eq!(graph.edge("a", "b"), Some(Some(&2)));
    /// assert!(graph.has_node("a") && graph.has_node("b"));
    /// ```
    pub fn set_edge(&mut self, source: &str, target: &str, value: E) -> &mut Self {
        self.insert_edge(source, target, Some(value));
        self
    }

    /// Ensures the edge `source -> target` exists, creating it without a value
    /// if necessary.
    ///
    /// Missing endpoints are created. An existing edge keeps its value.
    pub fn add_edge(&mut self, source: &str, target: &str) -> &mut Self {
        self.insert_edge(source, target, None);
        self
    }

    /// Strict form of [`set_edge`](Self::set_edge): both endpoints must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEndpoint`] if either endpoint is not a node of
    /// the graph. The graph is not modified in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<(), u8> = Graph::new();
    /// graph.add_node("a");
    ///
    /// assert!(graph.try_set_edge("a", "b", 7).is_err());
    /// assert_eq!(graph.node_count(), 1);
    ///
    /// graph.add_node("b");
    /// graph.try_set_edge("a", "b", 7)?;
    /// assert_eq!(graph.edge("a", "b"), Some(Some(&7)));
    /// # Ok::<(), keygraph::Error>(())
    /// ```
    pub fn try_set_edge(&mut self, source: &str, target: &str, value: E) -> Result<&mut Self> {
        self.check_endpoints(source, target)?;
        self.insert_edge(source, target, Some(value));
        Ok(self)
    }

    /// Strict form of [`add_edge`](Self::add_edge): both endpoints must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingEndpoint`] if either endpoint is not a node of
    /// the graph. The graph is not modified in that case.
    pub fn try_add_edge(&mut self, source: &str, target: &str) -> Result<&mut Self> {
        self.check_endpoints(source, target)?;
        self.insert_edge(source, target, None);
        Ok(self)
    }

    /// Adds an edge between each consecutive pair of `keys`.
    ///
    /// Every edge receives a clone of `value` (or keeps its existing value when
    /// `value` is `None`). Fewer than two keys adds nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<(), ()> = Graph::new();
    /// graph.set_path(&["a", "b", "c", "d"], None);
    ///
    /// assert_eq!(graph.edge_count(), 3);
    /// assert!(graph.has_edge("c", "d"));
    /// ```
    pub fn set_path<S: AsRef<str>>(&mut self, keys: &[S], value: Option<E>) -> &mut Self
    where
        E: Clone,
    {
        for pair in keys.windows(2) {
            self.insert_edge(pair[0].as_ref(), pair[1].as_ref(), value.clone());
        }
        self
    }

    /// Removes the edge `source -> target`.
    ///
    /// Both endpoint nodes stay in the graph. Removing a missing edge is a no-op.
    ///
    /// # Returns
    ///
    /// The graph, for chaining.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> &mut Self {
        self.remove_edge_entry(EdgeRef::new(source, target));
        self
    }

    /// Returns the edges entering `key`, optionally only those leaving `from`.
    ///
    /// # Arguments
    ///
    /// * `key` - The node whose incoming edges to list
    /// * `from` - When `Some`, keep only edges whose source is this key
    ///
    /// # Returns
    ///
    /// `None` if `key` is not a node of the graph.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::{Edge, Graph};
    ///
    /// let mut graph: Graph<(), ()> = Graph::new();
    /// graph.add_edge("a", "c").add_edge("b", "c");
    ///
    /// let from_a: Vec<&Edge> = graph.in_edges("c", Some("a")).unwrap().collect();
    /// assert_eq!(from_a, vec![&Edge::new("a", "c")]);
    /// assert_eq!(graph.in_edges("c", None).unwrap().count(), 2);
    /// ```
    #[must_use]
    pub fn in_edges<'a>(
        &'a self,
        key: &str,
        from: Option<&'a str>,
    ) -> Option<impl Iterator<Item = &'a Edge> + 'a> {
        let edges = self.in_edges.get(key)?;
        Some(
            edges
                .iter()
                .filter(move |edge| from.is_none_or(|from| edge.source() == from)),
        )
    }

    /// Returns the edges leaving `key`, optionally only those entering `to`.
    ///
    /// # Returns
    ///
    /// `None` if `key` is not a node of the graph.
    #[must_use]
    pub fn out_edges<'a>(
        &'a self,
        key: &str,
        to: Option<&'a str>,
    ) -> Option<impl Iterator<Item = &'a Edge> + 'a> {
        let edges = self.out_edges.get(key)?;
        Some(
            edges
                .iter()
                .filter(move |edge| to.is_none_or(|to| edge.target() == to)),
        )
    }

    /// Returns the incoming edges of `key` followed by its outgoing edges.
    ///
    /// With `other` set, only edges between `key` and `other` (in either
    /// direction) are returned, so the result does not depend on which of the
    /// two is passed first. A self-loop is both incoming and outgoing and is
    /// listed twice.
    ///
    /// # Returns
    ///
    /// `None` if `key` is not a node of the graph.
    #[must_use]
    pub fn node_edges<'a>(
        &'a self,
        key: &str,
        other: Option<&'a str>,
    ) -> Option<impl Iterator<Item = &'a Edge> + 'a> {
        let incoming = self.in_edges(key, other)?;
        let outgoing = self.out_edges(key, other)?;
        Some(incoming.chain(outgoing))
    }

    /// Returns a new graph containing only the nodes accepted by `predicate`.
    ///
    /// Edges are kept when both endpoints are kept. Node and edge values are
    /// cloned; the label carries over.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keygraph::Graph;
    ///
    /// let mut graph: Graph<u32, ()> = Graph::new();
    /// graph.set_node("a", 1).set_node("b", 2).set_node("c", 3);
    /// graph.add_edge("a", "b").add_edge("b", "c");
    ///
    /// let odd = graph.filter_nodes(|_, value| value.is_some_and(|v| v % 2 == 1));
    /// assert_eq!(odd.nodes().collect::<Vec<_>>(), vec!["a", "c"]);
    /// assert_eq!(odd.edge_count(), 0);
    /// ```
    #[must_use]
    pub fn filter_nodes<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&str, Option<&N>) -> bool,
        N: Clone,
        E: Clone,
    {
        let mut filtered = Graph::with_options(GraphOptions {
            label: self.label.clone(),
            node_capacity: self.node_count,
            edge_capacity: 0,
        });

        for (key, value) in self.nodes.iter() {
            if predicate(key.as_str(), value.as_ref()) {
                filtered.upsert_node(key);
                if let Some(slot) = filtered.nodes.get_mut(key.as_str()) {
                    slot.clone_from(value);
                }
            }
        }

        for (edge, value) in self.edges.iter() {
            if filtered.has_node(edge.source()) && filtered.has_node(edge.target()) {
                filtered.insert_edge(edge.source(), edge.target(), value.clone());
            }
        }

        filtered
    }

    // ---------------------------------------------------------------------
    // Internal bookkeeping
    // ---------------------------------------------------------------------

    /// Creates `key` with empty adjacency if it is not yet a node.
    ///
    /// Returns `true` if the node was created.
    fn upsert_node(&mut self, key: &str) -> bool {
        if self.nodes.contains_key(key) {
            return false;
        }

        self.nodes.insert(key.to_owned(), None);
        self.in_edges.insert(key.to_owned(), FxIndexSet::default());
        self.out_edges.insert(key.to_owned(), FxIndexSet::default());
        self.predecessors.insert(key.to_owned(), AdjacencyCounts::new());
        self.successors.insert(key.to_owned(), AdjacencyCounts::new());
        self.node_count += 1;

        trace!(node = key, "added node");
        true
    }

    fn check_endpoints(&self, source: &str, target: &str) -> Result<()> {
        for (endpoint, key) in [(Endpoint::Source, source), (Endpoint::Target, target)] {
            if !self.has_node(key) {
                debug!(source, target, %endpoint, "rejected edge with missing endpoint");
                return Err(Error::missing(endpoint, key));
            }
        }
        Ok(())
    }

    /// Upserts an edge. `None` leaves an existing edge's value alone.
    fn insert_edge(&mut self, source: &str, target: &str, value: Option<E>) {
        let key = EdgeRef::new(source, target);
        if let Some(slot) = self.edges.get_mut(&key) {
            if value.is_some() {
                *slot = value;
            }
            return;
        }

        self.upsert_node(source);
        self.upsert_node(target);

        let edge = key.to_edge();
        if let Some(counts) = self.predecessors.get_mut(target) {
            counts.increment(source);
        }
        if let Some(counts) = self.successors.get_mut(source) {
            counts.increment(target);
        }
        if let Some(edges) = self.in_edges.get_mut(target) {
            edges.insert(edge.clone());
        }
        if let Some(edges) = self.out_edges.get_mut(source) {
            edges.insert(edge.clone());
        }
        self.edges.insert(edge, value);
        self.edge_count += 1;

        trace!(source, target, "added edge");
    }

    /// Removes an edge and its adjacency entries. Returns `false` if absent.
    fn remove_edge_entry(&mut self, key: EdgeRef<'_>) -> bool {
        let Some((edge, _)) = self.edges.remove(&key) else {
            return false;
        };

        if let Some(counts) = self.predecessors.get_mut(edge.target()) {
            counts.decrement(edge.source());
        }
        if let Some(counts) = self.successors.get_mut(edge.source()) {
            counts.decrement(edge.target());
        }
        if let Some(edges) = self.in_edges.get_mut(edge.target()) {
            edges.swap_remove(&edge);
        }
        if let Some(edges) = self.out_edges.get_mut(edge.source()) {
            edges.swap_remove(&edge);
        }
        self.edge_count -= 1;
        debug_assert_eq!(self.edge_count, self.edges.len());

        trace!(source = edge.source(), target = edge.target(), "removed edge");
        true
    }
}

impl<N, E> GraphBase for Graph<N, E> {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn node_keys(&self) -> impl Iterator<Item = &str> {
        self.nodes()
    }
}

impl<N, E> Successors for Graph<N, E> {
    fn successors_of<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.successors
            .get(key)
            .into_iter()
            .flat_map(|counts| counts.keys())
    }
}

impl<N, E> Predecessors for Graph<N, E> {
    fn predecessors_of<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.predecessors
            .get(key)
            .into_iter()
            .flat_map(|counts| counts.keys())
    }
}

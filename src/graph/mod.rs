//! Keyed directed graph storage and queries.
//!
//! This module contains the graph itself plus the small types it hands out:
//!
//! - [`Graph`] - The mutable directed graph with string keys
//! - [`Edge`] - Identity of a directed edge as a `(source, target)` pair
//! - [`GraphBase`], [`Successors`], [`Predecessors`] - Traits for generic
//!   algorithms written against the adjacency queries
//!
//! # Example
//!
//! ```rust
//! use keygraph::graph::Graph;
//!
//! let mut graph: Graph<&str, u32> = Graph::new();
//! graph.set_node("parse", "stage 1").set_edge("parse", "check", 10);
//!
//! assert_eq!(graph.predecessors("check").unwrap().collect::<Vec<_>>(), vec!["parse"]);
//! ```

mod counts;
mod directed;
mod edge;
mod table;
mod traits;

pub use directed::Graph;
pub use edge::Edge;
pub use traits::{GraphBase, Predecessors, Successors};

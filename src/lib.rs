// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # keygraph
//!
//! A mutable, generic directed graph addressed by string keys.
//!
//! Nodes are identified by caller-chosen keys and edges by the ordered pair of
//! their endpoint keys. Both may carry an optional value of a caller-chosen
//! type. The graph answers adjacency questions (predecessors, successors,
//! neighbors, incoming and outgoing edges, sources and sinks) in time
//! proportional to the size of the answer, and keeps all of its internal
//! indices consistent across every insertion and removal.
//!
//! ## Features
//!
//! - **Optional values** - Nodes and edges may exist with or without a payload
//! - **Constant-time lookups** - Node and edge queries by key
//! - **Degree-time adjacency** - Neighbor and incident-edge queries
//! - **Cascading removal** - Removing a node removes every edge touching it
//! - **Deterministic iteration** - Nodes and edges iterate in insertion order
//!
//! ## Quick Start
//!
//! ```rust
//! use keygraph::prelude::*;
//!
//! let mut graph: Graph<&str, u32> = Graph::with_options(GraphOptions::new().with_label("build"));
//! graph
//!     .set_node("fetch", "download sources")
//!     .set_edge("fetch", "compile", 5)
//!     .set_edge("compile", "link", 2)
//!     .set_edge("fetch", "docs", 1);
//!
//! assert_eq!(graph.label(), Some("build"));
//! assert_eq!(graph.sources().collect::<Vec<_>>(), vec!["fetch"]);
//!
//! let mut sinks: Vec<&str> = graph.sinks().collect();
//! sinks.sort_unstable();
//! assert_eq!(sinks, vec!["docs", "link"]);
//!
//! graph.remove_node("compile");
//! assert!(!graph.has_edge("compile", "link"));
//! assert_eq!(graph.edge_count(), 1);
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`graph`] - The [`Graph`] type, edge identities and adjacency traits
//! - [`config`] - [`GraphOptions`] for construction
//! - [`Error`] and [`Result`] - Error handling for the strict edge insertions
//!
//! ## Logging
//!
//! Mutations emit [`tracing`] events: node and edge creation and removal at
//! `TRACE`, cascading node removal and rejected strict insertions at `DEBUG`.
//! The crate never installs a subscriber; that is up to the application.
//!
//! ## Concurrency
//!
//! A [`Graph`] has no internal synchronization. Readers may share `&Graph`
//! freely; concurrent mutation requires wrapping the graph in a lock such as
//! [`std::sync::RwLock`].

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use keygraph::prelude::*;
///
/// let mut graph: Graph<(), ()> = Graph::new();
/// graph.add_edge("a", "b");
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub mod prelude;

/// Construction options for graphs.
pub mod config;

/// Keyed directed graph storage and adjacency queries.
pub mod graph;

/// `keygraph` Result type
///
/// A type alias for `std::result::Result<T, Error>`, used by the fallible
/// operations of this crate.
///
/// # Example
///
/// ```rust
/// use keygraph::{Graph, Result};
///
/// fn connect(graph: &mut Graph<(), ()>, from: &str, to: &str) -> Result<()> {
///     graph.try_add_edge(from, to)?;
///     Ok(())
/// }
///
/// let mut graph = Graph::new();
/// graph.add_node("a").add_node("b");
/// assert!(connect(&mut graph, "a", "b").is_ok());
/// assert!(connect(&mut graph, "a", "c").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `keygraph` Error type
///
/// The only failure is a strict edge insertion naming a node that does not
/// exist, reported as [`Error::MissingEndpoint`] along with its [`Endpoint`].
pub use error::{Endpoint, Error};

/// Options accepted when constructing a [`Graph`].
pub use config::GraphOptions;

/// The main graph type and its companions.
pub use graph::{Edge, Graph, GraphBase, Predecessors, Successors};

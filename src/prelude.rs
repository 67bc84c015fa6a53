//! # keygraph Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the keygraph library. Import this module to get quick access to the graph, its
//! edge identity, construction options and error handling.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all keygraph operations
pub use crate::Error;

/// Which end of an edge an error refers to
pub use crate::Endpoint;

/// The result type used throughout keygraph
pub use crate::Result;

// ================================================================================================
// Graph
// ================================================================================================

/// The keyed directed graph
pub use crate::Graph;

/// Construction options
pub use crate::GraphOptions;

/// Edge identity
pub use crate::Edge;

// ================================================================================================
// Traits
// ================================================================================================

/// Adjacency traits for generic graph algorithms
pub use crate::{GraphBase, Predecessors, Successors};

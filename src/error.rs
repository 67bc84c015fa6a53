use strum::Display;
use thiserror::Error;

/// Which end of a directed edge an error refers to.
///
/// Displays in lowercase (`"source"` / `"target"`) so it reads naturally
/// inside error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    /// The node an edge leaves.
    Source,
    /// The node an edge enters.
    Target,
}

/// The generic Error type, which covers every error this library can return.
///
/// The graph is deliberately lenient: lookups of unknown keys return `None`
/// and the default mutators create missing endpoints on demand. Errors only
/// arise from the strict edge-insertion variants
/// ([`Graph::try_set_edge`](crate::Graph::try_set_edge) and
/// [`Graph::try_add_edge`](crate::Graph::try_add_edge)), which refuse to create
/// nodes implicitly.
///
/// # Examples
///
/// ```rust
/// use keygraph::{Endpoint, Error, Graph};
///
/// let mut graph: Graph<(), ()> = Graph::new();
/// graph.add_node("a");
///
/// match graph.try_add_edge("a", "b") {
///     Err(Error::MissingEndpoint { endpoint, key }) => {
///         assert_eq!(endpoint, Endpoint::Target);
///         assert_eq!(key, "b");
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An edge named an endpoint that is not a node of the graph.
    ///
    /// Returned by the strict insertion methods only. The graph is left
    /// exactly as it was before the call.
    ///
    /// # Fields
    ///
    /// * `endpoint` - Whether the missing node was the edge's source or target
    /// * `key` - The key that could not be resolved
    #[error("missing {endpoint} node '{key}'")]
    MissingEndpoint {
        /// Which end of the edge was missing
        endpoint: Endpoint,
        /// The unresolved node key
        key: String,
    },
}

impl Error {
    pub(crate) fn missing(endpoint: Endpoint, key: &str) -> Self {
        Error::MissingEndpoint {
            endpoint,
            key: key.to_owned(),
        }
    }
}

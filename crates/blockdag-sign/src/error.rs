//! Error types for DAG signing.

use std::fmt;

/// Which end of an edge failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Errors that can occur while signing a DAG.
///
/// Every error is terminal: no signature set is produced and, in append
/// mode, the caller's vertices are left untouched.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// An edge references a label that is not in the vertex set.
    #[error("edges[{edge}]: {endpoint} vertex {label} is not in vertices")]
    MissingEndpoint {
        /// Position of the offending edge in the edge collection.
        edge: usize,
        endpoint: Endpoint,
        /// Debug rendering of the missing label.
        label: String,
    },

    /// A label listed by the vertex set could not be looked up again.
    #[error("vertices: lookup failed for listed vertex {0}")]
    MissingVertex(String),

    /// Traversal finished without reaching every vertex.
    #[error("some vertices untraversed: {visited} of {total} signed, the graph contains a cycle")]
    Untraversed { visited: usize, total: usize },

    /// Signer configuration could not be parsed.
    #[error("invalid signer configuration: {0}")]
    Config(String),
}

/// Convenience alias for signing results.
pub type SignResult<T> = Result<T, SignError>;

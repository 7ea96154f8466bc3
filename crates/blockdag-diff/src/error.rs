//! Error types for the diff crate.

use std::fmt;

/// Which input of a comparison an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors that can occur during comparison.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// An input carries no graph signature (unsigned or empty graph).
    #[error("{side} signature set does not contain a graph signature")]
    MissingSignature { side: Side },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;

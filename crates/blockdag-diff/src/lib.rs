//! Diff engine for BlockDAG signature sets.
//!
//! Two signed graphs are identical when their graph signatures match. When
//! they do not, vertices are matched by their structural `hash` rather than
//! by label, so a vertex is reported as differing whenever its own content
//! or anything upstream of it changed.
//!
//! # Key Types
//!
//! - [`SignatureDiff`] -- Labels only present on either side
//! - [`DiffError`] -- Missing graph signatures

pub mod compare;
pub mod error;

pub use compare::{compare, SignatureDiff};
pub use error::{DiffError, DiffResult, Side};

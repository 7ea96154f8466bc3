//! Foundation types for BlockDAG signatures.
//!
//! Every other BlockDAG crate depends on `blockdag-types`.
//!
//! # Key Types
//!
//! - [`Digest`] — Opaque, byte-ordered output of a hash function
//! - [`Attributes`] — Untyped attribute mapping carried by one vertex

pub mod digest;
pub mod error;

pub use digest::Digest;
pub use error::TypeError;

/// The attribute mapping of a single vertex.
///
/// Values are opaque to the signer; only the keys are inspected, to decide
/// which attributes participate in hashing.
pub type Attributes = std::collections::BTreeMap<String, serde_json::Value>;

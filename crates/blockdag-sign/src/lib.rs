//! Structural signatures for directed acyclic graphs.
//!
//! [`DagSigner`] walks a DAG in Kahn order and gives every vertex a digest
//! derived from its selected attribute values and the digests of its direct
//! predecessors. The digests of all sink vertices are folded into one graph
//! signature. Neither depends on vertex labels, insertion order, or the
//! order in which ready vertices are visited.
//!
//! # Key Types
//!
//! - [`DagSigner`] — Configured signer (hash function + attribute filter)
//! - [`SignatureSet`] / [`VertexSignature`] — Signing output
//! - [`VertexSet`] / [`FieldFilter`] — Capabilities required of caller data
//! - [`SignerConfig`] — Serializable signer settings

pub mod config;
pub mod error;
pub mod graph;
pub mod record;
pub mod signer;

pub use config::SignerConfig;
pub use error::{Endpoint, SignError, SignResult};
pub use graph::{FieldFilter, Label, VertexSet, VertexSetMut};
pub use record::{SignatureSet, VertexSignature};
pub use signer::{sign, sign_with_config, DagSigner};

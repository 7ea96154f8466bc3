//! Merkle combiner for BlockDAG signatures.
//!
//! Folds an unordered collection of values into a single root digest using a
//! caller-supplied hash function. Leaves are sorted by digest before folding,
//! so the root never depends on input order.
//!
//! The leaf encoding ([`CanonicalBytes`]) and the folding rule
//! ([`MerkleTree`]) together form the wire format of every signature built
//! on top of this crate.

pub mod canonical;
pub mod hasher;
pub mod merkle;

pub use canonical::CanonicalBytes;
pub use hasher::{Blake3, HashAlgorithm, HashFunction, HasherError, Sha256};
pub use merkle::{combine, MerkleTree};

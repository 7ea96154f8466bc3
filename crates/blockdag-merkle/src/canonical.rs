//! Canonical byte encoding of Merkle leaves (wire format version 1).
//!
//! - `serde_json::Value`: compact JSON text with object keys in sorted order.
//!   Strings keep their quotes, and `1` and `1.0` encode differently.
//! - [`Digest`]: its raw bytes.
//! - `Option<T>`: the inner encoding, or the empty byte string for `None`.

use blockdag_types::Digest;
use serde_json::Value;

/// Deterministic byte serialization of a value about to become a Merkle leaf.
pub trait CanonicalBytes {
    /// The bytes fed to the hash function for this leaf.
    fn canonical_bytes(&self) -> Vec<u8>;
}

impl CanonicalBytes for Value {
    fn canonical_bytes(&self) -> Vec<u8> {
        // `Value`'s Display is compact JSON; maps are BTreeMap-backed.
        self.to_string().into_bytes()
    }
}

impl CanonicalBytes for Digest {
    fn canonical_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl<T: CanonicalBytes> CanonicalBytes for Option<T> {
    fn canonical_bytes(&self) -> Vec<u8> {
        match self {
            Some(inner) => inner.canonical_bytes(),
            None => Vec::new(),
        }
    }
}

impl<T: CanonicalBytes + ?Sized> CanonicalBytes for &T {
    fn canonical_bytes(&self) -> Vec<u8> {
        (**self).canonical_bytes()
    }
}

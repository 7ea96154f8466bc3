//! Signing output: per-vertex records and the whole-graph signature.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use blockdag_types::{Attributes, Digest};

/// Attribute key under which a vertex's data hash is appended.
pub const DATA_HASH_KEY: &str = "data_hash";
/// Attribute key under which a vertex's parent hashes are appended.
pub const PARENT_HASHES_KEY: &str = "parent_hashes";
/// Attribute key under which a vertex's combined hash is appended.
pub const HASH_KEY: &str = "hash";

/// Signature record of one vertex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexSignature {
    /// Merkle root of the selected attribute values; `None` when no
    /// attribute was selected.
    pub data_hash: Option<Digest>,
    /// Hashes of direct predecessors, one entry per incoming edge. Order is
    /// irrelevant; entries are sorted again when combined.
    pub parent_hashes: Vec<Option<Digest>>,
    /// Merkle root over `data_hash` and `parent_hashes`. `None` only for a
    /// source vertex without selected data.
    pub hash: Option<Digest>,
}

impl VertexSignature {
    /// The record as attribute values (hex strings, `null` for absent hashes).
    pub fn to_attributes(&self) -> Attributes {
        let parents = self.parent_hashes.iter().map(digest_value).collect();
        Attributes::from([
            (DATA_HASH_KEY.to_string(), digest_value(&self.data_hash)),
            (PARENT_HASHES_KEY.to_string(), Value::Array(parents)),
            (HASH_KEY.to_string(), digest_value(&self.hash)),
        ])
    }

    /// Merge the record into `attributes`, overwriting existing keys.
    pub fn merge_into(&self, attributes: &mut Attributes) {
        attributes.extend(self.to_attributes());
    }
}

fn digest_value(digest: &Option<Digest>) -> Value {
    digest
        .as_ref()
        .map_or(Value::Null, |d| Value::String(d.to_hex()))
}

/// Output of signing one graph.
///
/// Holds one [`VertexSignature`] per vertex and the graph signature: the
/// Merkle root over the hashes of all sink vertices, `None` for an empty
/// graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSet<L: Ord> {
    /// Whole-graph signature.
    pub signature: Option<Digest>,
    /// Per-vertex records, keyed by label.
    pub vertices: BTreeMap<L, VertexSignature>,
}

impl<L: Ord> SignatureSet<L> {
    /// Assemble a signature set.
    pub fn new(signature: Option<Digest>, vertices: BTreeMap<L, VertexSignature>) -> Self {
        Self {
            signature,
            vertices,
        }
    }

    /// The signature set of an empty graph.
    pub fn empty() -> Self {
        Self::new(None, BTreeMap::new())
    }

    /// The whole-graph signature.
    pub fn signature(&self) -> Option<&Digest> {
        self.signature.as_ref()
    }

    /// The record of one vertex.
    pub fn get(&self, label: &L) -> Option<&VertexSignature> {
        self.vertices.get(label)
    }

    /// Number of vertex records.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if there are no vertex records.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex records in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &VertexSignature)> {
        self.vertices.iter()
    }
}

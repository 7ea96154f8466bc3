//! Capabilities the signer needs from caller-owned graph data.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use blockdag_types::Attributes;

/// Vertex label: any ordered, cloneable key.
///
/// Ordering is only used for lookups and for sorting diff output; it never
/// influences a digest.
pub trait Label: Ord + Clone + Debug {}

impl<T: Ord + Clone + Debug> Label for T {}

/// Keyed, read-only access to vertex attributes.
pub trait VertexSet<L> {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// All vertex labels, in any order.
    fn labels(&self) -> Vec<L>;

    /// Attributes of the vertex labelled `label`.
    fn attributes(&self, label: &L) -> Option<&Attributes>;
}

/// Vertex access that also allows in-place attribute mutation.
pub trait VertexSetMut<L>: VertexSet<L> {
    fn attributes_mut(&mut self, label: &L) -> Option<&mut Attributes>;
}

impl<L: Ord + Clone> VertexSet<L> for BTreeMap<L, Attributes> {
    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn labels(&self) -> Vec<L> {
        self.keys().cloned().collect()
    }

    fn attributes(&self, label: &L) -> Option<&Attributes> {
        self.get(label)
    }
}

impl<L: Ord + Clone> VertexSetMut<L> for BTreeMap<L, Attributes> {
    fn attributes_mut(&mut self, label: &L) -> Option<&mut Attributes> {
        self.get_mut(label)
    }
}

impl<L: Eq + Hash + Clone, S: BuildHasher> VertexSet<L> for HashMap<L, Attributes, S> {
    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn labels(&self) -> Vec<L> {
        self.keys().cloned().collect()
    }

    fn attributes(&self, label: &L) -> Option<&Attributes> {
        self.get(label)
    }
}

impl<L: Eq + Hash + Clone, S: BuildHasher> VertexSetMut<L> for HashMap<L, Attributes, S> {
    fn attributes_mut(&mut self, label: &L) -> Option<&mut Attributes> {
        self.get_mut(label)
    }
}

/// Inclusion list of attribute keys that participate in hashing.
pub trait FieldFilter {
    fn includes(&self, field: &str) -> bool;
}

impl FieldFilter for BTreeSet<String> {
    fn includes(&self, field: &str) -> bool {
        self.contains(field)
    }
}

impl<S: BuildHasher> FieldFilter for HashSet<String, S> {
    fn includes(&self, field: &str) -> bool {
        self.contains(field)
    }
}

impl FieldFilter for [String] {
    fn includes(&self, field: &str) -> bool {
        self.iter().any(|f| f == field)
    }
}

impl FieldFilter for Vec<String> {
    fn includes(&self, field: &str) -> bool {
        self.as_slice().includes(field)
    }
}

impl FieldFilter for [&str] {
    fn includes(&self, field: &str) -> bool {
        self.iter().any(|f| *f == field)
    }
}

impl<const N: usize> FieldFilter for [&str; N] {
    fn includes(&self, field: &str) -> bool {
        self.as_slice().includes(field)
    }
}

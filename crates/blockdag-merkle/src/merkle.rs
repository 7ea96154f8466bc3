use blockdag_types::Digest;

use crate::canonical::CanonicalBytes;
use crate::hasher::HashFunction;

/// Binary Merkle tree over digest-sorted leaves.
///
/// Every input value is hashed into a leaf and the leaves are sorted by byte
/// value, so the root is independent of input order. Levels are folded
/// pairwise with `hash(left || right)`; an odd trailing node is promoted to
/// the next level unchanged. Equal leaves are kept, never deduplicated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    /// Level 0 = sorted leaves, last level = root.
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a tree by hashing the canonical bytes of each value into a leaf.
    pub fn from_values<I, T, H>(values: I, hasher: &H) -> Self
    where
        I: IntoIterator<Item = T>,
        T: CanonicalBytes,
        H: HashFunction + ?Sized,
    {
        let leaves = values
            .into_iter()
            .map(|value| hasher.hash(&value.canonical_bytes()))
            .collect();
        Self::from_leaf_digests(leaves, hasher)
    }

    /// Build a tree from already-hashed leaves.
    ///
    /// An empty list produces no root. A single leaf is its own root.
    pub fn from_leaf_digests<H>(mut leaves: Vec<Digest>, hasher: &H) -> Self
    where
        H: HashFunction + ?Sized,
    {
        if leaves.is_empty() {
            return Self { levels: vec![] };
        }

        leaves.sort_unstable();
        let mut levels = vec![leaves];

        while let Some(current) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<Digest> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right, hasher),
                    // Odd node: promoted as-is
                    [single] => single.clone(),
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            levels.push(next);
        }

        Self { levels }
    }

    /// The root digest, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Digest> {
        self.levels.last().and_then(|level| level.first())
    }

    /// Consume the tree, keeping only its root.
    pub fn into_root(mut self) -> Option<Digest> {
        self.levels.pop().and_then(|level| level.into_iter().next())
    }

    /// The sorted leaf digests.
    pub fn leaves(&self) -> &[Digest] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Number of folding rounds between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }
}

/// Fold `values` into a single Merkle root.
///
/// Returns `None` for empty input. This is the combination rule used for
/// vertex data, vertex hashes and the whole-graph signature.
pub fn combine<I, T, H>(values: I, hasher: &H) -> Option<Digest>
where
    I: IntoIterator<Item = T>,
    T: CanonicalBytes,
    H: HashFunction + ?Sized,
{
    MerkleTree::from_values(values, hasher).into_root()
}

fn hash_pair<H: HashFunction + ?Sized>(left: &Digest, right: &Digest, hasher: &H) -> Digest {
    let mut buf = Vec::with_capacity(left.len() + right.len());
    buf.extend_from_slice(left.as_bytes());
    buf.extend_from_slice(right.as_bytes());
    hasher.hash(&buf)
}

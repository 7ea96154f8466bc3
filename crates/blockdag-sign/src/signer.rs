//! Kahn-order DAG signing.
//!
//! Each vertex is hashed once all of its predecessors have been hashed:
//!
//! 1. `data_hash` = Merkle root of the vertex's selected attribute values.
//! 2. `hash` = Merkle root of `data_hash` (when present) together with one
//!    entry per incoming edge holding the predecessor's `hash`.
//!
//! The graph signature is the Merkle root of the `hash` of every sink. Leaves
//! are sorted before folding, so the ready-set order never leaks into a
//! digest.
//!
//! # Invariants
//!
//! - Edge endpoints are validated before any vertex is hashed.
//! - A cycle leaves vertices unvisited and fails the whole call.
//! - Append and visitor modes only touch caller data through
//!   [`VertexSetMut`].

use std::collections::BTreeMap;

use tracing::{debug, trace};

use blockdag_merkle::{combine, HashFunction};
use blockdag_types::{Attributes, Digest};

use crate::config::SignerConfig;
use crate::error::{Endpoint, SignError, SignResult};
use crate::graph::{FieldFilter, Label, VertexSet, VertexSetMut};
use crate::record::{SignatureSet, VertexSignature};

/// Signs DAGs with a fixed hash function and attribute filter.
#[derive(Clone, Copy)]
pub struct DagSigner<'a> {
    hasher: &'a dyn HashFunction,
    fields: Option<&'a dyn FieldFilter>,
}

impl<'a> DagSigner<'a> {
    /// A signer that hashes every attribute of every vertex.
    pub fn new(hasher: &'a dyn HashFunction) -> Self {
        Self {
            hasher,
            fields: None,
        }
    }

    /// Only hash attributes whose key passes `fields`.
    pub fn with_fields(mut self, fields: &'a dyn FieldFilter) -> Self {
        self.fields = Some(fields);
        self
    }

    /// A signer using the hash function and fields of `config`.
    ///
    /// The append flag is not part of the signer; see [`sign_with_config`].
    pub fn from_config(config: &'a SignerConfig) -> Self {
        let signer = Self::new(&config.hash);
        match &config.data_fields {
            Some(fields) => signer.with_fields(fields),
            None => signer,
        }
    }

    /// Merkle root of the selected attribute values of one vertex.
    pub fn data_hash(&self, attributes: &Attributes) -> Option<Digest> {
        let selected = attributes
            .iter()
            .filter(|(key, _)| self.selects(key))
            .map(|(_, value)| value);
        combine(selected, self.hasher)
    }

    /// Sign a graph without touching the caller's vertices.
    pub fn sign<'e, L, V, E>(&self, vertices: &V, edges: E) -> SignResult<SignatureSet<L>>
    where
        L: Label + 'e,
        V: VertexSet<L> + ?Sized,
        E: IntoIterator<Item = &'e (L, L)>,
    {
        let plan = TraversalPlan::build(vertices.labels(), edges)?;
        self.traverse(plan, |label| {
            let attributes = vertices
                .attributes(label)
                .ok_or_else(|| SignError::MissingVertex(format!("{label:?}")))?;
            Ok(self.data_hash(attributes))
        })
    }

    /// Sign a graph, then merge every vertex's record into its attributes.
    ///
    /// Existing `data_hash`, `parent_hashes` and `hash` attributes are
    /// overwritten. The graph signature is only returned, never stored on a
    /// vertex. On error the vertices are left unchanged.
    pub fn sign_and_append<'e, L, V, E>(
        &self,
        vertices: &mut V,
        edges: E,
    ) -> SignResult<SignatureSet<L>>
    where
        L: Label + 'e,
        V: VertexSetMut<L> + ?Sized,
        E: IntoIterator<Item = &'e (L, L)>,
    {
        let signatures = self.sign(&*vertices, edges)?;
        for (label, record) in signatures.iter() {
            if let Some(attributes) = vertices.attributes_mut(label) {
                record.merge_into(attributes);
            }
        }
        debug!(vertices = signatures.len(), "appended signature records");
        Ok(signatures)
    }

    /// Sign a graph, calling `visitor` on each vertex as it is taken from
    /// the ready set and before its data hash is computed.
    ///
    /// Changes the visitor makes are hashed and remain in the caller's
    /// vertices. All of a vertex's predecessors have been visited before
    /// the vertex itself. A graph that cannot be fully traversed is
    /// rejected before the visitor runs.
    pub fn sign_with_visitor<'e, L, V, E, F>(
        &self,
        vertices: &mut V,
        edges: E,
        mut visitor: F,
    ) -> SignResult<SignatureSet<L>>
    where
        L: Label + 'e,
        V: VertexSetMut<L> + ?Sized,
        E: IntoIterator<Item = &'e (L, L)>,
        F: FnMut(&L, &mut Attributes),
    {
        let plan = TraversalPlan::build(vertices.labels(), edges)?;
        plan.check_acyclic()?;
        self.traverse(plan, |label| {
            let attributes = vertices
                .attributes_mut(label)
                .ok_or_else(|| SignError::MissingVertex(format!("{label:?}")))?;
            visitor(label, attributes);
            Ok(self.data_hash(attributes))
        })
    }

    fn selects(&self, key: &str) -> bool {
        self.fields.map_or(true, |fields| fields.includes(key))
    }

    fn traverse<L, D>(&self, plan: TraversalPlan<L>, mut data_hash_of: D) -> SignResult<SignatureSet<L>>
    where
        L: Label,
        D: FnMut(&L) -> SignResult<Option<Digest>>,
    {
        let TraversalPlan {
            labels,
            mut in_degree,
            successors,
        } = plan;
        let total = labels.len();

        // Captured before traversal mutates in-degrees.
        let sinks: Vec<usize> = (0..total).filter(|&v| successors[v].is_empty()).collect();

        let mut pending: Vec<Vec<Option<Digest>>> = vec![Vec::new(); total];
        let mut records: Vec<Option<VertexSignature>> = vec![None; total];
        let mut ready: Vec<usize> = (0..total).filter(|&v| in_degree[v] == 0).collect();
        let mut visited = 0;

        while let Some(current) = ready.pop() {
            let data_hash = data_hash_of(&labels[current])?;
            let parent_hashes = std::mem::take(&mut pending[current]);
            let hash = combine(
                data_hash
                    .iter()
                    .map(Some)
                    .chain(parent_hashes.iter().map(Option::as_ref)),
                self.hasher,
            );
            trace!(
                vertex = ?labels[current],
                parents = parent_hashes.len(),
                has_data = data_hash.is_some(),
                "signed vertex"
            );

            for &next in &successors[current] {
                pending[next].push(hash.clone());
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(next);
                }
            }

            records[current] = Some(VertexSignature {
                data_hash,
                parent_hashes,
                hash,
            });
            visited += 1;
        }

        if visited != total {
            return Err(SignError::Untraversed { visited, total });
        }

        let signature = combine(
            sinks
                .iter()
                .map(|&v| records[v].as_ref().and_then(|r| r.hash.as_ref())),
            self.hasher,
        );
        let short = signature.as_ref().map(Digest::short_hex).unwrap_or_default();
        debug!(vertices = total, sinks = sinks.len(), signature = %short, "signed DAG");

        let vertices: BTreeMap<L, VertexSignature> = labels
            .into_iter()
            .zip(records)
            .filter_map(|(label, record)| record.map(|r| (label, r)))
            .collect();
        Ok(SignatureSet::new(signature, vertices))
    }
}

/// Index-based adjacency built from validated edges.
struct TraversalPlan<L> {
    labels: Vec<L>,
    in_degree: Vec<usize>,
    successors: Vec<Vec<usize>>,
}

impl<L: Label> TraversalPlan<L> {
    fn build<'e, E>(labels: Vec<L>, edges: E) -> SignResult<Self>
    where
        L: 'e,
        E: IntoIterator<Item = &'e (L, L)>,
    {
        let (in_degree, successors) = {
            let index: BTreeMap<&L, usize> =
                labels.iter().enumerate().map(|(i, l)| (l, i)).collect();
            let mut in_degree = vec![0; labels.len()];
            let mut successors = vec![Vec::new(); labels.len()];

            for (position, (source, destination)) in edges.into_iter().enumerate() {
                let src = lookup(&index, position, Endpoint::Source, source)?;
                let dst = lookup(&index, position, Endpoint::Destination, destination)?;
                in_degree[dst] += 1;
                successors[src].push(dst);
            }
            (in_degree, successors)
        };

        Ok(Self {
            labels,
            in_degree,
            successors,
        })
    }

    /// Run Kahn's algorithm over indices only, without hashing.
    fn check_acyclic(&self) -> SignResult<()> {
        let total = self.labels.len();
        let mut in_degree = self.in_degree.clone();
        let mut ready: Vec<usize> = (0..total).filter(|&v| in_degree[v] == 0).collect();
        let mut visited = 0;

        while let Some(current) = ready.pop() {
            visited += 1;
            for &next in &self.successors[current] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(next);
                }
            }
        }

        if visited != total {
            return Err(SignError::Untraversed { visited, total });
        }
        Ok(())
    }
}

fn lookup<L: Label>(
    index: &BTreeMap<&L, usize>,
    edge: usize,
    endpoint: Endpoint,
    label: &L,
) -> SignResult<usize> {
    index
        .get(label)
        .copied()
        .ok_or_else(|| SignError::MissingEndpoint {
            edge,
            endpoint,
            label: format!("{label:?}"),
        })
}

/// Sign `vertices` and `edges` with `hasher`, hashing only the attributes
/// selected by `data_fields` (all attributes when `None`).
pub fn sign<'e, L, V, E>(
    vertices: &V,
    edges: E,
    hasher: &dyn HashFunction,
    data_fields: Option<&dyn FieldFilter>,
) -> SignResult<SignatureSet<L>>
where
    L: Label + 'e,
    V: VertexSet<L> + ?Sized,
    E: IntoIterator<Item = &'e (L, L)>,
{
    let signer = DagSigner::new(hasher);
    match data_fields {
        Some(fields) => signer.with_fields(fields).sign(vertices, edges),
        None => signer.sign(vertices, edges),
    }
}

/// Sign according to `config`, appending records to `vertices` when
/// `config.append` is set.
pub fn sign_with_config<'e, L, V, E>(
    config: &SignerConfig,
    vertices: &mut V,
    edges: E,
) -> SignResult<SignatureSet<L>>
where
    L: Label + 'e,
    V: VertexSetMut<L> + ?Sized,
    E: IntoIterator<Item = &'e (L, L)>,
{
    let signer = DagSigner::from_config(config);
    if config.append {
        signer.sign_and_append(vertices, edges)
    } else {
        signer.sign(&*vertices, edges)
    }
}

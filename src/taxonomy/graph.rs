// src/taxonomy/graph.rs
//! The `Taxonomy` arena: vertex, edge and half-edge storage plus the build
//! and attribute-assignment API.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::cancel::{CancelHandle, Checkpoint};
use super::half_edge::{Edge, EdgeMut, EdgeRecord, EdgeWeights, HalfEdgeRecord};
use super::list::{Edges, Vertices};
use super::ring::{self, Arcs};
use super::types::{EdgeIdx, OrientedEdgeType, VertexId, VertexIdx};
use super::vertex::{Vertex, VertexCache, VertexMut, VertexRecord};
use crate::config::TaxonomyConfig;
use crate::error::{Result, TaxonomyError};

/// A multi-rooted is-a DAG stored as a half-edge structure.
///
/// Vertices are inserted parents-first with [`Taxonomy::add_vertex`]. Read
/// access goes through borrowed views ([`Vertex`], [`Edge`]), so a shared
/// `&Taxonomy` can be queried from several threads at once.
pub struct Taxonomy {
    pub(crate) vertices: Vec<VertexRecord>,
    pub(crate) edges: Vec<EdgeRecord>,
    pub(crate) half_edges: Vec<HalfEdgeRecord>,
    index: HashMap<VertexId, VertexIdx>,
    config: TaxonomyConfig,
    cancel: CancelHandle,
    traversals: AtomicUsize,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl Taxonomy {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TaxonomyConfig::default())
    }

    #[must_use]
    pub fn with_config(config: TaxonomyConfig) -> Self {
        let capacity = config.initial_capacity;
        Self {
            vertices: Vec::with_capacity(capacity),
            edges: Vec::with_capacity(capacity),
            half_edges: Vec::with_capacity(capacity * 2),
            index: HashMap::with_capacity(capacity),
            config,
            cancel: CancelHandle::new(),
            traversals: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TaxonomyConfig {
        &self.config
    }

    /// Inserts vertex `id` below every vertex in `parents`.
    ///
    /// One edge is created per parent id, so a repeated parent id yields
    /// parallel edges. Every check runs before any mutation: on error the
    /// taxonomy is left exactly as it was.
    ///
    /// # Errors
    /// Returns `DuplicateId` if `id` is already present and `MissingParent`
    /// if any parent id is absent.
    pub fn add_vertex(&mut self, id: VertexId, parents: &[VertexId]) -> Result<Vertex<'_>> {
        if self.index.contains_key(&id) {
            return Err(TaxonomyError::DuplicateId(id));
        }
        let parent_handles = parents
            .iter()
            .map(|&parent| {
                self.index
                    .get(&parent)
                    .copied()
                    .ok_or(TaxonomyError::MissingParent { vertex: id, parent })
            })
            .collect::<Result<Vec<_>>>()?;

        let child = VertexIdx(self.vertices.len());
        self.vertices.push(VertexRecord::new(id));
        self.index.insert(id, child);

        for parent in parent_handles {
            self.link(child, parent);
        }

        tracing::trace!(id, parents = parents.len(), "vertex added");
        Ok(Vertex::new(self, child))
    }

    /// Creates the edge `child -> parent` and threads both halves into the
    /// two rings.
    #[allow(clippy::indexing_slicing)] // Guarded: both handles were just resolved
    fn link(&mut self, child: VertexIdx, parent: VertexIdx) {
        let edge = EdgeIdx(self.edges.len());
        self.edges.push(EdgeRecord::default());
        self.half_edges.extend(HalfEdgeRecord::pair(child, parent));

        // The direct half targets the parent; its opposite joins the child's ring.
        ring::append_incoming(&mut self.vertices[parent.0], &mut self.half_edges, edge.direct());
        ring::append_incoming(&mut self.vertices[child.0], &mut self.half_edges, edge.inverse());
    }

    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<Vertex<'_>> {
        self.index.get(&id).map(|&idx| Vertex::new(self, idx))
    }

    #[must_use]
    pub fn vertex_at(&self, index: VertexIdx) -> Option<Vertex<'_>> {
        (index.0 < self.vertices.len()).then(|| Vertex::new(self, index))
    }

    #[must_use]
    pub fn edge(&self, index: EdgeIdx) -> Option<Edge<'_>> {
        (index.0 < self.edges.len()).then(|| Edge::new(self, index))
    }

    /// Read-only view over every vertex, in insertion order.
    #[must_use]
    pub fn vertices(&self) -> Vertices<'_> {
        Vertices::new(self)
    }

    #[must_use]
    pub fn edges(&self) -> Edges<'_> {
        Edges::new(self)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn index_of(&self, id: VertexId) -> Option<VertexIdx> {
        self.index.get(&id).copied()
    }

    // --- Attribute writes ---

    #[must_use]
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<VertexMut<'_>> {
        let idx = self.index.get(&id)?;
        self.vertices.get_mut(idx.0).map(VertexMut::new)
    }

    #[must_use]
    pub fn edge_mut(&mut self, index: EdgeIdx) -> Option<EdgeMut<'_>> {
        let record = self.edges.get_mut(index.0)?;
        let start = index.direct().0;
        let [direct, inverse] = self.half_edges.get_mut(start..start + 2)? else {
            return None;
        };
        Some(EdgeMut::new(record, direct, inverse))
    }

    /// Evaluates `f` on every vertex, then stores the results as IC values.
    ///
    /// # Errors
    /// Propagates the first error returned by `f`; nothing is written then.
    pub fn assign_ic_values<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut(Vertex<'_>) -> Result<f64>,
    {
        let values = self.evaluate_vertices(f)?;
        for (record, value) in self.vertices.iter_mut().zip(values) {
            record.ic_value = value;
        }
        Ok(())
    }

    /// Evaluates `f` on every vertex, then stores the results as probabilities.
    ///
    /// # Errors
    /// Propagates the first error returned by `f`; nothing is written then.
    pub fn assign_probabilities<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut(Vertex<'_>) -> Result<f64>,
    {
        let values = self.evaluate_vertices(f)?;
        for (record, value) in self.vertices.iter_mut().zip(values) {
            record.probability = value;
        }
        Ok(())
    }

    /// Evaluates `f` on every edge, then stores edge and half-edge weights.
    ///
    /// # Errors
    /// Propagates the first error returned by `f`; nothing is written then.
    pub fn assign_edge_weights<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(Edge<'_>) -> Result<EdgeWeights>,
    {
        let weights = (0..self.edges.len())
            .map(|e| f(Edge::new(self, EdgeIdx(e))))
            .collect::<Result<Vec<_>>>()?;

        for (e, w) in weights.into_iter().enumerate() {
            if let Some(mut edge) = self.edge_mut(EdgeIdx(e)) {
                edge.set_weight(w.weight)
                    .set_cond_probability(w.cond_probability)
                    .set_direct_weight(w.direct_weight)
                    .set_inverse_weight(w.inverse_weight);
            }
        }
        Ok(())
    }

    fn evaluate_vertices<F>(&self, mut f: F) -> Result<Vec<f64>>
    where
        F: FnMut(Vertex<'_>) -> Result<f64>,
    {
        (0..self.vertices.len())
            .map(|i| f(Vertex::new(self, VertexIdx(i))))
            .collect()
    }

    // --- Lifecycle ---

    /// Forgets every cached depth and count so they are recomputed on demand.
    pub fn reset_cached_attributes(&mut self) {
        for record in &mut self.vertices {
            record.cache = VertexCache::default();
        }
        tracing::debug!(vertices = self.vertices.len(), "cached attributes reset");
    }

    /// Drops every vertex and edge. The cancellation flag and the traversal
    /// counter are kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.half_edges.clear();
        self.index.clear();
        tracing::debug!("taxonomy cleared");
    }

    // --- Cancellation and instrumentation ---

    /// Handle that interrupts traversals running on this taxonomy.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Number of traversals (BFS, depth or Dijkstra runs) started so far.
    #[must_use]
    pub fn traversal_count(&self) -> usize {
        self.traversals.load(Ordering::Relaxed)
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint<'_> {
        Checkpoint::new(&self.cancel, &self.traversals, self.config.cancel_check_interval)
    }

    // --- Ring access ---

    pub(crate) fn arcs(&self, vertex: VertexIdx) -> Arcs<'_> {
        let first = self.vertices.get(vertex.0).and_then(|v| v.first_out);
        Arcs::new(&self.half_edges, first)
    }

    pub(crate) fn parent_handles(&self, vertex: VertexIdx) -> impl Iterator<Item = VertexIdx> + '_ {
        self.arcs(vertex).targets(OrientedEdgeType::SubClassOf)
    }

    pub(crate) fn child_handles(&self, vertex: VertexIdx) -> impl Iterator<Item = VertexIdx> + '_ {
        self.arcs(vertex).targets(OrientedEdgeType::SuperClassOf)
    }
}

impl fmt::Debug for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Taxonomy")
            .field("vertices", &self.vertices.len())
            .field("edges", &self.edges.len())
            .field("config", &self.config)
            .field("traversals", &self.traversal_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::VertexSet;

    #[test]
    fn test_add_vertex_links_both_rings() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        assert_eq!(t.vertex_count(), 2);
        assert_eq!(t.edge_count(), 1);
        assert_eq!(t.half_edges.len(), 2);

        let edge = t.edges().get(0).unwrap();
        assert_eq!(edge.child().id(), 2);
        assert_eq!(edge.parent().id(), 1);
        assert_eq!(edge.direct().kind(), OrientedEdgeType::SubClassOf);
        assert_eq!(edge.direct().source().id(), 2);
        assert_eq!(edge.inverse().source().id(), 1);
    }

    #[test]
    fn test_duplicate_id_leaves_taxonomy_unchanged() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        let err = t.add_vertex(1, &[2]).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateId(1)));
        assert_eq!(t.vertex_count(), 2);
        assert_eq!(t.edge_count(), 1);
        assert!(t.vertex(1).unwrap().is_root());
    }

    #[test]
    fn test_missing_parent_checked_before_mutation() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        let err = t.add_vertex(5, &[1, 99]).unwrap_err();
        assert!(matches!(
            err,
            TaxonomyError::MissingParent { vertex: 5, parent: 99 }
        ));
        assert!(t.vertex(5).is_none());
        assert_eq!(t.edge_count(), 0);
        assert!(t.vertex(1).unwrap().is_leaf());
    }

    #[test]
    fn test_repeated_parent_creates_parallel_edges() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1, 1]).unwrap();
        let v2 = t.vertex(2).unwrap();
        assert_eq!(v2.parent_count(), 2);
        assert_eq!(v2.parents().len(), 1);
    }

    #[test]
    fn test_edge_mut_updates_both_halves() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.edge_mut(EdgeIdx(0))
            .unwrap()
            .set_weight(0.5)
            .set_direct_weight(1.5)
            .set_inverse_weight(2.5);
        let edge = t.edge(EdgeIdx(0)).unwrap();
        assert_eq!(edge.weight(), 0.5);
        assert_eq!(edge.direct().weight(), 1.5);
        assert_eq!(edge.inverse().weight(), 2.5);
        assert!(t.edge_mut(EdgeIdx(1)).is_none());
    }

    #[test]
    fn test_assign_ic_values_is_all_or_nothing() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        let result = t.assign_ic_values(|v| {
            if v.id() == 2 {
                Err(TaxonomyError::UnknownVertex(2))
            } else {
                Ok(3.0)
            }
        });
        assert!(result.is_err());
        assert_eq!(t.vertex(1).unwrap().ic_value(), 0.0);

        t.assign_ic_values(|v| Ok(f64::from(v.id()))).unwrap();
        assert_eq!(t.vertex(2).unwrap().ic_value(), 2.0);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.clear();
        assert_eq!(t.vertex_count(), 0);
        assert_eq!(t.edge_count(), 0);
        assert!(t.vertex(1).is_none());
        // Ids are free again after clearing.
        t.add_vertex(1, &[]).unwrap();
        assert_eq!(t.vertex_count(), 1);
    }

    #[test]
    fn test_reset_cached_attributes_forces_recompute() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[2]).unwrap();
        t.vertex(3).unwrap().depth_min().unwrap();
        let after_first = t.traversal_count();
        t.vertex(3).unwrap().depth_min().unwrap();
        assert_eq!(t.traversal_count(), after_first);

        t.reset_cached_attributes();
        t.vertex(3).unwrap().depth_min().unwrap();
        assert!(t.traversal_count() > after_first);
    }
}

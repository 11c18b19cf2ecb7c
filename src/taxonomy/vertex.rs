// src/taxonomy/vertex.rs
//! Vertex records, their lazily cached attributes, and the `Vertex` view.
//!
//! Structural queries (parents, children, ancestors, depths, distances) are
//! answered by walking the half-edge ring; nothing about a vertex's
//! neighbourhood is stored besides its first and last outgoing arcs.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use super::depth::{self, DepthKind};
use super::distance::{self, DistanceField, EdgeWeighting};
use super::graph::Taxonomy;
use super::half_edge::HalfEdge;
use super::list::VertexList;
use super::ring::Arcs;
use super::traversal;
use super::types::{HalfEdgeIdx, VertexId, VertexIdx};
use crate::error::Result;

pub(crate) struct VertexRecord {
    pub(crate) id: VertexId,
    pub(crate) first_out: Option<HalfEdgeIdx>,
    pub(crate) last_out: Option<HalfEdgeIdx>,
    pub(crate) ic_value: f64,
    pub(crate) probability: f64,
    pub(crate) string_tag: String,
    pub(crate) tag: Option<Box<dyn Any + Send + Sync>>,
    pub(crate) cache: VertexCache,
}

impl VertexRecord {
    pub(crate) fn new(id: VertexId) -> Self {
        Self {
            id,
            first_out: None,
            last_out: None,
            ic_value: 0.0,
            probability: 0.0,
            string_tag: String::new(),
            tag: None,
            cache: VertexCache::default(),
        }
    }
}

/// Lazily computed attributes. Each cell is filled at most once until the
/// owning taxonomy resets its caches.
#[derive(Debug, Default)]
pub(crate) struct VertexCache {
    pub(crate) depth_min: OnceLock<u32>,
    pub(crate) depth_max: OnceLock<u32>,
    pub(crate) ancestor_count: OnceLock<usize>,
    pub(crate) hyponym_count: OnceLock<usize>,
    pub(crate) leaf_count: OnceLock<usize>,
}

impl VertexCache {
    pub(crate) fn is_warm(&self) -> bool {
        self.depth_min.get().is_some()
            && self.depth_max.get().is_some()
            && self.hyponym_count.get().is_some()
            && self.leaf_count.get().is_some()
    }
}

/// Returns the cached value, computing and storing it on first use.
///
/// A failed computation leaves the cell empty.
fn cached<T: Copy>(cell: &OnceLock<T>, compute: impl FnOnce() -> Result<T>) -> Result<T> {
    if let Some(value) = cell.get() {
        return Ok(*value);
    }
    let value = compute()?;
    Ok(*cell.get_or_init(|| value))
}

/// Read view over one vertex of a taxonomy.
#[derive(Clone, Copy)]
pub struct Vertex<'a> {
    taxonomy: &'a Taxonomy,
    index: VertexIdx,
}

impl<'a> Vertex<'a> {
    pub(crate) fn new(taxonomy: &'a Taxonomy, index: VertexIdx) -> Self {
        Self { taxonomy, index }
    }

    #[allow(clippy::indexing_slicing)] // Handles come from the same arena
    fn record(self) -> &'a VertexRecord {
        &self.taxonomy.vertices[self.index.0]
    }

    #[must_use]
    pub fn id(self) -> VertexId {
        self.record().id
    }

    #[must_use]
    pub fn index(self) -> VertexIdx {
        self.index
    }

    #[must_use]
    pub fn taxonomy(self) -> &'a Taxonomy {
        self.taxonomy
    }

    // --- Adjacency ring ---

    /// Every outgoing arc, parents and children alike, in insertion order.
    #[must_use]
    pub fn arcs(self) -> Arcs<'a> {
        self.taxonomy.arcs(self.index)
    }

    /// Entry point into the adjacency ring; `None` for an isolated vertex.
    #[must_use]
    pub fn first_out_arc(self) -> Option<HalfEdge<'a>> {
        self.record()
            .first_out
            .map(|h| HalfEdge::new(self.taxonomy, h))
    }

    #[must_use]
    pub fn is_root(self) -> bool {
        self.parent_count() == 0
    }

    #[must_use]
    pub fn is_leaf(self) -> bool {
        self.children_count() == 0
    }

    #[must_use]
    pub fn parent_count(self) -> usize {
        self.taxonomy.parent_handles(self.index).count()
    }

    #[must_use]
    pub fn children_count(self) -> usize {
        self.taxonomy.child_handles(self.index).count()
    }

    #[must_use]
    pub fn parents(self) -> VertexList<'a> {
        VertexList::from_handles(self.taxonomy, self.taxonomy.parent_handles(self.index))
    }

    #[must_use]
    pub fn children(self) -> VertexList<'a> {
        VertexList::from_handles(self.taxonomy, self.taxonomy.child_handles(self.index))
    }

    /// Parents and children together.
    #[must_use]
    pub fn neighbours(self) -> VertexList<'a> {
        let half_edges = &self.taxonomy.half_edges;
        let targets = self
            .arcs()
            .filter_map(|h| half_edges.get(h.0).map(|arc| arc.target));
        VertexList::from_handles(self.taxonomy, targets)
    }

    /// The outgoing arc pointing to `target`, if the two are adjacent.
    /// `None` when `target` belongs to another taxonomy.
    #[must_use]
    pub fn incident_edge(self, target: Vertex<'_>) -> Option<HalfEdge<'a>> {
        if !std::ptr::eq(self.taxonomy, target.taxonomy) {
            return None;
        }
        let half_edges = &self.taxonomy.half_edges;
        self.arcs()
            .find(|h| half_edges.get(h.0).is_some_and(|arc| arc.target == target.index))
            .map(|h| HalfEdge::new(self.taxonomy, h))
    }

    // --- Hierarchy traversals ---

    /// Every vertex reachable through parent arcs, in breadth-first order.
    ///
    /// # Errors
    /// Returns `Interrupted` if cancellation is requested mid-traversal.
    pub fn ancestors(self, include_self: bool) -> Result<VertexList<'a>> {
        let order = traversal::ancestor_order(self.taxonomy, self.index, include_self)?;
        Ok(VertexList::from_handles(self.taxonomy, order))
    }

    /// Every vertex reachable through child arcs, in breadth-first order.
    ///
    /// # Errors
    /// Returns `Interrupted` if cancellation is requested mid-traversal.
    pub fn hyponyms(self, include_self: bool) -> Result<VertexList<'a>> {
        let order = traversal::descendant_order(self.taxonomy, self.index, include_self)?;
        Ok(VertexList::from_handles(self.taxonomy, order))
    }

    /// Leaves among the descendants; `inclusive` admits this vertex itself.
    ///
    /// # Errors
    /// Returns `Interrupted` if cancellation is requested mid-traversal.
    pub fn subsumed_leaves(self, inclusive: bool) -> Result<VertexList<'a>> {
        let leaves = traversal::subsumed_leaves(self.taxonomy, self.index, inclusive)?;
        Ok(VertexList::from_handles(self.taxonomy, leaves))
    }

    // --- Cached attributes ---

    /// Length of the shortest ascending path to a root.
    ///
    /// # Errors
    /// Returns `Interrupted` if cancellation is requested mid-traversal.
    pub fn depth_min(self) -> Result<u32> {
        cached(&self.record().cache.depth_min, || {
            depth::ascending_depth(self.taxonomy, self.index, DepthKind::Shortest)
        })
    }

    /// Length of the longest ascending path to a root.
    ///
    /// # Errors
    /// Returns `Interrupted` if cancellation is requested mid-traversal.
    pub fn depth_max(self) -> Result<u32> {
        cached(&self.record().cache.depth_max, || {
            depth::ascending_depth(self.taxonomy, self.index, DepthKind::Longest)
        })
    }

    /// # Errors
    /// See [`Self::depth_min`].
    pub fn depth_min_base1(self) -> Result<u32> {
        Ok(1 + self.depth_min()?)
    }

    /// # Errors
    /// See [`Self::depth_max`].
    pub fn depth_max_base1(self) -> Result<u32> {
        Ok(1 + self.depth_max()?)
    }

    /// # Errors
    /// Returns `Interrupted` if cancellation is requested mid-traversal.
    pub fn non_inclusive_ancestor_count(self) -> Result<usize> {
        cached(&self.record().cache.ancestor_count, || {
            traversal::ancestor_order(self.taxonomy, self.index, false).map(|a| a.len())
        })
    }

    /// # Errors
    /// Returns `Interrupted` if cancellation is requested mid-traversal.
    pub fn non_inclusive_hyponym_count(self) -> Result<usize> {
        cached(&self.record().cache.hyponym_count, || {
            traversal::descendant_order(self.taxonomy, self.index, false).map(|d| d.len())
        })
    }

    /// # Errors
    /// Returns `Interrupted` if cancellation is requested mid-traversal.
    pub fn non_inclusive_subsumed_leaf_count(self) -> Result<usize> {
        cached(&self.record().cache.leaf_count, || {
            traversal::subsumed_leaves(self.taxonomy, self.index, false).map(|l| l.len())
        })
    }

    /// # Errors
    /// See [`Self::non_inclusive_subsumed_leaf_count`].
    pub fn inclusive_subsumed_leaf_count(self) -> Result<usize> {
        let count = self.non_inclusive_subsumed_leaf_count()?;
        Ok(if self.is_leaf() { count + 1 } else { count })
    }

    // --- Plain attributes ---

    #[must_use]
    pub fn ic_value(self) -> f64 {
        self.record().ic_value
    }

    #[must_use]
    pub fn probability(self) -> f64 {
        self.record().probability
    }

    #[must_use]
    pub fn string_tag(self) -> &'a str {
        &self.record().string_tag
    }

    /// The user tag, if one of type `T` is attached.
    #[must_use]
    pub fn tag<T: Any>(self) -> Option<&'a T> {
        self.record().tag.as_deref().and_then(|t| t.downcast_ref::<T>())
    }

    #[must_use]
    pub fn parent_string_tags(self) -> Vec<&'a str> {
        self.taxonomy
            .parent_handles(self.index)
            .map(|p| Vertex::new(self.taxonomy, p).string_tag())
            .collect()
    }

    // --- Distances ---

    /// Single-source shortest distances from this vertex to every vertex,
    /// walking parent and child arcs alike.
    ///
    /// `weighted` uses each edge's symmetric weight, otherwise every edge
    /// counts 1.
    ///
    /// # Errors
    /// Returns `Interrupted` if cancellation is requested mid-traversal.
    pub fn distance_field(self, weighted: bool) -> Result<DistanceField<'a>> {
        distance::distance_field(self.taxonomy, self.index, EdgeWeighting::from_flag(weighted))
    }

    /// Undirected shortest path length; 0 for the vertex itself and
    /// `f64::INFINITY` when `target` is in another component.
    ///
    /// # Errors
    /// Returns `UnknownVertex` if `target` belongs to another taxonomy and
    /// `Interrupted` if cancellation is requested mid-traversal.
    pub fn shortest_path_distance_to(self, target: Vertex<'_>, weighted: bool) -> Result<f64> {
        let target = self.taxonomy.own(target)?;
        if target == self.index {
            return Ok(0.0);
        }
        distance::distance_between(
            self.taxonomy,
            self.index,
            target,
            EdgeWeighting::from_flag(weighted),
        )
    }

    /// Shortest path length using per-direction half-edge weights, so the
    /// result may differ from `target.asymmetric_shortest_path_dist(self)`.
    ///
    /// # Errors
    /// Returns `UnknownVertex` if `target` belongs to another taxonomy and
    /// `Interrupted` if cancellation is requested mid-traversal.
    pub fn asymmetric_shortest_path_dist(self, target: Vertex<'_>) -> Result<f64> {
        let target = self.taxonomy.own(target)?;
        if target == self.index {
            return Ok(0.0);
        }
        distance::distance_between(self.taxonomy, self.index, target, EdgeWeighting::Directed)
    }

    pub(crate) fn cache_is_warm(self) -> bool {
        self.record().cache.is_warm()
    }
}

impl PartialEq for Vertex<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.taxonomy, other.taxonomy) && self.index == other.index
    }
}

impl Eq for Vertex<'_> {}

impl Hash for Vertex<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl fmt::Debug for Vertex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.id())
    }
}

impl fmt::Display for Vertex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Write access to the caller-owned attributes of one vertex.
pub struct VertexMut<'a> {
    record: &'a mut VertexRecord,
}

impl<'a> VertexMut<'a> {
    pub(crate) fn new(record: &'a mut VertexRecord) -> Self {
        Self { record }
    }

    #[must_use]
    pub fn id(&self) -> VertexId {
        self.record.id
    }

    pub fn set_ic_value(&mut self, value: f64) -> &mut Self {
        self.record.ic_value = value;
        self
    }

    pub fn set_probability(&mut self, value: f64) -> &mut Self {
        self.record.probability = value;
        self
    }

    pub fn set_string_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.record.string_tag = tag.into();
        self
    }

    pub fn set_tag<T: Any + Send + Sync>(&mut self, tag: T) -> &mut Self {
        self.record.tag = Some(Box::new(tag));
        self
    }

    pub fn clear_tag(&mut self) -> &mut Self {
        self.record.tag = None;
        self
    }
}

// src/taxonomy/half_edge.rs
//! Edge and half-edge records plus their borrowed views.
//!
//! An edge joins a child to one of its parents and owns two half-edges:
//! the direct half targets the parent (`SubClassOf` from the child's side),
//! the inverse half targets the child (`SuperClassOf` from the parent's side).
//! Each half-edge also carries the `next` link used by the adjacency ring of
//! the vertex it points to (see [`super::ring`]).

use std::fmt;

use super::graph::Taxonomy;
use super::types::{EdgeIdx, HalfEdgeIdx, OrientedEdgeType, VertexIdx};
use super::vertex::Vertex;

#[derive(Debug, Clone)]
pub(crate) struct HalfEdgeRecord {
    pub(crate) target: VertexIdx,
    /// Next outgoing arc of `target`'s ring, read through the opposite half.
    pub(crate) next: Option<HalfEdgeIdx>,
    pub(crate) kind: OrientedEdgeType,
    pub(crate) weight: f64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeRecord {
    pub(crate) weight: f64,
    pub(crate) cond_probability: f64,
}

impl HalfEdgeRecord {
    /// Builds the `[direct, inverse]` pair for an edge from `child` to `parent`.
    pub(crate) fn pair(child: VertexIdx, parent: VertexIdx) -> [HalfEdgeRecord; 2] {
        [
            HalfEdgeRecord {
                target: parent,
                next: None,
                kind: OrientedEdgeType::SubClassOf,
                weight: 0.0,
            },
            HalfEdgeRecord {
                target: child,
                next: None,
                kind: OrientedEdgeType::SuperClassOf,
                weight: 0.0,
            },
        ]
    }
}

/// Read view over one oriented arc.
#[derive(Clone, Copy)]
pub struct HalfEdge<'a> {
    taxonomy: &'a Taxonomy,
    index: HalfEdgeIdx,
}

impl<'a> HalfEdge<'a> {
    pub(crate) fn new(taxonomy: &'a Taxonomy, index: HalfEdgeIdx) -> Self {
        Self { taxonomy, index }
    }

    #[allow(clippy::indexing_slicing)] // Handles come from the same arena
    fn record(self) -> &'a HalfEdgeRecord {
        &self.taxonomy.half_edges[self.index.0]
    }

    #[must_use]
    pub fn index(self) -> HalfEdgeIdx {
        self.index
    }

    /// The vertex this arc points to.
    #[must_use]
    pub fn target(self) -> Vertex<'a> {
        Vertex::new(self.taxonomy, self.record().target)
    }

    /// The vertex whose ring this arc belongs to.
    #[must_use]
    pub fn source(self) -> Vertex<'a> {
        self.opposite().target()
    }

    #[must_use]
    pub fn opposite(self) -> HalfEdge<'a> {
        HalfEdge::new(self.taxonomy, self.index.opposite())
    }

    /// Raw ring link stored on this half-edge.
    #[must_use]
    pub fn next(self) -> Option<HalfEdge<'a>> {
        self.record().next.map(|h| HalfEdge::new(self.taxonomy, h))
    }

    /// Next outgoing arc around [`Self::source`].
    #[must_use]
    pub fn next_around_source(self) -> Option<HalfEdge<'a>> {
        self.opposite().next()
    }

    #[must_use]
    pub fn kind(self) -> OrientedEdgeType {
        self.record().kind
    }

    /// Directional weight, independent from the opposite half.
    #[must_use]
    pub fn weight(self) -> f64 {
        self.record().weight
    }

    #[must_use]
    pub fn edge(self) -> Edge<'a> {
        Edge::new(self.taxonomy, self.index.edge())
    }
}

impl PartialEq for HalfEdge<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.taxonomy, other.taxonomy) && self.index == other.index
    }
}

impl Eq for HalfEdge<'_> {}

impl fmt::Debug for HalfEdge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HalfEdge({} -{}-> {})",
            self.source().id(),
            self.kind(),
            self.target().id()
        )
    }
}

/// Read view over an unordered child/parent edge.
#[derive(Clone, Copy)]
pub struct Edge<'a> {
    taxonomy: &'a Taxonomy,
    index: EdgeIdx,
}

impl<'a> Edge<'a> {
    pub(crate) fn new(taxonomy: &'a Taxonomy, index: EdgeIdx) -> Self {
        Self { taxonomy, index }
    }

    #[allow(clippy::indexing_slicing)] // Handles come from the same arena
    fn record(self) -> &'a EdgeRecord {
        &self.taxonomy.edges[self.index.0]
    }

    #[must_use]
    pub fn index(self) -> EdgeIdx {
        self.index
    }

    /// Half-edge from the child to the parent.
    #[must_use]
    pub fn direct(self) -> HalfEdge<'a> {
        HalfEdge::new(self.taxonomy, self.index.direct())
    }

    /// Half-edge from the parent to the child.
    #[must_use]
    pub fn inverse(self) -> HalfEdge<'a> {
        HalfEdge::new(self.taxonomy, self.index.inverse())
    }

    #[must_use]
    pub fn child(self) -> Vertex<'a> {
        self.inverse().target()
    }

    #[must_use]
    pub fn parent(self) -> Vertex<'a> {
        self.direct().target()
    }

    /// Symmetric weight used by the weighted distance queries.
    #[must_use]
    pub fn weight(self) -> f64 {
        self.record().weight
    }

    #[must_use]
    pub fn cond_probability(self) -> f64 {
        self.record().cond_probability
    }
}

impl PartialEq for Edge<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.taxonomy, other.taxonomy) && self.index == other.index
    }
}

impl Eq for Edge<'_> {}

impl fmt::Debug for Edge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({} -> {})", self.child().id(), self.parent().id())
    }
}

/// Write access to the scalar attributes of one edge and its two halves.
pub struct EdgeMut<'a> {
    record: &'a mut EdgeRecord,
    direct: &'a mut HalfEdgeRecord,
    inverse: &'a mut HalfEdgeRecord,
}

impl<'a> EdgeMut<'a> {
    pub(crate) fn new(
        record: &'a mut EdgeRecord,
        direct: &'a mut HalfEdgeRecord,
        inverse: &'a mut HalfEdgeRecord,
    ) -> Self {
        Self {
            record,
            direct,
            inverse,
        }
    }

    pub fn set_weight(&mut self, weight: f64) -> &mut Self {
        self.record.weight = weight;
        self
    }

    pub fn set_cond_probability(&mut self, value: f64) -> &mut Self {
        self.record.cond_probability = value;
        self
    }

    /// Weight of the child-to-parent direction.
    pub fn set_direct_weight(&mut self, weight: f64) -> &mut Self {
        self.direct.weight = weight;
        self
    }

    /// Weight of the parent-to-child direction.
    pub fn set_inverse_weight(&mut self, weight: f64) -> &mut Self {
        self.inverse.weight = weight;
        self
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.record.weight
    }

    #[must_use]
    pub fn cond_probability(&self) -> f64 {
        self.record.cond_probability
    }
}

/// Edge attributes computed in bulk by [`Taxonomy::assign_edge_weights`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeWeights {
    pub weight: f64,
    pub cond_probability: f64,
    pub direct_weight: f64,
    pub inverse_weight: f64,
}

impl EdgeWeights {
    /// Same value on the edge and both directions.
    #[must_use]
    pub fn uniform(weight: f64) -> Self {
        Self {
            weight,
            cond_probability: 0.0,
            direct_weight: weight,
            inverse_weight: weight,
        }
    }
}

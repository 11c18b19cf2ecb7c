// src/taxonomy/ring.rs
//! Circular adjacency lists threaded through the half-edge arena.
//!
//! The outgoing arcs of a vertex form a ring: starting from the vertex's
//! first arc `h`, the next arc is `half_edges[opposite(h)].next`, until the
//! walk returns to the first arc. Parent arcs (`SubClassOf`) and child arcs
//! (`SuperClassOf`) share the same ring.

use super::half_edge::HalfEdgeRecord;
use super::types::{HalfEdgeIdx, OrientedEdgeType, VertexIdx};
use super::vertex::VertexRecord;

/// Iterator over every outgoing arc of one vertex, in insertion order.
#[derive(Clone)]
pub struct Arcs<'a> {
    half_edges: &'a [HalfEdgeRecord],
    first: Option<HalfEdgeIdx>,
    cursor: Option<HalfEdgeIdx>,
}

impl<'a> Arcs<'a> {
    pub(crate) fn new(half_edges: &'a [HalfEdgeRecord], first: Option<HalfEdgeIdx>) -> Self {
        Self {
            half_edges,
            first,
            cursor: first,
        }
    }

    /// Restricts the walk to arcs of one orientation, yielding their targets.
    pub(crate) fn targets(self, kind: OrientedEdgeType) -> impl Iterator<Item = VertexIdx> + 'a {
        let half_edges = self.half_edges;
        self.filter_map(move |h| {
            half_edges
                .get(h.0)
                .filter(|arc| arc.kind == kind)
                .map(|arc| arc.target)
        })
    }
}

impl Iterator for Arcs<'_> {
    type Item = HalfEdgeIdx;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        let next = self
            .half_edges
            .get(current.opposite().0)
            .and_then(|incoming| incoming.next);
        self.cursor = next.filter(|n| Some(*n) != self.first);
        Some(current)
    }
}

/// Appends the outgoing arc `opposite(incoming)` to the ring of `vertex`.
///
/// `incoming` must target `vertex`. Appending keeps the vertex's first arc
/// stable, so the ring preserves insertion order.
#[allow(clippy::indexing_slicing)] // Handles come from the same arena
pub(crate) fn append_incoming(
    vertex: &mut VertexRecord,
    half_edges: &mut [HalfEdgeRecord],
    incoming: HalfEdgeIdx,
) {
    let outgoing = incoming.opposite();
    match (vertex.first_out, vertex.last_out) {
        (Some(first), Some(last)) => {
            half_edges[incoming.0].next = Some(first);
            half_edges[last.opposite().0].next = Some(outgoing);
        }
        _ => {
            vertex.first_out = Some(outgoing);
            half_edges[incoming.0].next = Some(outgoing);
        }
    }
    vertex.last_out = Some(outgoing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::types::EdgeIdx;

    fn vertex() -> VertexRecord {
        VertexRecord::new(0)
    }

    #[test]
    fn test_empty_ring_yields_nothing() {
        let arcs = Arcs::new(&[], None);
        assert_eq!(arcs.count(), 0);
    }

    #[test]
    fn test_ring_preserves_insertion_order() {
        // Hub vertex 0 gets three children 1, 2, 3.
        let hub = VertexIdx(0);
        let mut half_edges = Vec::new();
        for child in 1..=3 {
            half_edges.extend(HalfEdgeRecord::pair(VertexIdx(child), hub));
        }
        let mut record = vertex();
        for e in 0..3 {
            // The direct half targets the hub; its opposite is the hub's arc.
            append_incoming(&mut record, &mut half_edges, EdgeIdx(e).direct());
        }

        let arcs: Vec<_> = Arcs::new(&half_edges, record.first_out).collect();
        assert_eq!(
            arcs,
            vec![EdgeIdx(0).inverse(), EdgeIdx(1).inverse(), EdgeIdx(2).inverse()]
        );

        let children: Vec<_> = Arcs::new(&half_edges, record.first_out)
            .targets(OrientedEdgeType::SuperClassOf)
            .collect();
        assert_eq!(children, vec![VertexIdx(1), VertexIdx(2), VertexIdx(3)]);
    }

    #[test]
    fn test_single_arc_ring_closes_on_itself() {
        let mut half_edges = HalfEdgeRecord::pair(VertexIdx(1), VertexIdx(0)).to_vec();
        let mut record = vertex();
        append_incoming(&mut record, &mut half_edges, EdgeIdx(0).inverse());
        let first = record.first_out;
        assert_eq!(first, Some(EdgeIdx(0).direct()));
        // next(first) = half_edges[opposite(first)].next = first
        assert_eq!(half_edges[1].next, first);
        assert_eq!(Arcs::new(&half_edges, first).count(), 1);
    }
}

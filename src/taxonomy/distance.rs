// src/taxonomy/distance.rs
//! Dijkstra shortest paths over the undirected taxonomy graph.
//!
//! Distances live in a buffer owned by each call, so any number of queries
//! may run concurrently against one shared taxonomy.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use super::graph::Taxonomy;
use super::types::{HalfEdgeIdx, VertexIdx};
use super::vertex::Vertex;
use crate::error::Result;

/// How an arc contributes to a path length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeWeighting {
    /// Every arc counts 1.
    Unit,
    /// The owning edge's symmetric weight.
    Symmetric,
    /// The half-edge's own directional weight.
    Directed,
}

impl EdgeWeighting {
    #[must_use]
    pub fn from_flag(weighted: bool) -> Self {
        if weighted {
            Self::Symmetric
        } else {
            Self::Unit
        }
    }

    #[allow(clippy::indexing_slicing)] // Handles come from the same arena
    fn weight_of(self, taxonomy: &Taxonomy, arc: HalfEdgeIdx) -> f64 {
        match self {
            Self::Unit => 1.0,
            Self::Symmetric => taxonomy.edges[arc.edge().0].weight,
            Self::Directed => taxonomy.half_edges[arc.0].weight,
        }
    }
}

/// Min-heap entry: `BinaryHeap` pops the smallest distance first.
type Pending = (Reverse<OrderedFloat<f64>>, VertexIdx);

/// Shortest distances from one source vertex to every vertex.
pub struct DistanceField<'a> {
    taxonomy: &'a Taxonomy,
    source: VertexIdx,
    distances: Vec<f64>,
}

impl<'a> DistanceField<'a> {
    #[must_use]
    pub fn source(&self) -> Vertex<'a> {
        Vertex::new(self.taxonomy, self.source)
    }

    /// `f64::INFINITY` when `target` is unreachable or belongs to another
    /// taxonomy.
    #[must_use]
    pub fn distance_to(&self, target: Vertex<'_>) -> f64 {
        if !std::ptr::eq(self.taxonomy, target.taxonomy()) {
            return f64::INFINITY;
        }
        self.distances
            .get(target.index().0)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }

    /// `(vertex, distance)` pairs for every reachable vertex, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Vertex<'a>, f64)> + '_ {
        let taxonomy = self.taxonomy;
        self.distances
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
            .map(move |(i, d)| (Vertex::new(taxonomy, VertexIdx(i)), *d))
    }
}

/// Runs Dijkstra from `source`, stopping early once `stop_at` is settled.
fn dijkstra(
    taxonomy: &Taxonomy,
    source: VertexIdx,
    weighting: EdgeWeighting,
    stop_at: Option<VertexIdx>,
) -> Result<Vec<f64>> {
    let mut checkpoint = taxonomy.checkpoint();
    let mut distances = vec![f64::INFINITY; taxonomy.vertices.len()];
    let mut pending = BinaryHeap::new();

    if let Some(d) = distances.get_mut(source.0) {
        *d = 0.0;
    }
    pending.push((Reverse(OrderedFloat(0.0)), source));

    while let Some((Reverse(OrderedFloat(distance)), vertex)) = pending.pop() {
        checkpoint.step()?;
        // Stale entry: a shorter path was already settled.
        if distances.get(vertex.0).is_some_and(|&best| distance > best) {
            continue;
        }
        if stop_at == Some(vertex) {
            break;
        }
        for arc in taxonomy.arcs(vertex) {
            relax(taxonomy, &mut distances, &mut pending, distance, arc, weighting);
        }
    }

    Ok(distances)
}

#[allow(clippy::indexing_slicing)] // Handles come from the same arena
fn relax(
    taxonomy: &Taxonomy,
    distances: &mut [f64],
    pending: &mut BinaryHeap<Pending>,
    base: f64,
    arc: HalfEdgeIdx,
    weighting: EdgeWeighting,
) {
    let adjacent = taxonomy.half_edges[arc.0].target;
    let novel = base + weighting.weight_of(taxonomy, arc);
    if novel < distances[adjacent.0] {
        distances[adjacent.0] = novel;
        pending.push((Reverse(OrderedFloat(novel)), adjacent));
    }
}

pub(crate) fn distance_field(
    taxonomy: &Taxonomy,
    source: VertexIdx,
    weighting: EdgeWeighting,
) -> Result<DistanceField<'_>> {
    let distances = dijkstra(taxonomy, source, weighting, None)?;
    Ok(DistanceField {
        taxonomy,
        source,
        distances,
    })
}

pub(crate) fn distance_between(
    taxonomy: &Taxonomy,
    source: VertexIdx,
    target: VertexIdx,
    weighting: EdgeWeighting,
) -> Result<f64> {
    let distances = dijkstra(taxonomy, source, weighting, Some(target))?;
    Ok(distances.get(target.0).copied().unwrap_or(f64::INFINITY))
}

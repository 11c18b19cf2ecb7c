// src/taxonomy/depth.rs
//! Depth of a vertex as the shortest or longest ascending path to a root.
//!
//! The computation is restricted to the vertex's inclusive ancestor set.
//! Every root of that subgraph is seeded at distance 0 and distances are
//! relaxed top-down along child arcs in topological order, so each vertex is
//! settled once all of its parents have been.

use std::collections::{HashMap, VecDeque};

use super::graph::Taxonomy;
use super::traversal::AncestorSet;
use super::types::{OrientedEdgeType, VertexIdx};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DepthKind {
    Shortest,
    Longest,
}

impl DepthKind {
    fn relax(self, current: u32, candidate: u32) -> u32 {
        match self {
            Self::Shortest => current.min(candidate),
            Self::Longest => current.max(candidate),
        }
    }
}

pub(crate) fn ascending_depth(taxonomy: &Taxonomy, vertex: VertexIdx, kind: DepthKind) -> Result<u32> {
    if taxonomy.parent_handles(vertex).next().is_none() {
        return Ok(0);
    }

    let ancestors = AncestorSet::of(taxonomy, vertex)?;
    let depths = relax_top_down(taxonomy, &ancestors, kind)?;
    Ok(depths.get(&vertex).copied().unwrap_or(0))
}

/// Settles every member of `ancestors` in topological order.
fn relax_top_down(
    taxonomy: &Taxonomy,
    ancestors: &AncestorSet,
    kind: DepthKind,
) -> Result<HashMap<VertexIdx, u32>> {
    let mut checkpoint = taxonomy.checkpoint();

    // Parents of an ancestor are ancestors too, so every parent arc counts.
    let mut unsettled_parents: HashMap<VertexIdx, usize> = ancestors
        .order
        .iter()
        .map(|&v| (v, taxonomy.parent_handles(v).count()))
        .collect();

    let mut depths: HashMap<VertexIdx, u32> = HashMap::with_capacity(ancestors.order.len());
    let mut ready: VecDeque<VertexIdx> = VecDeque::new();
    for (&v, &parents) in &unsettled_parents {
        if parents == 0 {
            depths.insert(v, 0);
            ready.push_back(v);
        }
    }

    while let Some(seed) = ready.pop_front() {
        checkpoint.step()?;
        let candidate = depths.get(&seed).copied().unwrap_or(0) + 1;

        for child in taxonomy.arcs(seed).targets(OrientedEdgeType::SuperClassOf) {
            if !ancestors.contains(child) {
                continue;
            }
            depths
                .entry(child)
                .and_modify(|d| *d = kind.relax(*d, candidate))
                .or_insert(candidate);

            if let Some(remaining) = unsettled_parents.get_mut(&child) {
                *remaining -= 1;
                if *remaining == 0 {
                    ready.push_back(child);
                }
            }
        }
    }

    Ok(depths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(t: &Taxonomy, id: u32, kind: DepthKind) -> u32 {
        ascending_depth(t, t.vertex(id).unwrap().index(), kind).unwrap()
    }

    #[test]
    fn test_chain_depths() {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[2]).unwrap();
        assert_eq!(depth(&t, 1, DepthKind::Shortest), 0);
        assert_eq!(depth(&t, 3, DepthKind::Shortest), 2);
        assert_eq!(depth(&t, 3, DepthKind::Longest), 2);
    }

    #[test]
    fn test_shortcut_separates_min_and_max() {
        // 1 <- 2 <- 3 <- 4 and a shortcut 1 <- 4
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[2]).unwrap();
        t.add_vertex(4, &[3, 1]).unwrap();
        assert_eq!(depth(&t, 4, DepthKind::Shortest), 1);
        assert_eq!(depth(&t, 4, DepthKind::Longest), 3);
    }

    #[test]
    fn test_multiple_roots_use_nearest_and_farthest() {
        // Roots 1 and 10; 10 <- 11; vertex 12 has parents 1 and 11.
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(10, &[]).unwrap();
        t.add_vertex(11, &[10]).unwrap();
        t.add_vertex(12, &[11, 1]).unwrap();
        assert_eq!(depth(&t, 12, DepthKind::Shortest), 1);
        assert_eq!(depth(&t, 12, DepthKind::Longest), 2);
    }

    #[test]
    fn test_unrelated_branches_are_ignored() {
        // A long sibling branch must not influence depth.
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[2]).unwrap();
        t.add_vertex(4, &[3]).unwrap();
        t.add_vertex(5, &[1]).unwrap();
        assert_eq!(depth(&t, 5, DepthKind::Longest), 1);
    }
}

// src/taxonomy/traversal.rs
//! Breadth-first walks along one arc orientation.
//!
//! A visited set guarantees each vertex is enqueued once, so diamonds and
//! other shared ancestors reachable through several paths terminate.

use std::collections::{HashSet, VecDeque};

use super::graph::Taxonomy;
use super::types::{OrientedEdgeType, VertexIdx};
use crate::error::Result;

/// Every vertex reachable from `seed` along `kind` arcs, `seed` first.
pub(crate) fn breadth_first(
    taxonomy: &Taxonomy,
    seed: VertexIdx,
    kind: OrientedEdgeType,
) -> Result<Vec<VertexIdx>> {
    let mut checkpoint = taxonomy.checkpoint();
    let mut visited = HashSet::from([seed]);
    let mut pending = VecDeque::from([seed]);
    let mut order = Vec::new();

    while let Some(current) = pending.pop_front() {
        checkpoint.step()?;
        order.push(current);
        for next in taxonomy.arcs(current).targets(kind) {
            if visited.insert(next) {
                pending.push_back(next);
            }
        }
    }

    tracing::trace!(seed = seed.get(), ?kind, reached = order.len(), "breadth-first walk");
    Ok(order)
}

fn without_seed(mut order: Vec<VertexIdx>, include_seed: bool) -> Vec<VertexIdx> {
    if !include_seed && !order.is_empty() {
        order.remove(0);
    }
    order
}

pub(crate) fn ancestor_order(
    taxonomy: &Taxonomy,
    seed: VertexIdx,
    include_seed: bool,
) -> Result<Vec<VertexIdx>> {
    let order = breadth_first(taxonomy, seed, OrientedEdgeType::SubClassOf)?;
    Ok(without_seed(order, include_seed))
}

pub(crate) fn descendant_order(
    taxonomy: &Taxonomy,
    seed: VertexIdx,
    include_seed: bool,
) -> Result<Vec<VertexIdx>> {
    let order = breadth_first(taxonomy, seed, OrientedEdgeType::SuperClassOf)?;
    Ok(without_seed(order, include_seed))
}

pub(crate) fn subsumed_leaves(
    taxonomy: &Taxonomy,
    seed: VertexIdx,
    inclusive: bool,
) -> Result<Vec<VertexIdx>> {
    let descendants = descendant_order(taxonomy, seed, inclusive)?;
    Ok(descendants
        .into_iter()
        .filter(|&v| taxonomy.child_handles(v).next().is_none())
        .collect())
}

/// Inclusive ancestor set kept both in discovery order and as a hash set.
pub(crate) struct AncestorSet {
    pub(crate) order: Vec<VertexIdx>,
    pub(crate) members: HashSet<VertexIdx>,
}

impl AncestorSet {
    pub(crate) fn of(taxonomy: &Taxonomy, seed: VertexIdx) -> Result<Self> {
        let order = ancestor_order(taxonomy, seed, true)?;
        let members = order.iter().copied().collect();
        Ok(Self { order, members })
    }

    pub(crate) fn contains(&self, vertex: VertexIdx) -> bool {
        self.members.contains(&vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 <- 2, 1 <- 3, {2,3} <- 4, 4 <- 5
    fn diamond() -> Taxonomy {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[1]).unwrap();
        t.add_vertex(4, &[2, 3]).unwrap();
        t.add_vertex(5, &[4]).unwrap();
        t
    }

    fn ids(t: &Taxonomy, handles: &[VertexIdx]) -> Vec<u32> {
        handles.iter().map(|&h| t.vertex_at(h).unwrap().id()).collect()
    }

    fn idx(t: &Taxonomy, id: u32) -> VertexIdx {
        t.vertex(id).unwrap().index()
    }

    #[test]
    fn test_ancestors_visit_shared_parent_once() {
        let t = diamond();
        let order = ancestor_order(&t, idx(&t, 5), true).unwrap();
        assert_eq!(ids(&t, &order), vec![5, 4, 2, 3, 1]);
    }

    #[test]
    fn test_exclusive_ancestors_drop_seed() {
        let t = diamond();
        let order = ancestor_order(&t, idx(&t, 4), false).unwrap();
        assert_eq!(ids(&t, &order), vec![2, 3, 1]);
    }

    #[test]
    fn test_descendants_of_root() {
        let t = diamond();
        let order = descendant_order(&t, idx(&t, 1), false).unwrap();
        assert_eq!(ids(&t, &order), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_subsumed_leaves() {
        let t = diamond();
        assert_eq!(ids(&t, &subsumed_leaves(&t, idx(&t, 1), false).unwrap()), vec![5]);
        assert!(subsumed_leaves(&t, idx(&t, 5), false).unwrap().is_empty());
        assert_eq!(ids(&t, &subsumed_leaves(&t, idx(&t, 5), true).unwrap()), vec![5]);
    }

    #[test]
    fn test_ancestor_set_membership() {
        let t = diamond();
        let set = AncestorSet::of(&t, idx(&t, 4)).unwrap();
        assert!(set.contains(idx(&t, 4)));
        assert!(set.contains(idx(&t, 1)));
        assert!(!set.contains(idx(&t, 5)));
        assert_eq!(set.order.len(), set.members.len());
    }

    #[test]
    fn test_cancelled_walk_fails() {
        let t = diamond();
        t.cancel_handle().cancel();
        let result = ancestor_order(&t, idx(&t, 5), true);
        assert!(matches!(result, Err(crate::error::TaxonomyError::Interrupted)));
    }
}

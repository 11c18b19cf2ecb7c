// src/taxonomy/list.rs
//! Ordered vertex collections.
//!
//! [`Vertices`] is the read-only master view of a taxonomy; it has no
//! mutating methods at all. Query results come back as [`VertexList`], an
//! id-indexed list the caller may extend, shrink or drop. Both implement
//! [`VertexSet`], which carries lookup and set algebra.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::graph::Taxonomy;
use super::half_edge::Edge;
use super::types::{EdgeIdx, VertexId, VertexIdx};
use super::vertex::Vertex;
use crate::error::{Result, TaxonomyError};

/// Read access and set algebra shared by every vertex collection.
pub trait VertexSet<'a> {
    fn taxonomy(&self) -> &'a Taxonomy;

    fn len(&self) -> usize;

    /// Arena handle of the vertex at `position`.
    fn handle_at(&self, position: usize) -> Option<VertexIdx>;

    fn by_id(&self, id: VertexId) -> Option<Vertex<'a>>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, position: usize) -> Option<Vertex<'a>> {
        self.handle_at(position)
            .map(|h| Vertex::new(self.taxonomy(), h))
    }

    fn iter(&self) -> VertexIter<'_, 'a, Self> {
        VertexIter::new(self)
    }

    fn contains(&self, id: VertexId) -> bool {
        self.by_id(id).is_some()
    }

    fn index_of(&self, id: VertexId) -> Option<usize> {
        self.iter().position(|v| v.id() == id)
    }

    fn ids(&self) -> Vec<VertexId> {
        self.iter().map(Vertex::id).collect()
    }

    /// The members whose id is in `ids`, in `ids` order. Unknown ids are
    /// skipped.
    fn by_ids(&self, ids: &[VertexId]) -> VertexList<'a> {
        let handles = ids.iter().filter_map(|&id| self.by_id(id)).map(Vertex::index);
        VertexList::from_handles(self.taxonomy(), handles)
    }

    /// Members of `self` whose id is absent from `other`.
    fn difference<S>(&self, other: &S) -> VertexList<'a>
    where
        S: VertexSet<'a> + ?Sized,
    {
        let handles = self
            .iter()
            .filter(|v| !other.contains(v.id()))
            .map(Vertex::index);
        VertexList::from_handles(self.taxonomy(), handles)
    }

    fn difference_count<S>(&self, other: &S) -> usize
    where
        S: VertexSet<'a> + ?Sized,
    {
        self.iter().filter(|v| !other.contains(v.id())).count()
    }

    /// Members of `self` whose id is also in `other`.
    fn intersection<S>(&self, other: &S) -> VertexList<'a>
    where
        S: VertexSet<'a> + ?Sized,
    {
        let handles = self
            .iter()
            .filter(|v| other.contains(v.id()))
            .map(Vertex::index);
        VertexList::from_handles(self.taxonomy(), handles)
    }

    fn intersection_count<S>(&self, other: &S) -> usize
    where
        S: VertexSet<'a> + ?Sized,
    {
        self.iter().filter(|v| other.contains(v.id())).count()
    }

    fn roots(&self) -> VertexList<'a> {
        let handles = self.iter().filter(|v| v.is_root()).map(Vertex::index);
        VertexList::from_handles(self.taxonomy(), handles)
    }

    fn leaves(&self) -> VertexList<'a> {
        let handles = self.iter().filter(|v| v.is_leaf()).map(Vertex::index);
        VertexList::from_handles(self.taxonomy(), handles)
    }

    fn leaves_count(&self) -> usize {
        self.iter().filter(|v| v.is_leaf()).count()
    }

    /// Largest IC value among the members, never below 0.
    fn greatest_ic_value(&self) -> f64 {
        self.iter().map(Vertex::ic_value).fold(0.0, f64::max)
    }

    fn ic_values(&self) -> Vec<f64> {
        self.iter().map(Vertex::ic_value).collect()
    }

    /// # Errors
    /// Returns `Interrupted` if a depth computation is cancelled.
    fn depth_min_values(&self) -> Result<Vec<u32>> {
        self.iter().map(Vertex::depth_min).collect()
    }

    /// # Errors
    /// Returns `Interrupted` if a depth computation is cancelled.
    fn greatest_depth_min(&self) -> Result<u32> {
        self.iter()
            .try_fold(0, |top, v| Ok(top.max(v.depth_min()?)))
    }

    /// Largest longest-path depth among the members, never below 1.
    ///
    /// # Errors
    /// Returns `Interrupted` if a depth computation is cancelled.
    fn greatest_depth_max(&self) -> Result<u32> {
        self.iter()
            .try_fold(1, |top, v| Ok(top.max(v.depth_max()?)))
    }

    /// # Errors
    /// See [`VertexSet::greatest_depth_min`].
    fn greatest_depth_min_base1(&self) -> Result<u32> {
        Ok(1 + self.greatest_depth_min()?)
    }
}

/// Iterator over the members of a [`VertexSet`], in list order.
pub struct VertexIter<'s, 'a, S: ?Sized> {
    set: &'s S,
    position: usize,
    _taxonomy: PhantomData<&'a Taxonomy>,
}

impl<'s, 'a, S: VertexSet<'a> + ?Sized> VertexIter<'s, 'a, S> {
    fn new(set: &'s S) -> Self {
        Self {
            set,
            position: 0,
            _taxonomy: PhantomData,
        }
    }
}

impl<'a, S: VertexSet<'a> + ?Sized> Iterator for VertexIter<'_, 'a, S> {
    type Item = Vertex<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.set.get(self.position)?;
        self.position += 1;
        Some(vertex)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.set.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<'a, S: VertexSet<'a> + ?Sized> ExactSizeIterator for VertexIter<'_, 'a, S> {}

/// The master vertex list of a taxonomy, in insertion order.
#[derive(Clone, Copy)]
pub struct Vertices<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> Vertices<'a> {
    pub(crate) fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }
}

impl<'a> VertexSet<'a> for Vertices<'a> {
    fn taxonomy(&self) -> &'a Taxonomy {
        self.taxonomy
    }

    fn len(&self) -> usize {
        self.taxonomy.vertex_count()
    }

    fn handle_at(&self, position: usize) -> Option<VertexIdx> {
        (position < self.len()).then_some(VertexIdx(position))
    }

    fn by_id(&self, id: VertexId) -> Option<Vertex<'a>> {
        self.taxonomy.vertex(id)
    }

    // Arena order is insertion order.
    fn index_of(&self, id: VertexId) -> Option<usize> {
        self.taxonomy.index_of(id).map(VertexIdx::get)
    }
}

impl fmt::Debug for Vertices<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertices").field("len", &self.len()).finish()
    }
}

/// A disposable, id-indexed vertex list produced by queries.
#[derive(Clone)]
pub struct VertexList<'a> {
    taxonomy: &'a Taxonomy,
    handles: Vec<VertexIdx>,
    positions: HashMap<VertexId, usize>,
}

impl<'a> VertexList<'a> {
    #[must_use]
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self {
            taxonomy,
            handles: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Collects `handles` in order, silently dropping repeats.
    pub(crate) fn from_handles(
        taxonomy: &'a Taxonomy,
        handles: impl IntoIterator<Item = VertexIdx>,
    ) -> Self {
        let mut list = Self::new(taxonomy);
        for handle in handles {
            list.insert(handle);
        }
        list
    }

    #[allow(clippy::indexing_slicing)] // Guarded: handles come from `taxonomy`
    fn insert(&mut self, handle: VertexIdx) -> bool {
        let id = self.taxonomy.vertices[handle.0].id;
        if self.positions.contains_key(&id) {
            return false;
        }
        self.positions.insert(id, self.handles.len());
        self.handles.push(handle);
        true
    }

    /// Appends `vertex`.
    ///
    /// # Errors
    /// Returns `DuplicateId` if a vertex with the same id is already listed
    /// and `UnknownVertex` if `vertex` belongs to another taxonomy.
    pub fn push(&mut self, vertex: Vertex<'a>) -> Result<()> {
        if !std::ptr::eq(vertex.taxonomy(), self.taxonomy) {
            return Err(TaxonomyError::UnknownVertex(vertex.id()));
        }
        if self.insert(vertex.index()) {
            Ok(())
        } else {
            Err(TaxonomyError::DuplicateId(vertex.id()))
        }
    }

    /// Removes the vertex with `id`; returns whether it was listed.
    pub fn remove(&mut self, id: VertexId) -> bool {
        let Some(position) = self.positions.remove(&id) else {
            return false;
        };
        self.handles.remove(position);
        self.reindex_from(position);
        true
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.positions.clear();
    }

    /// Reorders the list by IC value, greatest first. Equal values keep
    /// their relative order.
    pub fn sort_by_ic_descending(&mut self) {
        let taxonomy = self.taxonomy;
        self.handles.sort_by(|a, b| {
            let ic_a = Vertex::new(taxonomy, *a).ic_value();
            let ic_b = Vertex::new(taxonomy, *b).ic_value();
            ic_b.total_cmp(&ic_a)
        });
        self.reindex_from(0);
    }

    #[allow(clippy::indexing_slicing)] // Guarded: handles come from `taxonomy`
    fn reindex_from(&mut self, start: usize) {
        for (position, handle) in self.handles.iter().enumerate().skip(start) {
            let id = self.taxonomy.vertices[handle.0].id;
            self.positions.insert(id, position);
        }
    }
}

impl<'a> VertexSet<'a> for VertexList<'a> {
    fn taxonomy(&self) -> &'a Taxonomy {
        self.taxonomy
    }

    fn len(&self) -> usize {
        self.handles.len()
    }

    fn handle_at(&self, position: usize) -> Option<VertexIdx> {
        self.handles.get(position).copied()
    }

    fn by_id(&self, id: VertexId) -> Option<Vertex<'a>> {
        let position = *self.positions.get(&id)?;
        self.get(position)
    }

    fn contains(&self, id: VertexId) -> bool {
        self.positions.contains_key(&id)
    }

    fn index_of(&self, id: VertexId) -> Option<usize> {
        self.positions.get(&id).copied()
    }
}

impl fmt::Display for VertexList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, vertex) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", vertex.id())?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for VertexList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

/// Every edge of a taxonomy, in insertion order.
#[derive(Clone, Copy)]
pub struct Edges<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> Edges<'a> {
    pub(crate) fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.taxonomy.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<Edge<'a>> {
        self.taxonomy.edge(EdgeIdx(position))
    }

    pub fn iter(&self) -> impl Iterator<Item = Edge<'a>> + 'a {
        let taxonomy = self.taxonomy;
        (0..taxonomy.edge_count()).map(move |e| Edge::new(taxonomy, EdgeIdx(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1 <- 2, 1 <- 3, 2 <- 4, 3 <- 5
    fn tree() -> Taxonomy {
        let mut t = Taxonomy::new();
        t.add_vertex(1, &[]).unwrap();
        t.add_vertex(2, &[1]).unwrap();
        t.add_vertex(3, &[1]).unwrap();
        t.add_vertex(4, &[2]).unwrap();
        t.add_vertex(5, &[3]).unwrap();
        t
    }

    #[test]
    fn test_master_view_lookup() {
        let t = tree();
        let all = t.vertices();
        assert_eq!(all.len(), 5);
        assert_eq!(all.ids(), vec![1, 2, 3, 4, 5]);
        assert_eq!(all.index_of(4), Some(3));
        assert!(all.contains(5));
        assert!(!all.contains(6));
        assert_eq!(all.get(1).unwrap().id(), 2);
        assert!(all.get(5).is_none());
    }

    #[test]
    fn test_push_rejects_duplicates() {
        let t = tree();
        let mut list = VertexList::new(&t);
        list.push(t.vertex(2).unwrap()).unwrap();
        let err = list.push(t.vertex(2).unwrap()).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateId(2)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_keeps_index_in_sync() {
        let t = tree();
        let mut list = t.vertices().by_ids(&[5, 4, 3, 2]);
        assert!(list.remove(4));
        assert!(!list.remove(4));
        assert_eq!(list.ids(), vec![5, 3, 2]);
        assert_eq!(list.index_of(2), Some(2));
        assert_eq!(list.by_id(3).unwrap().id(), 3);
        list.clear();
        assert!(list.is_empty());
        assert!(!list.contains(5));
    }

    #[test]
    fn test_by_ids_skips_unknown() {
        let t = tree();
        let list = t.vertices().by_ids(&[3, 42, 1]);
        assert_eq!(list.ids(), vec![3, 1]);
    }

    #[test]
    fn test_set_algebra() {
        let t = tree();
        let left = t.vertex(4).unwrap().ancestors(true).unwrap(); // 4, 2, 1
        let right = t.vertex(5).unwrap().ancestors(true).unwrap(); // 5, 3, 1
        assert_eq!(left.intersection(&right).ids(), vec![1]);
        assert_eq!(left.intersection_count(&right), 1);
        assert_eq!(left.difference(&right).ids(), vec![4, 2]);
        assert_eq!(left.difference_count(&right), 2);
        assert_eq!(t.vertices().difference(&left).ids(), vec![3, 5]);
    }

    #[test]
    fn test_roots_and_leaves() {
        let t = tree();
        assert_eq!(t.vertices().roots().ids(), vec![1]);
        assert_eq!(t.vertices().leaves().ids(), vec![4, 5]);
        assert_eq!(t.vertices().leaves_count(), 2);
    }

    #[test]
    fn test_depth_aggregates() {
        let t = tree();
        let all = t.vertices();
        assert_eq!(all.depth_min_values().unwrap(), vec![0, 1, 1, 2, 2]);
        assert_eq!(all.greatest_depth_min().unwrap(), 2);
        assert_eq!(all.greatest_depth_min_base1().unwrap(), 3);
        assert_eq!(all.greatest_depth_max().unwrap(), 2);

        let root_only = all.by_ids(&[1]);
        assert_eq!(root_only.greatest_depth_min().unwrap(), 0);
        assert_eq!(root_only.greatest_depth_max().unwrap(), 1);
    }

    #[test]
    fn test_ic_sort_and_display() {
        let mut t = tree();
        t.assign_ic_values(|v| Ok(f64::from(v.id() % 3))).unwrap();
        let mut list = t.vertices().by_ids(&[1, 2, 3, 4, 5]);
        list.sort_by_ic_descending();
        // IC: 1 -> 1, 2 -> 2, 3 -> 0, 4 -> 1, 5 -> 2
        assert_eq!(list.to_string(), "[2, 5, 1, 4, 3]");
        assert_eq!(list.index_of(3), Some(4));
        assert_eq!(list.greatest_ic_value(), 2.0);
        assert_eq!(list.ic_values(), vec![2.0, 2.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_edges_view() {
        let t = tree();
        let edges = t.edges();
        assert_eq!(edges.len(), 4);
        let pairs: Vec<_> = edges
            .iter()
            .map(|e| (e.child().id(), e.parent().id()))
            .collect();
        assert_eq!(pairs, vec![(2, 1), (3, 1), (4, 2), (5, 3)]);
        assert!(edges.get(4).is_none());
    }
}

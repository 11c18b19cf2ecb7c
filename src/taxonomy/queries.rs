// src/taxonomy/queries.rs
//! Taxonomy-wide queries: common subsumers, cache warm-up and aggregates.

use rayon::prelude::*;

use super::graph::Taxonomy;
use super::list::VertexSet;
use super::traversal::{self, AncestorSet};
use super::types::VertexIdx;
use super::vertex::Vertex;
use crate::error::{Result, TaxonomyError};

impl Taxonomy {
    /// Lowest common subsumer: the deepest vertex that is an ancestor (or
    /// self) of both `begin` and `end`.
    ///
    /// Depth is `depth_max` when `use_longest_depth` is set, `depth_min`
    /// otherwise. Which candidate wins among several of equal depth is
    /// unspecified.
    ///
    /// # Errors
    /// Returns `NoCommonAncestor` when the two vertices share no ancestor,
    /// `UnknownVertex` when a view belongs to another taxonomy, and
    /// `Interrupted` on cancellation.
    pub fn lcs(&self, begin: Vertex<'_>, end: Vertex<'_>, use_longest_depth: bool) -> Result<Vertex<'_>> {
        self.best_common_ancestor(begin, end, |v| {
            let depth = if use_longest_depth { v.depth_max()? } else { v.depth_min()? };
            Ok(f64::from(depth))
        })?
        .ok_or_else(|| TaxonomyError::NoCommonAncestor(begin.id(), end.id()))
    }

    /// Most informative common ancestor: the common ancestor (or self) with
    /// the greatest IC value. Ties are unspecified.
    ///
    /// # Errors
    /// Returns `NoMicaFound` when no common ancestor has an IC value above
    /// negative infinity, `UnknownVertex` when a view belongs to another
    /// taxonomy, and `Interrupted` on cancellation.
    pub fn mica(&self, begin: Vertex<'_>, end: Vertex<'_>) -> Result<Vertex<'_>> {
        self.best_common_ancestor(begin, end, |v| Ok(v.ic_value()))?
            .ok_or_else(|| TaxonomyError::NoMicaFound(begin.id(), end.id()))
    }

    /// Scans `begin`'s ancestors in breadth-first order and keeps the first
    /// common ancestor with a strictly greater score.
    fn best_common_ancestor<F>(
        &self,
        begin: Vertex<'_>,
        end: Vertex<'_>,
        score: F,
    ) -> Result<Option<Vertex<'_>>>
    where
        F: Fn(Vertex<'_>) -> Result<f64>,
    {
        let begin = self.own(begin)?;
        let end = self.own(end)?;

        let shared = AncestorSet::of(self, end)?;
        let mut best: Option<(VertexIdx, f64)> = None;
        for candidate in traversal::ancestor_order(self, begin, true)? {
            if !shared.contains(candidate) {
                continue;
            }
            let value = score(Vertex::new(self, candidate))?;
            if best.map_or(value > f64::NEG_INFINITY, |(_, top)| value > top) {
                best = Some((candidate, value));
            }
        }
        Ok(best.map(|(idx, _)| Vertex::new(self, idx)))
    }

    /// Resolves a view to a handle of this taxonomy.
    pub(crate) fn own(&self, vertex: Vertex<'_>) -> Result<VertexIdx> {
        if std::ptr::eq(vertex.taxonomy(), self) {
            Ok(vertex.index())
        } else {
            Err(TaxonomyError::UnknownVertex(vertex.id()))
        }
    }

    /// Fills the hyponym-count, depth and leaf-count caches of every vertex.
    ///
    /// Runs on the rayon pool when `parallel_warmup` is enabled.
    ///
    /// # Errors
    /// Returns `Interrupted` on cancellation; caches filled so far are kept.
    pub fn compute_cached_attributes(&self) -> Result<()> {
        tracing::debug!(
            vertices = self.vertex_count(),
            parallel = self.config().parallel_warmup,
            "warming cached attributes"
        );
        self.warm("hyponym counts", |v| v.non_inclusive_hyponym_count().map(|_| ()))?;
        self.warm("depths", |v| {
            v.depth_min()?;
            v.depth_max().map(|_| ())
        })?;
        self.warm("leaf counts", |v| v.non_inclusive_subsumed_leaf_count().map(|_| ()))?;
        Ok(())
    }

    fn warm<F>(&self, phase: &str, op: F) -> Result<()>
    where
        F: Fn(Vertex<'_>) -> Result<()> + Sync,
    {
        let count = self.vertex_count();
        if self.config().parallel_warmup {
            (0..count)
                .into_par_iter()
                .try_for_each(|i| op(Vertex::new(self, VertexIdx(i))))?;
        } else {
            (0..count).try_for_each(|i| op(Vertex::new(self, VertexIdx(i))))?;
        }
        tracing::debug!(phase, "warm-up phase done");
        Ok(())
    }

    /// Sum of the probability attribute over every leaf.
    #[must_use]
    pub fn sum_leaf_probability(&self) -> f64 {
        self.vertices()
            .iter()
            .filter(|v| v.is_leaf())
            .map(Vertex::probability)
            .sum()
    }
}

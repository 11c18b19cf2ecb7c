// src/taxonomy/types.rs
//! Identifiers and arc orientation shared by the taxonomy arenas.

use std::fmt;

/// Caller-assigned vertex identifier, unique within one taxonomy.
pub type VertexId = u32;

/// Position of a vertex record in the taxonomy arena.
///
/// Handles are only meaningful for the taxonomy that produced them and are
/// invalidated by [`Taxonomy::clear`](super::Taxonomy::clear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIdx(pub(crate) usize);

/// Position of an edge record in the taxonomy arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(pub(crate) usize);

/// Position of a half-edge record in the taxonomy arena.
///
/// Half-edges are allocated in pairs: the direct half of edge `e` sits at
/// `2e` and the inverse half at `2e + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeIdx(pub(crate) usize);

impl VertexIdx {
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl EdgeIdx {
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    #[must_use]
    pub(crate) fn direct(self) -> HalfEdgeIdx {
        HalfEdgeIdx(self.0 * 2)
    }

    #[must_use]
    pub(crate) fn inverse(self) -> HalfEdgeIdx {
        HalfEdgeIdx(self.0 * 2 + 1)
    }
}

impl HalfEdgeIdx {
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    /// The paired half-edge running the other way.
    #[must_use]
    pub(crate) fn opposite(self) -> HalfEdgeIdx {
        HalfEdgeIdx(self.0 ^ 1)
    }

    #[must_use]
    pub(crate) fn edge(self) -> EdgeIdx {
        EdgeIdx(self.0 / 2)
    }
}

/// Orientation of a half-edge as seen from the vertex that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientedEdgeType {
    /// Points to a parent.
    SubClassOf,
    /// Points to a child.
    SuperClassOf,
}

impl OrientedEdgeType {
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::SubClassOf => Self::SuperClassOf,
            Self::SuperClassOf => Self::SubClassOf,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SubClassOf => "SubClassOf",
            Self::SuperClassOf => "SuperClassOf",
        }
    }
}

impl fmt::Display for OrientedEdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

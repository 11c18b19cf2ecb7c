// src/taxonomy/mod.rs
//! In-memory is-a taxonomy encoded as a half-edge structure.
//!
//! Vertices, edges and half-edges live in arenas owned by [`Taxonomy`] and are
//! addressed by integer handles. Every outgoing arc of a vertex sits on one
//! circular ring, which all traversals (ancestors, hyponyms, depths,
//! shortest paths) walk directly.

mod cancel;
mod depth;
mod distance;
mod graph;
mod half_edge;
mod list;
mod queries;
mod ring;
mod traversal;
mod types;
mod vertex;

pub use self::cancel::CancelHandle;
pub use self::distance::{DistanceField, EdgeWeighting};
pub use self::graph::Taxonomy;
pub use self::half_edge::{Edge, EdgeMut, EdgeWeights, HalfEdge};
pub use self::list::{Edges, VertexIter, VertexList, VertexSet, Vertices};
pub use self::ring::Arcs;
pub use self::types::{EdgeIdx, HalfEdgeIdx, OrientedEdgeType, VertexId, VertexIdx};
pub use self::vertex::{Vertex, VertexMut};

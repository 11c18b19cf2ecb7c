// src/lib.rs
//! Half-edge taxonomy engine: is-a DAG storage, ancestor and hyponym
//! traversal, depths, common subsumers and shortest paths.

pub mod cli;
pub mod config;
pub mod error;
pub mod exit;
pub mod io;
pub mod taxonomy;

pub use error::{Result, TaxonomyError};
pub use taxonomy::{Taxonomy, Vertex, VertexId, VertexList, VertexSet};

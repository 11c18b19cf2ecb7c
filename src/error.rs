// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::taxonomy::VertexId;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("the taxonomy already contains a vertex with id {0}")]
    DuplicateId(VertexId),

    #[error("vertex {vertex} references parent {parent}, which is not in the taxonomy")]
    MissingParent { vertex: VertexId, parent: VertexId },

    #[error("vertex {0} is not in the taxonomy")]
    UnknownVertex(VertexId),

    #[error("vertexes {0} and {1} do not share a common ancestor")]
    NoCommonAncestor(VertexId, VertexId),

    #[error("no MICA vertex was found for vertexes {0} and {1}")]
    NoMicaFound(VertexId, VertexId),

    #[error("traversal interrupted by a cancellation request")]
    Interrupted,

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("records {0:?} can never be inserted: their parents form a cycle")]
    UnresolvedRecords(Vec<VertexId>),

    #[error("config error: {0}")]
    Config(String),
}

impl TaxonomyError {
    /// True for failures raised while building the graph.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::DuplicateId(_) | Self::MissingParent { .. } | Self::UnresolvedRecords(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TaxonomyError>;

// Allow `?` on std::io::Error by converting to TaxonomyError::Io with unknown path.
impl From<std::io::Error> for TaxonomyError {
    fn from(source: std::io::Error) -> Self {
        TaxonomyError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<toml::de::Error> for TaxonomyError {
    fn from(e: toml::de::Error) -> Self {
        TaxonomyError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for TaxonomyError {
    fn from(e: toml::ser::Error) -> Self {
        TaxonomyError::Config(e.to_string())
    }
}

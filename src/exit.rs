// src/exit.rs
//! Process exit codes for `taxon`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

use crate::error::TaxonomyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TaxonExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, config).
    Error = 1,
    /// Input could not be parsed (malformed line, bad config value).
    InvalidInput = 2,
    /// The records do not form a valid taxonomy (duplicate id, missing parent, cycle).
    InvalidTaxonomy = 3,
    /// A query had no answer (unknown vertex, no common ancestor).
    QueryFailed = 4,
    /// A traversal was cancelled.
    Interrupted = 5,
}

impl TaxonExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

impl Termination for TaxonExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<&TaxonomyError> for TaxonExit {
    fn from(err: &TaxonomyError) -> Self {
        match err {
            e if e.is_structural() => Self::InvalidTaxonomy,
            TaxonomyError::Parse { .. } | TaxonomyError::Config(_) => Self::InvalidInput,
            TaxonomyError::UnknownVertex(_)
            | TaxonomyError::NoCommonAncestor(..)
            | TaxonomyError::NoMicaFound(..) => Self::QueryFailed,
            TaxonomyError::Interrupted => Self::Interrupted,
            _ => Self::Error,
        }
    }
}

impl From<&anyhow::Error> for TaxonExit {
    fn from(err: &anyhow::Error) -> Self {
        err.downcast_ref::<TaxonomyError>()
            .map_or(Self::Error, Self::from)
    }
}

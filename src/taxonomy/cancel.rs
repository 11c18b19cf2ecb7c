// src/taxonomy/cancel.rs
//! Cooperative cancellation for long traversals.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{Result, TaxonomyError};

/// Shared flag that aborts running traversals of one taxonomy.
///
/// The flag stays raised until [`CancelHandle::reset`] is called, so every
/// traversal started in the meantime fails as well.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    requested: Arc<AtomicBool>,
}

impl CancelHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.requested.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

/// Per-traversal polling point.
///
/// Creating a checkpoint counts one traversal; [`Checkpoint::step`] polls the
/// cancellation flag on the first step and then every `interval` steps.
pub(crate) struct Checkpoint<'a> {
    flag: &'a CancelHandle,
    interval: usize,
    steps: usize,
}

impl<'a> Checkpoint<'a> {
    pub(crate) fn new(flag: &'a CancelHandle, counter: &AtomicUsize, interval: usize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self {
            flag,
            interval: interval.max(1),
            steps: 0,
        }
    }

    pub(crate) fn step(&mut self) -> Result<()> {
        let poll = self.steps % self.interval == 0;
        self.steps += 1;
        if poll && self.flag.is_cancelled() {
            return Err(TaxonomyError::Interrupted);
        }
        Ok(())
    }
}

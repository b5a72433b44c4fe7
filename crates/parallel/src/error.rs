//! Errors returned by the parallel for-each.

use thiserror::Error;

/// Why a parallel for-each stopped early.
///
/// `E` is the error type returned by the caller's work items.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParallelError<E> {
    /// A work item returned an error; admission stopped and in-flight work
    /// finished before this was returned
    #[error("Work item failed: {0}")]
    Failed(E),

    /// A work item panicked
    #[error("Work item panicked: {0}")]
    Panicked(String),

    /// The cancellation token fired before every item was admitted
    #[error("Cancelled after {completed} completed work items")]
    Cancelled { completed: usize },
}

impl<E> ParallelError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

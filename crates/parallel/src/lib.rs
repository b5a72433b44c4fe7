//! extkit Parallel - Bounded async for-each
//!
//! Fans async work items out to tokio tasks with an optional bound on how
//! many run at once. Callers pass a `CancellationToken` to stop admission.
//!
//! # Design Principles
//!
//! - Room is secured before the next item is pulled, so admission follows input order
//! - In-flight work always finishes; nothing is aborted
//! - The first failure or panic wins and stops admission

pub mod error;
pub mod for_each;
pub mod options;

pub use error::ParallelError;
pub use for_each::{for_each_concurrent, for_each_concurrent_stream, ForEachSummary, ParallelExt};
pub use options::ParallelOptions;

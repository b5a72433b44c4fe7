//! Bounded, cancellable parallel for-each
//!
//! Work items run as tokio tasks. Room for the next item is secured before
//! the next item is pulled from the input, so with a bound of 1 items run
//! strictly in input order. Admission stops on cancellation or on the first
//! failure; tasks already in flight always run to completion.

use std::any::Any;
use std::future::Future;

use async_trait::async_trait;
use futures_util::stream::{self, Stream, StreamExt};
use futures_util::FutureExt;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::error::ParallelError;
use crate::options::ParallelOptions;

/// Counts reported by a parallel for-each that ran every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForEachSummary {
    pub admitted: usize,
    pub completed: usize,
}

/// Run `body` for every item of `items`, at most
/// `options.max_degree_of_parallelism` at a time.
///
/// # Errors
///
/// - [`ParallelError::Failed`] with the first error a work item returned
/// - [`ParallelError::Panicked`] when a work item panicked
/// - [`ParallelError::Cancelled`] when `cancel` fired before every item was admitted
///
/// A token that fires once the input is exhausted does not turn a complete run
/// into `Cancelled`.
pub async fn for_each_concurrent<I, F, Fut, E>(
    items: I,
    options: &ParallelOptions,
    cancel: &CancellationToken,
    body: F,
) -> Result<ForEachSummary, ParallelError<E>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Send + 'static,
{
    for_each_concurrent_stream(stream::iter(items), options, cancel, body).await
}

/// [`for_each_concurrent`] over a [`Stream`].
pub async fn for_each_concurrent_stream<S, F, Fut, E>(
    items: S,
    options: &ParallelOptions,
    cancel: &CancellationToken,
    mut body: F,
) -> Result<ForEachSummary, ParallelError<E>>
where
    S: Stream,
    F: FnMut(S::Item) -> Fut,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Send + 'static,
{
    let limit = options.limit();
    let mut items = std::pin::pin!(items);
    let mut tasks: JoinSet<Result<(), E>> = JoinSet::new();
    let mut tally = Tally::default();
    let mut cancelled = false;

    tracing::debug!(?limit, "Parallel for-each started");

    'admission: loop {
        // Wait for room before pulling the next item
        while limit.is_some_and(|max| tasks.len() >= max) {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    cancelled = true;
                    break 'admission;
                }
                Some(joined) = tasks.join_next() => tally.record(joined),
            }
            if tally.failed() {
                break 'admission;
            }
        }

        while let Some(joined) = tasks.try_join_next() {
            tally.record(joined);
        }
        if tally.failed() {
            break;
        }

        let item = tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                cancelled = true;
                break;
            }
            next = items.next() => match next {
                Some(item) => item,
                None => break,
            },
        };

        tally.admitted += 1;
        tracing::trace!(admitted = tally.admitted, in_flight = tasks.len() + 1, "Admitted work item");
        tasks.spawn(body(item));
    }

    // A token that fires after the last item was admitted cut nothing short
    if cancelled && matches!(items.next().now_or_never(), Some(None)) {
        cancelled = false;
    }

    if cancelled {
        tracing::debug!(in_flight = tasks.len(), "Parallel for-each cancelled, draining");
    }

    while let Some(joined) = tasks.join_next().await {
        tally.record(joined);
    }

    tally.finish(cancelled)
}

/// Method form of [`for_each_concurrent`].
///
/// # Examples
///
/// ```
/// use extkit_parallel::{ParallelExt, ParallelOptions};
/// use tokio_util::sync::CancellationToken;
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let summary = runtime.block_on(async {
///     vec![1, 2, 3]
///         .parallel_for_each(&ParallelOptions::bounded(2), &CancellationToken::new(), |n| async move {
///             if n > 0 { Ok(()) } else { Err("non-positive") }
///         })
///         .await
/// });
/// assert_eq!(summary.unwrap().completed, 3);
/// ```
#[async_trait]
pub trait ParallelExt: IntoIterator + Sized {
    async fn parallel_for_each<F, Fut, E>(
        self,
        options: &ParallelOptions,
        cancel: &CancellationToken,
        body: F,
    ) -> Result<ForEachSummary, ParallelError<E>>
    where
        Self: Send,
        Self::IntoIter: Send,
        Self::Item: Send,
        F: FnMut(Self::Item) -> Fut + Send,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Send + 'static;
}

#[async_trait]
impl<I> ParallelExt for I
where
    I: IntoIterator,
{
    async fn parallel_for_each<F, Fut, E>(
        self,
        options: &ParallelOptions,
        cancel: &CancellationToken,
        body: F,
    ) -> Result<ForEachSummary, ParallelError<E>>
    where
        Self: Send,
        Self::IntoIter: Send,
        Self::Item: Send,
        F: FnMut(Self::Item) -> Fut + Send,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Send + 'static,
    {
        for_each_concurrent(self, options, cancel, body).await
    }
}

/// Progress of one run. Only the first failure is kept.
struct Tally<E> {
    admitted: usize,
    completed: usize,
    failure: Option<ParallelError<E>>,
}

impl<E> Default for Tally<E> {
    fn default() -> Self {
        Self {
            admitted: 0,
            completed: 0,
            failure: None,
        }
    }
}

impl<E> Tally<E> {
    fn record(&mut self, joined: Result<Result<(), E>, JoinError>) {
        self.completed += 1;
        let failure = match joined {
            Ok(Ok(())) => return,
            Ok(Err(error)) => ParallelError::Failed(error),
            Err(join_error) => ParallelError::Panicked(join_failure_message(join_error)),
        };
        if self.failure.is_none() {
            tracing::debug!(completed = self.completed, "Work item failed, stopping admission");
            self.failure = Some(failure);
        }
    }

    fn failed(&self) -> bool {
        self.failure.is_some()
    }

    fn finish(self, cancelled: bool) -> Result<ForEachSummary, ParallelError<E>> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        if cancelled {
            return Err(ParallelError::Cancelled {
                completed: self.completed,
            });
        }
        tracing::debug!(completed = self.completed, "Parallel for-each finished");
        Ok(ForEachSummary {
            admitted: self.admitted,
            completed: self.completed,
        })
    }
}

fn join_failure_message(error: JoinError) -> String {
    if !error.is_panic() {
        return error.to_string();
    }
    panic_message(error.into_panic())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_string(),
            Err(_) => "unknown panic payload".to_string(),
        },
    }
}

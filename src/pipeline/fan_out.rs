//! Bounded worker-pool fan-out
//!
//! Tasks are spawned only after a semaphore permit is acquired, so at most
//! `limit` workers exist at any moment. Each task holds its permit until it
//! finishes. A failing or panicking row is recorded and never stops the batch.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

/// A row whose worker did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// Display form of the input row
    pub row: String,
    pub error: String,
}

/// Outcome of one fan-out batch; no ordering across rows
#[derive(Debug, Serialize)]
pub struct FanOutReport<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<RowFailure>,
}

impl<T> FanOutReport<T> {
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

impl<T> Default for FanOutReport<T> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

/// Run `worker` over every item with at most `limit` running at once
///
/// A `limit` of 0 is treated as 1. Returns once every item has finished.
pub async fn fan_out<I, T, E, W, Fut>(items: Vec<I>, limit: usize, worker: W) -> FanOutReport<T>
where
    I: Display + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
    W: Fn(I) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let limit = limit.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut active_tasks = FuturesUnordered::new();
    let mut report = FanOutReport::default();

    debug!("Fanning out {} rows over {} workers", items.len(), limit);

    for item in items {
        let label = item.to_string();

        // Acquire permit before spawning (limits live workers)
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(p) => p,
            Err(e) => {
                error!("Semaphore closed unexpectedly: {e}");
                report.failed.push(RowFailure {
                    row: label,
                    error: e.to_string(),
                });
                continue;
            }
        };

        let task = worker(item);
        let handle = tokio::spawn(async move {
            let _permit = permit; // Hold until task completes
            task.await
        });
        active_tasks.push(async move { (label, handle.await) });
    }

    while let Some((label, joined)) = active_tasks.next().await {
        match joined {
            Ok(Ok(value)) => report.succeeded.push(value),
            Ok(Err(e)) => {
                warn!("Row failed: {label}: {e}");
                report.failed.push(RowFailure {
                    row: label,
                    error: e.to_string(),
                });
            }
            Err(e) => {
                error!("Worker for {label} panicked: {e}");
                report.failed.push(RowFailure {
                    row: label,
                    error: e.to_string(),
                });
            }
        }
    }

    report
}

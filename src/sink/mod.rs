//! Deduplicating, batching CSV sink
//!
//! A `CsvSink` owns one destination file. Records are deduplicated by their
//! natural key, buffered in a write-queue, and appended to the file whenever
//! the queue reaches its limit or the sink is closed.
//!
//! The queue swap and the state transition happen under one mutex, so a
//! `submit` that races a flush always lands in the fresh queue and is picked
//! up by the next flush. The mutex is never held across an await.

mod csv_store;
mod state;

pub use csv_store::append_batch;
pub use state::{SinkState, SinkStats, Submission};

use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use crate::errors::PersistenceError;
use crate::records::Record;

struct SinkInner<R> {
    state: SinkState,
    queue: Vec<R>,
    seen: HashSet<String>,
    stats: SinkStats,
}

/// Write-queue with duplicate suppression, flushed to one CSV file
pub struct CsvSink<R: Record> {
    path: PathBuf,
    queue_limit: usize,
    inner: Mutex<SinkInner<R>>,
    /// Signalled every time a flush leaves the `Flushing` state
    flush_done: Notify,
}

impl<R: Record> CsvSink<R> {
    /// Create a sink for `path`; nothing is opened until the first flush
    ///
    /// A `queue_limit` of 0 is treated as 1.
    pub fn new(path: impl Into<PathBuf>, queue_limit: usize) -> Self {
        let path = path.into();
        debug!(
            "Initializing CsvSink for {} (queue limit {})",
            path.display(),
            queue_limit
        );
        Self {
            path,
            queue_limit: queue_limit.max(1),
            inner: Mutex::new(SinkInner {
                state: SinkState::Idle,
                queue: Vec::new(),
                seen: HashSet::new(),
                stats: SinkStats::default(),
            }),
            flush_done: Notify::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn state(&self) -> SinkState {
        self.inner.lock().state
    }

    #[must_use]
    pub fn stats(&self) -> SinkStats {
        self.inner.lock().stats
    }

    /// Records currently waiting in the write-queue
    #[must_use]
    pub fn queued(&self) -> usize {
        self.inner.lock().queue.len()
    }

    /// Accept one record
    ///
    /// Duplicates are dropped with a warning. Reaching the queue limit while
    /// no flush is running flushes before returning; a flush error is
    /// returned to the caller even though the record itself was accepted.
    pub async fn submit(&self, record: R) -> Result<Submission, PersistenceError> {
        let should_flush = {
            let mut inner = self.inner.lock();
            if let Some(e) = self.rejection(inner.state) {
                return Err(e);
            }

            let key = record.natural_key().to_string();
            if inner.seen.contains(&key) {
                inner.stats.duplicates += 1;
                warn!("Duplicate item found: {}. Item dropped.", key);
                return Ok(Submission::Duplicate);
            }

            inner.seen.insert(key);
            inner.queue.push(record);
            inner.stats.accepted += 1;

            inner.queue.len() >= self.queue_limit && inner.state == SinkState::Idle
        };

        if should_flush {
            self.flush().await?;
        }
        Ok(Submission::Queued)
    }

    /// Detach the current queue and append it to the backing file
    ///
    /// Waits for an in-flight flush first. Returns the number of rows written;
    /// an empty queue writes nothing and leaves the file untouched. A write
    /// error is fatal: the sink moves to `Failed` and rejects all further use.
    pub async fn flush(&self) -> Result<usize, PersistenceError> {
        let batch = loop {
            let notified = {
                let mut inner = self.inner.lock();
                let state = inner.state;
                match state {
                    SinkState::Closed | SinkState::Failed => {
                        return Err(self.terminal_error(state));
                    }
                    SinkState::Idle => {
                        if inner.queue.is_empty() {
                            return Ok(0);
                        }
                        inner.state = SinkState::Flushing;
                        break std::mem::take(&mut inner.queue);
                    }
                    SinkState::Flushing => self.flush_done.notified(),
                }
            };
            notified.await;
        };

        let result = self.persist(batch).await;

        {
            let mut inner = self.inner.lock();
            match &result {
                Ok(rows) => {
                    inner.state = SinkState::Idle;
                    inner.stats.flushes += 1;
                    inner.stats.rows_written += *rows;
                }
                Err(e) => {
                    // The detached batch is gone and its keys are marked seen
                    inner.state = SinkState::Failed;
                    error!("Failed to write batch to {}: {}", self.path.display(), e);
                }
            }
        }
        self.flush_done.notify_waiters();

        result
    }

    /// Finish any in-flight flush, write what remains, and refuse further use
    ///
    /// The final queue is detached in the same critical section that moves the
    /// sink to `Closed`, so nothing can be accepted after the last write.
    pub async fn close(&self) -> Result<SinkStats, PersistenceError> {
        let batch = loop {
            let notified = {
                let mut inner = self.inner.lock();
                let state = inner.state;
                match state {
                    SinkState::Closed | SinkState::Failed => {
                        return Err(self.terminal_error(state));
                    }
                    SinkState::Idle => {
                        inner.state = SinkState::Closed;
                        break std::mem::take(&mut inner.queue);
                    }
                    SinkState::Flushing => self.flush_done.notified(),
                }
            };
            notified.await;
        };

        let flushed = if batch.is_empty() {
            Ok(0)
        } else {
            self.persist(batch).await
        };

        let stats = {
            let mut inner = self.inner.lock();
            match &flushed {
                Ok(rows) if *rows > 0 => {
                    inner.stats.flushes += 1;
                    inner.stats.rows_written += *rows;
                }
                Ok(_) => {}
                Err(e) => {
                    inner.state = SinkState::Failed;
                    error!("Failed to write final batch to {}: {}", self.path.display(), e);
                }
            }
            inner.stats
        };
        self.flush_done.notify_waiters();
        flushed?;

        info!(
            "Closed sink {}: {} accepted, {} duplicates, {} rows in {} flushes",
            self.path.display(),
            stats.accepted,
            stats.duplicates,
            stats.rows_written,
            stats.flushes
        );
        Ok(stats)
    }

    fn rejection(&self, state: SinkState) -> Option<PersistenceError> {
        state.is_terminal().then(|| self.terminal_error(state))
    }

    fn terminal_error(&self, state: SinkState) -> PersistenceError {
        let path = self.path.display().to_string();
        match state {
            SinkState::Failed => PersistenceError::Failed(path),
            _ => PersistenceError::Closed(path),
        }
    }

    async fn persist(&self, batch: Vec<R>) -> Result<usize, PersistenceError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || append_batch(&path, &batch))
            .await
            .map_err(|e| PersistenceError::WriterTask(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::SearchData;

    fn card(name: &str) -> SearchData {
        SearchData::new(name, "https://pinterest.com/pin/1/", "https://i.pinimg.com/1.jpg")
    }

    #[tokio::test]
    async fn submit_below_limit_stays_queued() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = CsvSink::new(dir.path().join("out.csv"), 10);

        assert_eq!(sink.submit(card("a")).await.expect("submit"), Submission::Queued);
        assert_eq!(sink.queued(), 1);
        assert_eq!(sink.stats().flushes, 0);
        assert!(!sink.path().exists());
    }

    #[tokio::test]
    async fn closed_sink_rejects_submissions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sink = CsvSink::new(dir.path().join("out.csv"), 10);
        sink.close().await.expect("close");

        assert_eq!(sink.state(), SinkState::Closed);
        assert!(matches!(
            sink.submit(card("late")).await,
            Err(PersistenceError::Closed(_))
        ));
        assert!(sink.close().await.is_err());
    }
}

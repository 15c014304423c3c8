//! Sink lifecycle state and counters

use serde::Serialize;

/// Lifecycle of a [`CsvSink`](super::CsvSink)
///
/// `Idle -> Flushing -> Idle` for every successful flush. `Closed` and
/// `Failed` are terminal; a failed write moves the sink to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    Idle,
    Flushing,
    Closed,
    Failed,
}

impl SinkState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Failed)
    }
}

/// Outcome of a single `submit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// New natural key; record is queued (and possibly already flushed)
    Queued,
    /// Natural key already seen; record dropped
    Duplicate,
}

/// Counters for one sink instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SinkStats {
    /// Records accepted (unique natural keys)
    pub accepted: usize,
    /// Records dropped as duplicates
    pub duplicates: usize,
    /// Flushes that wrote a non-empty batch
    pub flushes: usize,
    /// Rows appended to the backing file
    pub rows_written: usize,
}

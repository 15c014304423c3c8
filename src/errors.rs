//! Error types for scraping operations
//!
//! Three layers, mirroring where a failure can happen:
//! - [`PageError`]: a single attempt failed (load timeout, missing element).
//!   Always retried by the fetch loop.
//! - [`FetchError`]: every attempt for one URL failed.
//! - [`PersistenceError`]: writing the backing CSV failed. Never retried.
//!
//! [`ScrapeError`] is the umbrella returned by the pipeline stages.

use thiserror::Error;

/// Result type alias for pipeline stages
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Failure of one page-load-and-extract attempt
#[derive(Debug, Clone, Error)]
pub enum PageError {
    /// Browser process or page could not be created
    #[error("Failed to open browser session: {0}")]
    SessionLaunch(String),

    /// An operation exceeded its time budget
    #[error("{operation} timeout after {secs} seconds")]
    Timeout { operation: String, secs: u64 },

    /// Navigation itself returned an error
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// A required element never appeared within the implicit wait
    #[error("Required element '{selector}' not found")]
    ElementNotFound { selector: String },

    /// A required attribute was absent on a located element
    #[error("Element '{selector}' has no '{attribute}' attribute")]
    MissingAttribute { selector: String, attribute: String },

    /// Any other CDP/browser error
    #[error("Browser error: {0}")]
    Browser(String),
}

impl From<chromiumoxide::error::CdpError> for PageError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Browser(err.to_string())
    }
}

/// Failure of the whole retry loop for one URL
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Max retries exceeded for {url}: {attempts} attempts failed, last error: {last_error}")]
    MaxRetriesExceeded {
        url: String,
        attempts: u32,
        last_error: PageError,
    },
}

impl FetchError {
    /// Total attempts made before giving up
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::MaxRetriesExceeded { attempts, .. } => *attempts,
        }
    }
}

/// Failure while persisting records
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The blocking writer task panicked or was cancelled
    #[error("CSV writer task failed: {0}")]
    WriterTask(String),

    /// Submission or flush attempted after `close()`
    #[error("Sink for {0} is closed")]
    Closed(String),

    /// An earlier write to this sink failed; the sink refuses further use
    #[error("Sink for {0} failed on an earlier write")]
    Failed(String),
}

/// Umbrella error for pipeline stages
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the context chain
        Self::Other(format!("{err:#}"))
    }
}

impl ScrapeError {
    /// True when the error came from exhausting page retries
    #[must_use]
    pub fn is_max_retries(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::MaxRetriesExceeded { .. }))
    }
}

//! Core configuration type for a scrape run
//!
//! `ScrapeConfig` is built once (builder or JSON file) and only read
//! afterwards; session options and proxy settings are derived from it.

use serde::Serialize;
use std::path::PathBuf;

/// Settings for one scrape run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeConfig {
    /// Proxy API key
    #[serde(skip_serializing)]
    pub(crate) api_key: String,
    /// Proxy target geography
    pub(crate) location: String,
    pub(crate) keywords: Vec<String>,
    /// Retries per URL beyond the first attempt
    pub(crate) max_retries: u32,
    /// Concurrent enrichment workers
    pub(crate) max_threads: usize,
    /// Write-queue size that triggers an automatic flush
    pub(crate) storage_queue_limit: usize,
    /// Directory for keyword and per-row CSV files
    pub(crate) output_dir: PathBuf,

    /// Timeout in seconds for `page.goto()` and the following load event
    pub(crate) page_load_timeout_secs: u64,
    /// Seconds to wait for a required element to appear
    pub(crate) implicit_wait_secs: u64,
    /// Base pause between attempts; 0 retries immediately
    pub(crate) retry_backoff_ms: u64,

    pub(crate) headless: bool,
    pub(crate) disable_javascript: bool,
    pub(crate) chrome_executable: Option<PathBuf>,

    /// Milliseconds the proxy waits before returning the page
    pub(crate) proxy_wait_ms: u64,
    /// Route search pages through the proxy
    pub(crate) use_proxy: bool,
    /// Also route pin detail pages through the proxy
    pub(crate) proxy_detail_pages: bool,
}

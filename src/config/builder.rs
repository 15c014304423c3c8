//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! `build()` only exists once the API key has been supplied.

use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::ScrapeConfig;
use crate::errors::ScrapeError;
use crate::utils::{
    DEFAULT_IMPLICIT_WAIT_SECS, DEFAULT_KEYWORD, DEFAULT_LOCATION, DEFAULT_MAX_RETRIES,
    DEFAULT_MAX_THREADS, DEFAULT_PAGE_LOAD_TIMEOUT_SECS, DEFAULT_PROXY_WAIT_MS,
    DEFAULT_STORAGE_QUEUE_LIMIT,
};

// Type states for the builder
pub struct WithApiKey;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) api_key: Option<String>,
    pub(crate) location: String,
    pub(crate) keywords: Vec<String>,
    pub(crate) max_retries: u32,
    pub(crate) max_threads: usize,
    pub(crate) storage_queue_limit: usize,
    pub(crate) output_dir: PathBuf,
    pub(crate) page_load_timeout_secs: u64,
    pub(crate) implicit_wait_secs: u64,
    pub(crate) retry_backoff_ms: u64,
    pub(crate) headless: bool,
    pub(crate) disable_javascript: bool,
    pub(crate) chrome_executable: Option<PathBuf>,
    pub(crate) proxy_wait_ms: u64,
    pub(crate) use_proxy: bool,
    pub(crate) proxy_detail_pages: bool,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            api_key: None,
            location: DEFAULT_LOCATION.to_string(),
            keywords: vec![DEFAULT_KEYWORD.to_string()],
            max_retries: DEFAULT_MAX_RETRIES,
            max_threads: DEFAULT_MAX_THREADS,
            storage_queue_limit: DEFAULT_STORAGE_QUEUE_LIMIT,
            output_dir: PathBuf::from("."),
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            implicit_wait_secs: DEFAULT_IMPLICIT_WAIT_SECS,
            retry_backoff_ms: 0,
            headless: true,
            disable_javascript: true,
            chrome_executable: None,
            proxy_wait_ms: DEFAULT_PROXY_WAIT_MS,
            use_proxy: true,
            proxy_detail_pages: false,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn api_key(self, key: impl Into<String>) -> ScrapeConfigBuilder<WithApiKey> {
        ScrapeConfigBuilder {
            api_key: Some(key.into()),
            location: self.location,
            keywords: self.keywords,
            max_retries: self.max_retries,
            max_threads: self.max_threads,
            storage_queue_limit: self.storage_queue_limit,
            output_dir: self.output_dir,
            page_load_timeout_secs: self.page_load_timeout_secs,
            implicit_wait_secs: self.implicit_wait_secs,
            retry_backoff_ms: self.retry_backoff_ms,
            headless: self.headless,
            disable_javascript: self.disable_javascript,
            chrome_executable: self.chrome_executable,
            proxy_wait_ms: self.proxy_wait_ms,
            use_proxy: self.use_proxy,
            proxy_detail_pages: self.proxy_detail_pages,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when all required fields are set
impl ScrapeConfigBuilder<WithApiKey> {
    /// Validate and build
    ///
    /// # Errors
    /// `ScrapeError::Config` when the API key is blank while the proxy is in
    /// use, or when a worker/queue limit is zero.
    pub fn build(self) -> Result<ScrapeConfig, ScrapeError> {
        let api_key = self.api_key.unwrap_or_default().trim().to_string();

        if self.use_proxy && api_key.is_empty() {
            return Err(ScrapeError::Config(
                "api_key must not be empty when use_proxy is enabled".to_string(),
            ));
        }
        if self.max_threads == 0 {
            return Err(ScrapeError::Config("max_threads must be at least 1".to_string()));
        }
        if self.storage_queue_limit == 0 {
            return Err(ScrapeError::Config(
                "storage_queue_limit must be at least 1".to_string(),
            ));
        }

        let keywords: Vec<String> = self
            .keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        Ok(ScrapeConfig {
            api_key,
            location: self.location,
            keywords,
            max_retries: self.max_retries,
            max_threads: self.max_threads,
            storage_queue_limit: self.storage_queue_limit,
            output_dir: self.output_dir,
            page_load_timeout_secs: self.page_load_timeout_secs,
            implicit_wait_secs: self.implicit_wait_secs,
            retry_backoff_ms: self.retry_backoff_ms,
            headless: self.headless,
            disable_javascript: self.disable_javascript,
            chrome_executable: self.chrome_executable,
            proxy_wait_ms: self.proxy_wait_ms,
            use_proxy: self.use_proxy,
            proxy_detail_pages: self.proxy_detail_pages,
        })
    }
}

//! Builder methods available for all states
//!
//! Optional settings can be applied before or after the API key.

use std::path::PathBuf;

use super::builder::ScrapeConfigBuilder;

impl<State> ScrapeConfigBuilder<State> {
    /// Proxy target country code, e.g. `"us"`
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Keywords to search, in order; blank entries are dropped at build time
    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Retries per URL after the first attempt
    ///
    /// Set to 0 for a single attempt per URL.
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub fn max_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads;
        self
    }

    #[must_use]
    pub fn storage_queue_limit(mut self, limit: usize) -> Self {
        self.storage_queue_limit = limit;
        self
    }

    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set timeout for page navigation and the load event that follows
    ///
    /// Slow proxies can take well over the default 30 seconds; raise this
    /// rather than the retry count when every attempt times out.
    #[must_use]
    pub fn page_load_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.page_load_timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn implicit_wait_secs(mut self, wait_secs: u64) -> Self {
        self.implicit_wait_secs = wait_secs;
        self
    }

    /// Base pause between attempts in milliseconds
    ///
    /// The pause doubles per retry with random jitter. Default 0.
    #[must_use]
    pub fn retry_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.retry_backoff_ms = backoff_ms;
        self
    }

    /// Set browser headless mode
    ///
    /// Headed mode needs a display server and is meant for debugging
    /// selectors by watching the page.
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn disable_javascript(mut self, disable: bool) -> Self {
        self.disable_javascript = disable;
        self
    }

    #[must_use]
    pub fn chrome_executable(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_executable = path;
        self
    }

    #[must_use]
    pub fn proxy_wait_ms(mut self, wait_ms: u64) -> Self {
        self.proxy_wait_ms = wait_ms;
        self
    }

    #[must_use]
    pub fn use_proxy(mut self, enabled: bool) -> Self {
        self.use_proxy = enabled;
        self
    }

    #[must_use]
    pub fn proxy_detail_pages(mut self, enabled: bool) -> Self {
        self.proxy_detail_pages = enabled;
        self
    }
}

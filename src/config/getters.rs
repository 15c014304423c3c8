//! Getter methods and derived settings for `ScrapeConfig`

use std::path::Path;
use std::time::Duration;

use super::types::ScrapeConfig;
use crate::fetcher::RetryPolicy;
use crate::session::SessionOptions;
use crate::utils::{CHROME_USER_AGENT, ProxySettings};

impl ScrapeConfig {
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    #[must_use]
    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    #[must_use]
    pub fn storage_queue_limit(&self) -> usize {
        self.storage_queue_limit
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the configured timeout for `page.goto()` and the load event.
    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    #[must_use]
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn disable_javascript(&self) -> bool {
        self.disable_javascript
    }

    #[must_use]
    pub fn chrome_executable(&self) -> Option<&Path> {
        self.chrome_executable.as_deref()
    }

    #[must_use]
    pub fn proxy_wait_ms(&self) -> u64 {
        self.proxy_wait_ms
    }

    #[must_use]
    pub fn use_proxy(&self) -> bool {
        self.use_proxy
    }

    #[must_use]
    pub fn proxy_detail_pages(&self) -> bool {
        self.proxy_detail_pages
    }

    /// Browser options shared by every session of this run
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            headless: self.headless,
            page_load_timeout: self.page_load_timeout(),
            implicit_wait: self.implicit_wait(),
            disable_javascript: self.disable_javascript,
            user_agent: CHROME_USER_AGENT.to_string(),
            chrome_executable: self.chrome_executable.clone(),
        }
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_backoff())
    }

    /// Proxy for search pages, `None` when proxying is off
    #[must_use]
    pub fn search_proxy(&self) -> Option<ProxySettings> {
        self.use_proxy
            .then(|| ProxySettings::new(&self.api_key, &self.location, self.proxy_wait_ms))
    }

    /// Proxy for pin detail pages, `None` unless both switches are on
    #[must_use]
    pub fn detail_proxy(&self) -> Option<ProxySettings> {
        if self.proxy_detail_pages {
            self.search_proxy()
        } else {
            None
        }
    }
}

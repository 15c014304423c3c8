use std::path::PathBuf;
use std::time::Duration;

use crate::utils::constants::{
    CHROME_USER_AGENT, DEFAULT_IMPLICIT_WAIT_SECS, DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
};

/// Browser launch and page-behaviour settings shared by every session
///
/// Built once from `ScrapeConfig::session_options()` and handed to the
/// session factory behind an `Arc`; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub headless: bool,
    /// Budget for `page.goto()` and the following load event, each
    pub page_load_timeout: Duration,
    /// Budget for a required element to appear
    pub implicit_wait: Duration,
    /// Disable script execution on the page through CDP
    pub disable_javascript: bool,
    pub user_agent: String,
    /// Explicit Chrome binary; searched for when `None`
    pub chrome_executable: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            headless: true,
            page_load_timeout: Duration::from_secs(DEFAULT_PAGE_LOAD_TIMEOUT_SECS),
            implicit_wait: Duration::from_secs(DEFAULT_IMPLICIT_WAIT_SECS),
            disable_javascript: true,
            user_agent: CHROME_USER_AGENT.to_string(),
            chrome_executable: None,
        }
    }
}

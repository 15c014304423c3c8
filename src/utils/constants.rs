//! Shared configuration constants for pinscrape
//!
//! Default values and fixed endpoints used throughout the codebase so that
//! config defaults, builders and tests agree on the same numbers.

/// Pin search endpoint; the keyword goes in the `q` query parameter
pub const SEARCH_URL: &str = "https://www.pinterest.com/search/pins/";

/// Base used to rebuild absolute pin URLs from card hrefs
pub const PIN_BASE_URL: &str = "https://pinterest.com";

/// Forward-proxy endpoint that wraps the target URL
pub const PROXY_ENDPOINT: &str = "https://proxy.scrapeops.io/v1/";

/// Host prefix the proxy leaves on rewritten hrefs
pub const PROXY_HOST_PREFIX: &str = "https://proxy.scrapeops.io";

/// Default proxy target geography
pub const DEFAULT_LOCATION: &str = "us";

/// Milliseconds the proxy waits for the page to settle before returning it
pub const DEFAULT_PROXY_WAIT_MS: u64 = 2000;

/// Default retries per URL, on top of the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default number of concurrent enrichment workers
pub const DEFAULT_MAX_THREADS: usize = 5;

/// Default write-queue size that triggers an automatic flush
pub const DEFAULT_STORAGE_QUEUE_LIMIT: usize = 50;

/// Default `page.goto()` budget
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 30;

/// Default budget for a required element to show up
pub const DEFAULT_IMPLICIT_WAIT_SECS: u64 = 10;

/// Poll interval while waiting for elements
pub const ELEMENT_POLL_INTERVAL_MS: u64 = 200;

/// Keyword searched when the config names none
pub const DEFAULT_KEYWORD: &str = "grilling";

/// Characters of the row name kept in a detail output filename
pub const DETAIL_NAME_PREFIX_LEN: usize = 20;

/// Placeholder stored for optional detail fields that are absent on the page
pub const NOT_AVAILABLE: &str = "n/a";

/// Chrome user agent string presented by every session
///
/// Matches a desktop Chrome 126 build on Windows; bump alongside
/// the managed Chromium revision.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

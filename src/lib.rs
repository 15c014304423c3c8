//! Pin search scraper
//!
//! Searches keywords on a pin board site through a headless Chrome session,
//! deduplicates the result cards into a CSV per keyword, then revisits every
//! card's detail page on a bounded worker pool.
//!
//! ```no_run
//! # use kodegen_tools_pinscrape::{ScrapeConfig, run_crawl};
//! # async fn example() -> Result<(), kodegen_tools_pinscrape::ScrapeError> {
//! let config = ScrapeConfig::builder()
//!     .api_key("scrapeops-key")
//!     .keywords(["grilling", "smoked brisket"])
//!     .max_threads(3)
//!     .build()?;
//! let summary = run_crawl(&config).await?;
//! println!("{} rows enriched", summary.rows_enriched());
//! # Ok(())
//! # }
//! ```

pub mod browser_profile;
pub mod browser_setup;
pub mod config;
pub mod errors;
pub mod extract;
pub mod fetcher;
pub mod pipeline;
pub mod records;
pub mod session;
pub mod sink;
pub mod utils;

pub use browser_setup::{
    download_managed_browser, find_browser_executable, launch_browser, resolve_browser_executable,
};
pub use config::ScrapeConfig;
pub use errors::{FetchError, PageError, PersistenceError, ScrapeError, ScrapeResult};
pub use extract::{PinDetails, SearchCards};
pub use fetcher::{Extractor, Fetcher, RetryPolicy};
pub use pipeline::{
    CrawlSummary, FanOutReport, KeywordReport, RowFailure, fan_out, process_results, run_crawl,
    run_crawl_with, scrape_search_results,
};
pub use records::{PinData, Record, SearchData};
pub use session::{
    BrowserSession, ChromeSession, ChromeSessionFactory, SessionFactory, SessionOptions,
};
pub use sink::{CsvSink, SinkState, SinkStats, Submission};

//! Crawl orchestration
//!
//! Keywords are searched one after another; each keyword file that received
//! rows is then enriched on the worker pool.

pub mod enrich;
pub mod fan_out;
pub mod search_stage;

pub use enrich::{
    EnrichSettings, EnrichmentReport, SearchRow, enrich_row, process_results, read_rows,
};
pub use fan_out::{FanOutReport, RowFailure, fan_out};
pub use search_stage::{KeywordReport, scrape_search_results};

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::ScrapeConfig;
use crate::errors::ScrapeError;
use crate::extract::{PinDetails, SearchCards};
use crate::fetcher::{Extractor, Fetcher};
use crate::records::Record;
use crate::session::{ChromeSessionFactory, SessionFactory};

/// Everything a crawl produced
#[derive(Debug, Default, Serialize)]
pub struct CrawlSummary {
    pub keywords: Vec<KeywordReport>,
    /// Keywords skipped after exhausting their retries
    pub failed_keywords: Vec<String>,
    pub enrichment: Vec<EnrichmentReport>,
}

impl CrawlSummary {
    #[must_use]
    pub fn rows_enriched(&self) -> usize {
        self.enrichment.iter().map(|r| r.rows.succeeded.len()).sum()
    }

    #[must_use]
    pub fn rows_failed(&self) -> usize {
        self.enrichment.iter().map(|r| r.rows.failed.len()).sum()
    }
}

/// Run both stages with the Chrome backend
pub async fn run_crawl(config: &ScrapeConfig) -> Result<CrawlSummary, ScrapeError> {
    let factory = ChromeSessionFactory::new(config.session_options());
    let fetcher = Arc::new(Fetcher::new(factory, config.retry_policy()));
    run_crawl_with(config, fetcher, &SearchCards, Arc::new(PinDetails)).await
}

/// Run both stages over any session backend
///
/// A keyword that exhausts its retries is skipped and logged; later keywords
/// still run. Any other error ends the crawl.
pub async fn run_crawl_with<F, S, D, R>(
    config: &ScrapeConfig,
    fetcher: Arc<Fetcher<F>>,
    search_extractor: &S,
    detail_extractor: Arc<D>,
) -> Result<CrawlSummary, ScrapeError>
where
    F: SessionFactory + 'static,
    S: Extractor<F::Session, Output = Vec<R>>,
    R: Record,
    D: Extractor<F::Session> + 'static,
    D::Output: Record,
{
    info!("Crawl starting...");
    let mut summary = CrawlSummary::default();

    for keyword in config.keywords() {
        match scrape_search_results(&*fetcher, search_extractor, keyword, config).await {
            Ok(report) => summary.keywords.push(report),
            Err(e) if e.is_max_retries() => {
                error!("Skipping keyword '{}': {}", keyword, e);
                summary.failed_keywords.push(keyword.clone());
            }
            Err(e) => return Err(e),
        }
    }
    info!("Crawl complete.");

    let settings = Arc::new(EnrichSettings::from_config(config));
    for report in &summary.keywords {
        if !report.has_rows() {
            info!("No rows for '{}', nothing to enrich", report.keyword);
            continue;
        }
        let enriched = process_results(
            Arc::clone(&fetcher),
            Arc::clone(&detail_extractor),
            &report.path,
            Arc::clone(&settings),
        )
        .await?;
        summary.enrichment.push(enriched);
    }

    info!(
        "Enrichment complete: {} rows enriched, {} failed",
        summary.rows_enriched(),
        summary.rows_failed()
    );
    Ok(summary)
}

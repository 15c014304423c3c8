//! Search stage: one keyword's result page into one CSV file

use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::ScrapeConfig;
use crate::errors::ScrapeError;
use crate::fetcher::{Extractor, Fetcher};
use crate::records::Record;
use crate::session::SessionFactory;
use crate::sink::{CsvSink, SinkStats};
use crate::utils::{keyword_filename, search_url};

/// Output of one keyword's search stage
#[derive(Debug, Clone, Serialize)]
pub struct KeywordReport {
    pub keyword: String,
    pub path: PathBuf,
    pub stats: SinkStats,
}

impl KeywordReport {
    /// True when at least one row reached the file
    #[must_use]
    pub fn has_rows(&self) -> bool {
        self.stats.rows_written > 0
    }
}

/// Search `keyword`, deduplicate the cards, and append them to the keyword file
///
/// Cards are only handed to the sink once an attempt succeeds, so a failed
/// attempt never leaves partial rows behind. `MaxRetriesExceeded` is returned
/// as-is for the caller to decide whether the run continues.
pub async fn scrape_search_results<F, E, R>(
    fetcher: &Fetcher<F>,
    extractor: &E,
    keyword: &str,
    config: &ScrapeConfig,
) -> Result<KeywordReport, ScrapeError>
where
    F: SessionFactory,
    E: Extractor<F::Session, Output = Vec<R>>,
    R: Record,
{
    let url = search_url(keyword)?;
    let target = match config.search_proxy() {
        Some(proxy) => proxy.wrap(&url)?,
        None => url,
    };

    let cards = fetcher.fetch(&target, extractor).await?;
    info!("Found {} cards for '{}'", cards.len(), keyword);

    let path = config.output_dir().join(keyword_filename(keyword));
    let sink = CsvSink::new(&path, config.storage_queue_limit());
    for card in cards {
        sink.submit(card).await?;
    }
    let stats = sink.close().await?;

    Ok(KeywordReport {
        keyword: keyword.to_string(),
        path,
        stats,
    })
}

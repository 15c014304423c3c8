//! Enrichment stage: revisit every search row's detail page
//!
//! Each row gets its own retrying fetch and its own sink scoped to one output
//! file. Rows run on the bounded worker pool; a row failure is isolated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::fan_out::{FanOutReport, fan_out};
use crate::config::ScrapeConfig;
use crate::errors::{PersistenceError, ScrapeError};
use crate::fetcher::{Extractor, Fetcher};
use crate::records::Record;
use crate::session::SessionFactory;
use crate::sink::CsvSink;
use crate::utils::{ProxySettings, detail_output_path};

/// One row read back from a keyword CSV
///
/// Extra columns (such as `image`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchRow {
    pub name: String,
    pub url: String,
}

impl fmt::Display for SearchRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Per-run settings the enrichment workers need
#[derive(Debug, Clone)]
pub struct EnrichSettings {
    pub output_dir: PathBuf,
    pub queue_limit: usize,
    pub max_threads: usize,
    pub proxy: Option<ProxySettings>,
}

impl EnrichSettings {
    #[must_use]
    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self {
            output_dir: config.output_dir().to_path_buf(),
            queue_limit: config.storage_queue_limit(),
            max_threads: config.max_threads(),
            proxy: config.detail_proxy(),
        }
    }
}

/// Enrichment outcome for one keyword file
#[derive(Debug, Serialize)]
pub struct EnrichmentReport {
    pub source: PathBuf,
    /// Output files written by successful rows
    #[serde(flatten)]
    pub rows: FanOutReport<PathBuf>,
}

/// Read `name` and `url` from every row of a search results CSV
pub fn read_rows(path: &Path) -> Result<Vec<SearchRow>, PersistenceError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize::<SearchRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Fetch one row's detail page and persist the result to its own file
///
/// Returns the output path.
pub async fn enrich_row<F, E>(
    fetcher: &Fetcher<F>,
    extractor: &E,
    row: &SearchRow,
    settings: &EnrichSettings,
) -> Result<PathBuf, ScrapeError>
where
    F: SessionFactory,
    E: Extractor<F::Session>,
    E::Output: Record,
{
    let target = match &settings.proxy {
        Some(proxy) => proxy.wrap(&row.url)?,
        None => row.url.clone(),
    };

    let record = fetcher.fetch(&target, extractor).await?;

    let path = detail_output_path(&settings.output_dir, &row.name, &row.url);
    let sink = CsvSink::new(&path, settings.queue_limit);
    sink.submit(record).await?;
    sink.close().await?;

    info!("Successfully parsed: {}", row.url);
    Ok(path)
}

/// Enrich every row of `csv_file` on a pool of `settings.max_threads` workers
///
/// Only reading the input file can fail the whole batch; row failures land in
/// the report.
pub async fn process_results<F, E>(
    fetcher: Arc<Fetcher<F>>,
    extractor: Arc<E>,
    csv_file: &Path,
    settings: Arc<EnrichSettings>,
) -> Result<EnrichmentReport, ScrapeError>
where
    F: SessionFactory + 'static,
    E: Extractor<F::Session> + 'static,
    E::Output: Record,
{
    info!("processing {}", csv_file.display());

    let source = csv_file.to_path_buf();
    let rows = {
        let source = source.clone();
        tokio::task::spawn_blocking(move || read_rows(&source))
            .await
            .map_err(|e| PersistenceError::WriterTask(e.to_string()))??
    };

    let limit = settings.max_threads;
    let report = fan_out(rows, limit, move |row| {
        let fetcher = Arc::clone(&fetcher);
        let extractor = Arc::clone(&extractor);
        let settings = Arc::clone(&settings);
        async move { enrich_row(&*fetcher, &*extractor, &row, &settings).await }
    })
    .await;

    info!(
        "Enriched {} of {} rows from {}",
        report.succeeded.len(),
        report.total(),
        source.display()
    );

    Ok(EnrichmentReport {
        source,
        rows: report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_rows_ignores_extra_columns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("grilling.csv");
        std::fs::write(
            &path,
            "name,url,image\nRibs,https://pinterest.com/pin/1/,https://i.pinimg.com/1.jpg\n",
        )
        .expect("write");

        let rows = read_rows(&path).expect("rows");
        assert_eq!(
            rows,
            vec![SearchRow {
                name: "Ribs".to_string(),
                url: "https://pinterest.com/pin/1/".to_string(),
            }]
        );
    }

    #[test]
    fn read_rows_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(read_rows(&dir.path().join("absent.csv")).is_err());
    }
}

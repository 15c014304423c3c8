// Pin search scraper CLI
//
// Usage: kodegen-pinscrape [config.json]
// Reads the JSON config, runs the search stage for every keyword and then
// enriches each result file. RUST_LOG controls verbosity (default: info).

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kodegen_tools_pinscrape::{ScrapeConfig, run_crawl};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());

    let config = ScrapeConfig::from_json_file(&config_path)
        .with_context(|| format!("Failed to load configuration from {config_path}"))?;

    let summary = run_crawl(&config).await.context("Crawl failed")?;

    for keyword in &summary.failed_keywords {
        warn!("Keyword '{}' was skipped after exhausting retries", keyword);
    }
    info!(
        "Done: {} keyword files, {} rows enriched, {} rows failed",
        summary.keywords.len(),
        summary.rows_enriched(),
        summary.rows_failed()
    );
    info!("Summary:\n{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

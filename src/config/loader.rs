//! Loading `ScrapeConfig` from a flat JSON document
//!
//! Every key except `api_key` is optional and falls back to the builder
//! defaults. Unknown keys are rejected so typos surface instead of silently
//! running with defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::types::ScrapeConfig;
use crate::errors::ScrapeError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    api_key: String,
    location: Option<String>,
    keywords: Option<Vec<String>>,
    max_retries: Option<u32>,
    max_threads: Option<usize>,
    storage_queue_limit: Option<usize>,
    output_dir: Option<PathBuf>,
    page_load_timeout_secs: Option<u64>,
    implicit_wait_secs: Option<u64>,
    retry_backoff_ms: Option<u64>,
    headless: Option<bool>,
    disable_javascript: Option<bool>,
    chrome_executable: Option<PathBuf>,
    proxy_wait_ms: Option<u64>,
    use_proxy: Option<bool>,
    proxy_detail_pages: Option<bool>,
}

impl ScrapeConfig {
    /// Read and validate a JSON config file
    ///
    /// # Errors
    /// `ScrapeError::Config` if the file cannot be read, is not valid JSON, or
    /// fails builder validation.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ScrapeError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&raw)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON config document
    pub fn from_json_str(raw: &str) -> Result<Self, ScrapeError> {
        let file: ConfigFile = serde_json::from_str(raw)
            .map_err(|e| ScrapeError::Config(format!("Invalid config JSON: {e}")))?;

        let mut builder = Self::builder().api_key(file.api_key);

        if let Some(location) = file.location {
            builder = builder.location(location);
        }
        if let Some(keywords) = file.keywords {
            builder = builder.keywords(keywords);
        }
        if let Some(retries) = file.max_retries {
            builder = builder.max_retries(retries);
        }
        if let Some(threads) = file.max_threads {
            builder = builder.max_threads(threads);
        }
        if let Some(limit) = file.storage_queue_limit {
            builder = builder.storage_queue_limit(limit);
        }
        if let Some(dir) = file.output_dir {
            builder = builder.output_dir(dir);
        }
        if let Some(secs) = file.page_load_timeout_secs {
            builder = builder.page_load_timeout_secs(secs);
        }
        if let Some(secs) = file.implicit_wait_secs {
            builder = builder.implicit_wait_secs(secs);
        }
        if let Some(ms) = file.retry_backoff_ms {
            builder = builder.retry_backoff_ms(ms);
        }
        if let Some(headless) = file.headless {
            builder = builder.headless(headless);
        }
        if let Some(disable) = file.disable_javascript {
            builder = builder.disable_javascript(disable);
        }
        if file.chrome_executable.is_some() {
            builder = builder.chrome_executable(file.chrome_executable);
        }
        if let Some(ms) = file.proxy_wait_ms {
            builder = builder.proxy_wait_ms(ms);
        }
        if let Some(enabled) = file.use_proxy {
            builder = builder.use_proxy(enabled);
        }
        if let Some(enabled) = file.proxy_detail_pages {
            builder = builder.proxy_detail_pages(enabled);
        }

        builder.build()
    }
}

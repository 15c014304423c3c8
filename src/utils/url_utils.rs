//! URL and path helpers for search targets, proxy wrapping and output files.

use std::path::{Path, PathBuf};
use url::Url;
use xxhash_rust::xxh3::xxh3_64;

use super::constants::{
    DETAIL_NAME_PREFIX_LEN, PIN_BASE_URL, PROXY_ENDPOINT, PROXY_HOST_PREFIX, SEARCH_URL,
};
use crate::errors::ScrapeError;

/// Build the pin search URL for a keyword
///
/// Spaces are form-encoded as `+`, matching what the site's own search box
/// produces (`?q=grilling+recipes&rs=typed`).
pub fn search_url(keyword: &str) -> Result<String, ScrapeError> {
    let mut url = Url::parse(SEARCH_URL).map_err(|e| ScrapeError::InvalidUrl {
        url: SEARCH_URL.to_string(),
        message: e.to_string(),
    })?;
    url.query_pairs_mut()
        .append_pair("q", keyword.trim())
        .append_pair("rs", "typed");
    Ok(url.into())
}

/// Credentials and geography for the forward proxy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub api_key: String,
    pub country: String,
    pub wait_ms: u64,
}

impl ProxySettings {
    #[must_use]
    pub fn new(api_key: impl Into<String>, country: impl Into<String>, wait_ms: u64) -> Self {
        Self {
            api_key: api_key.into(),
            country: country.into(),
            wait_ms,
        }
    }

    /// Wrap `target` so the request goes through the proxy endpoint
    pub fn wrap(&self, target: &str) -> Result<String, ScrapeError> {
        if !is_valid_url(target) {
            return Err(ScrapeError::InvalidUrl {
                url: target.to_string(),
                message: "proxy target must be an absolute http(s) URL".to_string(),
            });
        }

        let mut url = Url::parse(PROXY_ENDPOINT).map_err(|e| ScrapeError::InvalidUrl {
            url: PROXY_ENDPOINT.to_string(),
            message: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("url", target)
            .append_pair("country", &self.country)
            .append_pair("wait", &self.wait_ms.to_string());
        Ok(url.into())
    }
}

/// Turn a card href into an absolute pin URL
///
/// Hrefs read through the proxy carry the proxy host; strip it and rebase
/// onto the site. Already-absolute site URLs pass through unchanged.
#[must_use]
pub fn pin_url_from_href(href: &str) -> String {
    let href = href.trim();
    let path = href.strip_prefix(PROXY_HOST_PREFIX).unwrap_or(href);

    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    if path.starts_with('/') {
        format!("{PIN_BASE_URL}{path}")
    } else {
        format!("{PIN_BASE_URL}/{path}")
    }
}

/// Output filename for a keyword's search results
#[must_use]
pub fn keyword_filename(keyword: &str) -> String {
    let slug = keyword.trim().replace(' ', "-");
    format!("{}.csv", sanitize_filename::sanitize(slug))
}

/// Output path for one enriched row
///
/// The first 20 characters of the name keep files recognisable; the URL
/// hash suffix keeps two rows with the same name prefix apart.
#[must_use]
pub fn detail_output_path(output_dir: &Path, name: &str, url: &str) -> PathBuf {
    let prefix: String = name
        .trim()
        .chars()
        .take(DETAIL_NAME_PREFIX_LEN)
        .collect::<String>()
        .replace(' ', "-");
    let prefix = sanitize_filename::sanitize(prefix);
    let prefix = if prefix.is_empty() { "pin".to_string() } else { prefix };

    let hash = xxh3_64(url.as_bytes());
    output_dir.join(format!("{prefix}-{hash:016x}.csv"))
}

/// Check if a URL is an absolute http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

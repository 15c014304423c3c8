//! Retrying page fetch
//!
//! One attempt = open a fresh session, load the URL, run the extractor,
//! release the session. Every attempt failure is retried until the budget is
//! spent; the loop never aborts early on a particular error kind.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::errors::{FetchError, PageError};
use crate::session::{BrowserSession, SessionFactory};

/// How many times to retry and how long to pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts = `max_retries + 1`
    pub max_retries: u32,
    /// Base pause between attempts; zero retries immediately
    pub backoff: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(crate::utils::DEFAULT_MAX_RETRIES, Duration::ZERO)
    }
}

/// Pulls structured data out of a loaded page
#[async_trait]
pub trait Extractor<S: BrowserSession>: Send + Sync {
    type Output: Send;

    async fn extract(&self, session: &mut S) -> Result<Self::Output, PageError>;
}

/// Retry loop over a session factory
pub struct Fetcher<F> {
    factory: F,
    policy: RetryPolicy,
}

impl<F: SessionFactory> Fetcher<F> {
    pub fn new(factory: F, policy: RetryPolicy) -> Self {
        Self { factory, policy }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch `url` and extract from it, retrying on any attempt failure
    ///
    /// Sessions never overlap: each attempt's session is released before the
    /// next attempt opens one.
    pub async fn fetch<E>(&self, url: &str, extractor: &E) -> Result<E::Output, FetchError>
    where
        E: Extractor<F::Session>,
    {
        let attempts = self.policy.total_attempts();
        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                retry_pause(self.policy.backoff, attempt).await;
            }

            match self.attempt(url, extractor).await {
                Ok(output) => {
                    info!("Successfully parsed data from: {}", url);
                    return Ok(output);
                }
                Err(e) => {
                    error!("Exception thrown: {}", e);
                    warn!(
                        "Failed to process page: {}, retries left: {}",
                        url,
                        attempts - attempt - 1
                    );
                    last_error = Some(e);
                }
            }
        }

        let last_error = last_error.unwrap_or_else(|| PageError::Browser("no attempt made".into()));
        Err(FetchError::MaxRetriesExceeded {
            url: url.to_string(),
            attempts,
            last_error,
        })
    }

    async fn attempt<E>(&self, url: &str, extractor: &E) -> Result<E::Output, PageError>
    where
        E: Extractor<F::Session>,
    {
        let mut session = self.factory.open().await?;

        let outcome = async {
            session.load(url).await?;
            extractor.extract(&mut session).await
        }
        .await;

        session.release().await;
        outcome
    }
}

/// Sleep before attempt number `attempt` (1-based retry index)
///
/// Exponential in the retry index with up to one base interval of jitter.
/// A zero base skips the pause entirely.
pub async fn retry_pause(base: Duration, attempt: u32) {
    if base.is_zero() {
        return;
    }
    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let exp = 2u64.saturating_pow(attempt.saturating_sub(1));
    let jitter = rand::rng().random_range(0..=base_ms);
    let delay = base_ms.saturating_mul(exp).saturating_add(jitter);

    warn!("Retrying in {}ms", delay);
    tokio::time::sleep(Duration::from_millis(delay)).await;
}

//! Test utilities for the pinscrape test suite
//!
//! `ScriptedFactory` hands out in-memory sessions whose loads fail or succeed
//! according to a script, and records how sessions were opened and released.

#![allow(dead_code)]

use async_trait::async_trait;
use kodegen_tools_pinscrape::{
    BrowserSession, Extractor, PageError, PinData, SearchData, SessionFactory,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Shared counters and failure script
#[derive(Default)]
pub struct MockState {
    pub opens: AtomicUsize,
    pub releases: AtomicUsize,
    live: AtomicUsize,
    pub max_live: AtomicUsize,
    /// Loads that fail before any load succeeds, across all sessions
    fail_first: AtomicUsize,
    /// Loads of URLs containing any of these always fail
    fail_urls: Mutex<Vec<String>>,
    /// URLs loaded, in order
    pub loaded: Mutex<Vec<String>>,
    load_delay: Mutex<Duration>,
}

impl MockState {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn should_fail(&self, url: &str) -> bool {
        if self.fail_urls.lock().iter().any(|pat| url.contains(pat.as_str())) {
            return true;
        }
        self.fail_first
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Factory whose sessions follow the shared script
#[derive(Clone, Default)]
pub struct ScriptedFactory {
    pub state: Arc<MockState>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `n` loads fail, whatever the URL
    pub fn failing_first(self, n: usize) -> Self {
        self.state.fail_first.store(n, Ordering::SeqCst);
        self
    }

    /// Every load of a URL containing `pattern` fails
    pub fn failing_url(self, pattern: impl Into<String>) -> Self {
        self.state.fail_urls.lock().push(pattern.into());
        self
    }

    /// Each load sleeps this long before completing
    pub fn with_load_delay(self, delay: Duration) -> Self {
        *self.state.load_delay.lock() = delay;
        self
    }
}

pub struct MockSession {
    state: Arc<MockState>,
    url: Option<String>,
}

impl MockSession {
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

#[async_trait]
impl SessionFactory for ScriptedFactory {
    type Session = MockSession;

    async fn open(&self) -> Result<MockSession, PageError> {
        self.state.opens.fetch_add(1, Ordering::SeqCst);
        let live = self.state.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_live.fetch_max(live, Ordering::SeqCst);
        Ok(MockSession {
            state: Arc::clone(&self.state),
            url: None,
        })
    }
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn load(&mut self, url: &str) -> Result<(), PageError> {
        let delay = *self.state.load_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.state.loaded.lock().push(url.to_string());

        if self.state.should_fail(url) {
            return Err(PageError::Timeout {
                operation: "Page load".to_string(),
                secs: 30,
            });
        }
        self.url = Some(url.to_string());
        Ok(())
    }

    async fn release(self) {
        self.state.live.fetch_sub(1, Ordering::SeqCst);
        self.state.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Yields a fixed set of cards for any loaded page
pub struct FixedCards {
    pub names: Vec<String>,
}

impl FixedCards {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Extractor<MockSession> for FixedCards {
    type Output = Vec<SearchData>;

    async fn extract(&self, _session: &mut MockSession) -> Result<Vec<SearchData>, PageError> {
        Ok(self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                SearchData::new(
                    name,
                    &format!("https://pinterest.com/pin/{i}/"),
                    &format!("https://i.pinimg.com/{i}.jpg"),
                )
            })
            .collect())
    }
}

/// Builds a detail record from the loaded URL
pub struct UrlDetails;

#[async_trait]
impl Extractor<MockSession> for UrlDetails {
    type Output = PinData;

    async fn extract(&self, session: &mut MockSession) -> Result<PinData, PageError> {
        let url = session.url().ok_or_else(|| PageError::ElementNotFound {
            selector: "body".to_string(),
        })?;
        Ok(PinData::new(
            &format!("creator of {url}"),
            "https://example.com",
            5,
            "1.2k",
            "n/a",
        ))
    }
}

/// Number of lines in a text file
pub fn line_count(path: &std::path::Path) -> usize {
    std::fs::read_to_string(path)
        .map(|s| s.lines().count())
        .unwrap_or(0)
}

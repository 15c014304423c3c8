//! Browser session abstraction
//!
//! A session is one browser process with one page, opened for exactly one
//! fetch attempt and released before the next attempt starts. The fetch loop
//! only sees these traits; `chrome` provides the chromiumoxide backend.

pub mod chrome;
pub mod element_wait;
mod options;
pub mod page_timeout;

pub use chrome::{ChromeSession, ChromeSessionFactory};
pub use options::SessionOptions;
pub use page_timeout::with_page_timeout;

use async_trait::async_trait;

use crate::errors::PageError;

/// One live browser session
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate to `url` and wait for the load to finish, within the load timeout
    async fn load(&mut self, url: &str) -> Result<(), PageError>;

    /// Tear the session down; failures are logged, never returned
    async fn release(self);
}

/// Opens fresh sessions from one immutable set of options
#[async_trait]
pub trait SessionFactory: Send + Sync {
    type Session: BrowserSession;

    async fn open(&self) -> Result<Self::Session, PageError>;
}

//! chromiumoxide session backend
//!
//! Every `open()` launches a dedicated Chrome process against its own
//! throwaway profile directory. Releasing the session closes the page, shuts
//! the process down and removes the profile.

use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::SetScriptExecutionDisabledParams;
use chromiumoxide::page::Page;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::page_timeout::with_page_timeout;
use super::{BrowserSession, SessionFactory, SessionOptions};
use crate::browser_profile::{PROFILE_PREFIX, create_unique_profile_with_prefix, remove_profile_dir};
use crate::browser_setup::{launch_browser, resolve_browser_executable};
use crate::errors::PageError;

/// Browser process plus the task driving its CDP connection
///
/// `shutdown()` is the normal exit path. Drop is the fallback: it aborts the
/// handler (which lets chromiumoxide kill the child) and removes the profile.
pub struct BrowserHandle {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserHandle {
    fn new(browser: Browser, handler: JoinHandle<()>, user_data_dir: PathBuf) -> Self {
        Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
        }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close the browser, wait for the process to exit, then remove the profile
    ///
    /// The profile must outlive the process; Chrome keeps files locked in it.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.handler.abort();
        self.cleanup_profile();
    }

    fn cleanup_profile(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            remove_profile_dir(&path);
        }
    }
}

impl Drop for BrowserHandle {
    fn drop(&mut self) {
        self.handler.abort();
        if self.user_data_dir.is_some() {
            warn!("BrowserHandle dropped without shutdown - removing profile in Drop");
            self.cleanup_profile();
        }
    }
}

/// One Chrome process with one page
pub struct ChromeSession {
    handle: BrowserHandle,
    page: Page,
    options: Arc<SessionOptions>,
}

impl ChromeSession {
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn load(&mut self, url: &str) -> Result<(), PageError> {
        let timeout = self.options.page_load_timeout;
        let page = &self.page;

        with_page_timeout(
            async {
                page.goto(url)
                    .await
                    .map(|_| ())
                    .map_err(|e| PageError::Navigation {
                        url: url.to_string(),
                        message: e.to_string(),
                    })
            },
            timeout,
            "Page navigation",
        )
        .await?;

        with_page_timeout(
            async {
                page.wait_for_navigation()
                    .await
                    .map(|_| ())
                    .map_err(PageError::from)
            },
            timeout,
            "Page load",
        )
        .await?;

        info!("Fetched {}", url);
        Ok(())
    }

    async fn release(self) {
        let Self { handle, page, .. } = self;
        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }
        handle.shutdown().await;
    }
}

/// Opens `ChromeSession`s from shared, immutable options
///
/// The browser executable is located (or downloaded) by the first `open()`
/// and reused by every later one, including from clones of the factory.
#[derive(Debug, Clone)]
pub struct ChromeSessionFactory {
    options: Arc<SessionOptions>,
    executable: Arc<OnceCell<PathBuf>>,
}

impl ChromeSessionFactory {
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options: Arc::new(options),
            executable: Arc::new(OnceCell::new()),
        }
    }

    /// Resolved browser executable, if an `open()` has located it yet
    #[must_use]
    pub fn resolved_executable(&self) -> Option<&Path> {
        self.executable.get().map(PathBuf::as_path)
    }

    async fn executable(&self) -> anyhow::Result<&Path> {
        let path = self
            .executable
            .get_or_try_init(|| {
                resolve_browser_executable(self.options.chrome_executable.as_deref())
            })
            .await?;
        Ok(path.as_path())
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    async fn prepare_page(&self, handle: &BrowserHandle) -> anyhow::Result<Page> {
        let page = handle.browser().new_page("about:blank").await?;
        if self.options.disable_javascript {
            page.execute(SetScriptExecutionDisabledParams::new(true))
                .await?;
        }
        Ok(page)
    }
}

#[async_trait]
impl SessionFactory for ChromeSessionFactory {
    type Session = ChromeSession;

    async fn open(&self) -> Result<ChromeSession, PageError> {
        let launch_error = |e: anyhow::Error| PageError::SessionLaunch(format!("{e:#}"));

        let chrome_path = self.executable().await.map_err(launch_error)?;
        let profile = create_unique_profile_with_prefix(PROFILE_PREFIX).map_err(launch_error)?;
        let (browser, handler) = launch_browser(&self.options, chrome_path, profile.path())
            .await
            .map_err(launch_error)?;
        // The handle owns profile cleanup from here on
        let handle = BrowserHandle::new(browser, handler, profile.into_path());

        match self.prepare_page(&handle).await {
            Ok(page) => {
                debug!("Opened Chrome session");
                Ok(ChromeSession {
                    handle,
                    page,
                    options: Arc::clone(&self.options),
                })
            }
            Err(e) => {
                handle.shutdown().await;
                Err(launch_error(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn executable_is_resolved_once_and_shared_by_clones() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fake = dir.path().join("chrome");
        std::fs::write(&fake, b"").expect("write");

        let factory = ChromeSessionFactory::new(SessionOptions {
            chrome_executable: Some(fake.clone()),
            ..SessionOptions::default()
        });
        let clone = factory.clone();
        assert!(clone.resolved_executable().is_none());

        assert_eq!(factory.executable().await.expect("resolve"), fake.as_path());

        // Removing the binary does not trigger a second search
        std::fs::remove_file(&fake).expect("remove");
        assert_eq!(clone.resolved_executable(), Some(fake.as_path()));
        assert_eq!(clone.executable().await.expect("cached"), fake.as_path());
    }
}

//! Locating, downloading and launching Chrome

use anyhow::{Context, Result, anyhow};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, trace, warn};

use crate::session::SessionOptions;

/// Flags that make the automated browser look like a regular desktop one
/// and keep it from doing background work between page loads
const STEALTH_ARGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-infobars",
    "--disable-notifications",
    "--disable-dev-shm-usage",
    "--disable-setuid-sandbox",
    "--no-first-run",
    "--no-default-browser-check",
    "--no-sandbox",
    "--disable-extensions",
    "--disable-popup-blocking",
    "--disable-background-networking",
    "--disable-breakpad",
    "--disable-features=TranslateUI",
    "--metrics-recording-only",
    "--password-store=basic",
    "--use-mock-keychain",
    "--hide-scrollbars",
    "--mute-audio",
];

#[cfg(target_os = "windows")]
const INSTALL_PATHS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files\Chromium\Application\chrome.exe",
];

#[cfg(target_os = "macos")]
const INSTALL_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/opt/homebrew/bin/chromium",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const INSTALL_PATHS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/usr/local/bin/chromium",
    "/opt/google/chrome/chrome",
];

const PATH_COMMANDS: &[&str] = &["chromium", "chromium-browser", "google-chrome", "chrome"];

fn expand_home(raw: &str) -> Option<PathBuf> {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(raw)),
    }
}

async fn which(command: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(command).output().await.ok()?;
    if !output.status.success() {
        return None;
    }
    let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!found.is_empty()).then(|| PathBuf::from(found))
}

/// Find a Chrome/Chromium executable
///
/// Order: `preferred` (from config), `CHROMIUM_PATH`, well-known install
/// locations, then `which` on Unix. A configured path that does not exist is
/// logged and skipped.
pub async fn find_browser_executable(preferred: Option<&Path>) -> Result<PathBuf> {
    let env_path = std::env::var_os("CHROMIUM_PATH").map(PathBuf::from);

    let configured = [
        ("config", preferred.map(Path::to_path_buf)),
        ("CHROMIUM_PATH", env_path),
    ];
    for (source, candidate) in configured {
        let Some(path) = candidate else { continue };
        if path.exists() {
            info!("Using browser from {}: {}", source, path.display());
            return Ok(path);
        }
        warn!("Browser path from {} does not exist: {}", source, path.display());
    }

    if let Some(path) = INSTALL_PATHS
        .iter()
        .filter_map(|raw| expand_home(raw))
        .find(|path| path.exists())
    {
        info!("Found browser at: {}", path.display());
        return Ok(path);
    }

    if !cfg!(target_os = "windows") {
        for command in PATH_COMMANDS {
            if let Some(path) = which(command).await {
                info!("Found browser on PATH: {}", path.display());
                return Ok(path);
            }
        }
    }

    warn!("No Chrome/Chromium executable found");
    Err(anyhow!("Chrome/Chromium executable not found"))
}

/// Download a managed Chromium into the user cache and return its executable
pub async fn download_managed_browser() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| {
            let fallback = std::env::temp_dir();
            warn!(
                "No user cache directory, downloading Chromium under {}",
                fallback.display()
            );
            fallback
        })
        .join("kodegen_pinscrape")
        .join("chromium");

    info!("Downloading managed Chromium into {}", cache_dir.display());
    std::fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

    let options = BrowserFetcherOptions::builder()
        .with_path(&cache_dir)
        .build()
        .context("Failed to build fetcher options")?;
    let revision = BrowserFetcher::new(options)
        .fetch()
        .await
        .context("Failed to fetch browser")?;

    info!("Managed Chromium ready at {}", revision.folder_path.display());
    Ok(revision.executable_path)
}

/// Find a local browser, falling back to a managed download
///
/// Callers resolve this once and reuse the path for every launch; concurrent
/// downloads into the shared cache directory would race.
pub async fn resolve_browser_executable(preferred: Option<&Path>) -> Result<PathBuf> {
    match find_browser_executable(preferred).await {
        Ok(path) => Ok(path),
        Err(_) => download_managed_browser().await,
    }
}

/// Launch one browser process for a session
///
/// `user_data_dir` must already exist and belong to this launch alone; the
/// caller removes it after the browser exits.
///
/// The returned handler task drives the CDP connection and MUST be aborted
/// once the browser is closed.
pub async fn launch_browser(
    options: &SessionOptions,
    chrome_path: &Path,
    user_data_dir: &Path,
) -> Result<(Browser, JoinHandle<()>)> {
    let mut builder = BrowserConfigBuilder::default()
        .request_timeout(options.page_load_timeout)
        .window_size(1920, 1080)
        .user_data_dir(user_data_dir)
        .chrome_executable(chrome_path)
        .arg(format!("--user-agent={}", options.user_agent));

    builder = if options.headless {
        builder.headless_mode(HeadlessMode::default())
    } else {
        builder.with_head()
    };

    for arg in STEALTH_ARGS {
        builder = builder.arg(*arg);
    }

    let config = builder
        .build()
        .map_err(|e| anyhow!("Failed to build browser config: {e}"))?;

    let (browser, mut handler) = Browser::launch(config)
        .await
        .context("Failed to launch browser")?;
    debug!("Browser launched with profile {}", user_data_dir.display());

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            let Err(e) = event else { continue };
            let message = e.to_string();

            // Chrome emits CDP events chromiumoxide cannot deserialize;
            // they do not affect the session.
            if message.contains("data did not match any variant of untagged enum Message")
                || message.contains("Failed to deserialize WS response")
            {
                trace!("Suppressed benign CDP serialization error: {}", message);
            } else {
                error!("Browser handler error: {:?}", e);
            }
        }
        trace!("Browser handler task completed");
    });

    Ok((browser, handler_task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_relative_paths_expand() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/bin/chrome"), Some(home.join("bin/chrome")));
        }
        assert_eq!(
            expand_home("/usr/bin/chromium"),
            Some(PathBuf::from("/usr/bin/chromium"))
        );
    }

    #[tokio::test]
    async fn existing_preferred_path_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let fake = dir.path().join("chrome");
        std::fs::write(&fake, b"").expect("write");

        let found = find_browser_executable(Some(&fake)).await.expect("found");
        assert_eq!(found, fake);
    }
}

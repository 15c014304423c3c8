//! Chrome profile directory management
//!
//! Every session launches Chrome against its own UUID-named profile
//! directory, so concurrent workers never contend for a `SingletonLock`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Prefix for all profile directories created by this crate
pub const PROFILE_PREFIX: &str = "kodegen_pinscrape_chrome";

/// RAII wrapper for a Chrome profile directory
///
/// Removes the directory on drop unless `into_path()` hands ownership to
/// another cleanup mechanism.
#[derive(Debug)]
pub struct BrowserProfile {
    path: PathBuf,
    cleanup_on_drop: bool,
}

impl BrowserProfile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            cleanup_on_drop: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the profile and return the path, disabling auto-cleanup
    pub fn into_path(mut self) -> PathBuf {
        self.cleanup_on_drop = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for BrowserProfile {
    fn drop(&mut self) {
        if self.cleanup_on_drop && self.path.exists() {
            remove_profile_dir(&self.path);
        }
    }
}

/// Create a unique profile directory under the temp dir
pub fn create_unique_profile_with_prefix(prefix: &str) -> Result<BrowserProfile> {
    let path = std::env::temp_dir().join(format!("{}_{}", prefix, Uuid::new_v4()));

    // create_dir (not create_dir_all) fails on an existing directory
    std::fs::create_dir(&path)
        .with_context(|| format!("Failed to create profile directory: {}", path.display()))?;

    debug!("Created Chrome profile directory: {}", path.display());
    Ok(BrowserProfile::new(path))
}

/// Best-effort removal of a profile directory
///
/// Must run after the browser process has exited; Chrome holds file locks
/// inside the profile while alive.
pub fn remove_profile_dir(path: &Path) {
    info!("Cleaning up Chrome profile: {}", path.display());
    if let Err(e) = std::fs::remove_dir_all(path) {
        warn!(
            "Failed to clean up profile directory {}: {}. Manual cleanup may be required.",
            path.display(),
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_is_removed_on_drop() {
        let profile = create_unique_profile_with_prefix("pinscrape_test").expect("profile");
        let path = profile.path().to_path_buf();
        assert!(path.exists());
        drop(profile);
        assert!(!path.exists());
    }

    #[test]
    fn into_path_keeps_directory() {
        let profile = create_unique_profile_with_prefix("pinscrape_test").expect("profile");
        let path = profile.into_path();
        assert!(path.exists());
        remove_profile_dir(&path);
        assert!(!path.exists());
    }
}

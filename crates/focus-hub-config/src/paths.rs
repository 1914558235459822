//! Data and cache directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.local/share/focus-hub/`, `~/.cache/focus-hub/`
//! - macOS: `~/Library/Application Support/focus-hub/`, `~/Library/Caches/focus-hub/`
//! - Windows: `%APPDATA%\focus-hub\`, `%LOCALAPPDATA%\focus-hub\`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "focus-hub";

/// File holding the watchlist under the `repos` key
pub const WATCHLIST_FILE: &str = "watchlist.json";

/// File holding the encrypted token under the `github_token` key
pub const SECRETS_FILE: &str = "secrets.json";

/// Default persistence directory (not created)
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Could not determine data directory")?;
    Ok(base.join(APP_NAME))
}

/// Get the application cache directory
/// Returns ~/.cache/focus-hub/ on Linux, ~/Library/Caches/focus-hub/ on macOS
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
    Ok(dir)
}

pub fn watchlist_path(data_dir: &Path) -> PathBuf {
    data_dir.join(WATCHLIST_FILE)
}

pub fn secrets_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SECRETS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_paths() {
        let dir = PathBuf::from("/tmp/focus");
        assert_eq!(watchlist_path(&dir), PathBuf::from("/tmp/focus/watchlist.json"));
        assert_eq!(secrets_path(&dir), PathBuf::from("/tmp/focus/secrets.json"));
    }

    #[test]
    fn test_default_data_dir_is_app_scoped() {
        if let Ok(dir) = default_data_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}

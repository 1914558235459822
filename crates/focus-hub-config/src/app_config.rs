//! Application configuration
//!
//! FocusHub has no config file. Defaults can be overridden through
//! environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::paths;

pub const API_URL_VAR: &str = "FOCUS_HUB_API_URL";
pub const DATA_DIR_VAR: &str = "FOCUS_HUB_DATA_DIR";
pub const NOTICE_SECS_VAR: &str = "FOCUS_HUB_NOTICE_SECS";

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_NOTICE_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// GitHub REST base URL
    pub api_base_url: String,

    /// Directory holding `watchlist.json` and `secrets.json`
    pub data_dir: PathBuf,

    /// How long transient notices stay visible
    pub notice_duration: Duration,
}

fn default_data_dir() -> PathBuf {
    paths::default_data_dir().unwrap_or_else(|e| {
        log::warn!("{}, falling back to the working directory", e);
        PathBuf::from(".focus-hub")
    })
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_dir: default_data_dir(),
            notice_duration: Duration::from_secs(DEFAULT_NOTICE_SECS),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(secs) = lookup(NOTICE_SECS_VAR) {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.notice_duration = Duration::from_secs(secs),
                _ => log::warn!(
                    "Ignoring invalid {}={:?}, using {}s",
                    NOTICE_SECS_VAR,
                    secs,
                    DEFAULT_NOTICE_SECS
                ),
            }
        }

        log::debug!("Using config: {:?}", config);
        config
    }

    pub fn watchlist_path(&self) -> PathBuf {
        paths::watchlist_path(&self.data_dir)
    }

    pub fn secrets_path(&self) -> PathBuf {
        paths::secrets_path(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.notice_duration, Duration::from_secs(5));
        assert!(config.watchlist_path().ends_with("watchlist.json"));
        assert!(config.secrets_path().ends_with("secrets.json"));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://ghe.example.com/api/v3/"),
            (DATA_DIR_VAR, "/tmp/focus"),
            (NOTICE_SECS_VAR, "9"),
        ]));
        assert_eq!(config.api_base_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/focus"));
        assert_eq!(config.notice_duration, Duration::from_secs(9));
        assert_eq!(config.watchlist_path(), PathBuf::from("/tmp/focus/watchlist.json"));
    }

    #[test]
    fn test_invalid_notice_duration_keeps_default() {
        for value in ["soon", "0", "-3"] {
            let config = AppConfig::from_lookup(lookup(&[(NOTICE_SECS_VAR, value)]));
            assert_eq!(config.notice_duration, Duration::from_secs(5));
        }
    }
}

//! File-based logging using simplelog
//!
//! Log file location depends on build type:
//! - Debug builds: current working directory
//! - Release builds: cache directory (~/.cache/focus-hub/ on Linux)
//!
//! The terminal belongs to the UI, so nothing is logged to stdout.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("focus-hub-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        focus_hub_config::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

/// Level from `RUST_LOG`; Debug in debug builds and Info in release otherwise
fn level_from_env(value: Option<&str>) -> LevelFilter {
    let default = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match value.map(str::to_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => default,
    }
}

/// Initialize file-based logging and return the log file path
pub fn init() -> Result<PathBuf> {
    let log_file = log_file_path();
    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;

    Ok(log_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_level_from_env() {
        assert_eq!(level_from_env(Some("WARN")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("trace")), LevelFilter::Trace);
        assert_eq!(level_from_env(Some("nonsense")), level_from_env(None));
    }
}

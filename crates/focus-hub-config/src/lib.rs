//! Configuration and local persistence for FocusHub
//!
//! This crate provides:
//! - Directory paths for data and log files
//! - Application configuration (AppConfig) from the environment
//! - A lazily loaded key/value JSON file store
//! - Watchlist and encrypted token stores built on it

pub mod app_config;
pub mod credentials;
pub mod error;
pub mod json_store;
pub mod paths;
pub mod watchlist;

pub use app_config::AppConfig;
pub use credentials::{
    CredentialStore, EncryptedCredentialStore, EncryptedRecord, MemoryCredentialStore, TokenCipher,
};
pub use error::StorageError;
pub use json_store::JsonStore;
pub use paths::{cache_dir, APP_NAME};
pub use watchlist::{FileWatchlistStore, MemoryWatchlistStore, WatchlistStore};

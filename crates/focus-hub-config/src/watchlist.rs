//! Watchlist persistence
//!
//! The watchlist is an ordered list of `owner/name` strings stored under the
//! `repos` key. Uniqueness is the caller's business; the store keeps whatever
//! it is given, in order.

use crate::error::StorageError;
use crate::json_store::JsonStore;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const WATCHLIST_KEY: &str = "repos";

/// Persisted ordered list of repository identifiers
pub trait WatchlistStore: Send + Sync {
    /// Read the persisted list; a missing key reads as empty
    fn load(&mut self) -> Result<Vec<String>, StorageError>;

    /// Replace the persisted list
    fn save(&mut self, watchlist: &[String]) -> Result<(), StorageError>;
}

/// Watchlist stored in `watchlist.json`
#[derive(Debug)]
pub struct FileWatchlistStore {
    store: JsonStore,
}

impl FileWatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
        }
    }
}

impl WatchlistStore for FileWatchlistStore {
    fn load(&mut self) -> Result<Vec<String>, StorageError> {
        let repos = match self.store.get(WATCHLIST_KEY)? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed watchlist: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };
        log::info!("Loaded watchlist with {} entries", repos.len());
        Ok(repos)
    }

    fn save(&mut self, watchlist: &[String]) -> Result<(), StorageError> {
        let value = Value::from(watchlist.to_vec());
        self.store.set(WATCHLIST_KEY, value)?;
        log::info!("Saved watchlist with {} entries", watchlist.len());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryWatchlist {
    persisted: Option<Vec<String>>,
    writes: Vec<Vec<String>>,
}

/// In-memory watchlist store that records every write
///
/// Clones share the same contents, so a test can keep a handle while the
/// store itself is moved into the code under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryWatchlistStore {
    inner: Arc<Mutex<MemoryWatchlist>>,
}

impl MemoryWatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `entries`
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::default();
        store.lock().persisted = Some(entries.into_iter().map(Into::into).collect());
        store
    }

    /// Every list written so far, oldest first
    pub fn writes(&self) -> Vec<Vec<String>> {
        self.lock().writes.clone()
    }

    pub fn persisted(&self) -> Vec<String> {
        self.lock().persisted.clone().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryWatchlist> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl WatchlistStore for MemoryWatchlistStore {
    fn load(&mut self) -> Result<Vec<String>, StorageError> {
        Ok(self.persisted())
    }

    fn save(&mut self, watchlist: &[String]) -> Result<(), StorageError> {
        let mut inner = self.lock();
        inner.persisted = Some(watchlist.to_vec());
        inner.writes.push(watchlist.to_vec());
        Ok(())
    }
}

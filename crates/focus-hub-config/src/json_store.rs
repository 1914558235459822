//! Key/value JSON file store
//!
//! Each store is one JSON object on disk. The file is read on first access
//! and cached; every mutation is written back in full.

use crate::error::StorageError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    entries: Option<Map<String, Value>>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&mut self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    /// Set `key` and write the store
    ///
    /// The cache only changes once the file has been written.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut updated = self.entries()?.clone();
        updated.insert(key.to_string(), value);
        self.write(&updated)?;
        self.entries = Some(updated);
        Ok(())
    }

    /// Remove `key` and write the store; missing keys are not an error
    pub fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        let mut updated = self.entries()?.clone();
        if updated.remove(key).is_some() {
            self.write(&updated)?;
            self.entries = Some(updated);
        }
        Ok(())
    }

    fn write(&self, entries: &Map<String, Value>) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, contents).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Saved {}", self.path.display());
        Ok(())
    }

    fn entries(&mut self) -> Result<&mut Map<String, Value>, StorageError> {
        if self.entries.is_none() {
            self.entries = Some(load_entries(&self.path)?);
        }
        Ok(self.entries.get_or_insert_with(Map::new))
    }
}

fn load_entries(path: &Path) -> Result<Map<String, Value>, StorageError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("{} does not exist yet", path.display());
            return Ok(Map::new());
        }
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(map)) => {
            log::info!("Loaded {}", path.display());
            Ok(map)
        }
        Ok(_) => {
            log::warn!("{} is not a JSON object, ignoring it", path.display());
            Ok(Map::new())
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            Ok(Map::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path().join("missing.json"));
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonStore::new(&path);
        store.set("repos", json!(["a/b"])).unwrap();

        let mut reopened = JsonStore::new(&path);
        assert_eq!(reopened.get("repos").unwrap(), Some(json!(["a/b"])));
    }

    #[test]
    fn test_delete_removes_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonStore::new(&path);
        store.set("keep", json!(1)).unwrap();
        store.set("drop", json!(2)).unwrap();
        store.delete("drop").unwrap();
        store.delete("never-there").unwrap();

        let mut reopened = JsonStore::new(&path);
        assert_eq!(reopened.get("drop").unwrap(), None);
        assert_eq!(reopened.get("keep").unwrap(), Some(json!(1)));
    }

    #[test]
    fn test_failed_write_leaves_cache_untouched() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the parent directory should be makes every write fail
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let mut store = JsonStore::new(blocker.join("store.json"));
        assert!(store.set("repos", json!(["a/b"])).is_err());
        assert_eq!(store.get("repos").unwrap(), None);
    }

    #[test]
    fn test_failed_delete_keeps_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = JsonStore::new(&path);
        store.set("repos", json!(["a/b"])).unwrap();

        // Replace the file by a directory so the rewrite fails
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.delete("repos").is_err());
        assert_eq!(store.get("repos").unwrap(), Some(json!(["a/b"])));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = JsonStore::new(&path);
        assert_eq!(store.get("repos").unwrap(), None);
    }

    #[test]
    fn test_reads_are_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"repos": ["a/b"]}"#).unwrap();

        let mut store = JsonStore::new(&path);
        assert_eq!(store.get("repos").unwrap(), Some(json!(["a/b"])));

        std::fs::write(&path, r#"{"repos": ["changed/behind-our-back"]}"#).unwrap();
        assert_eq!(store.get("repos").unwrap(), Some(json!(["a/b"])));
    }
}

//! Local key-value store
//!
//! A flat string map persisted to `local_storage.json`, playing the part a
//! browser's `localStorage` plays for a web client. Every write is flushed
//! to disk immediately.

use crate::storage::{get_data_dir, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const SESSION_ID_KEY: &str = "session_id";
pub const MODE_KEY: &str = "mode";

const FILE_NAME: &str = "local_storage.json";

#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open the store in the application data directory
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::open(get_data_dir()?.join(FILE_NAME)))
    }

    /// Open the store backed by `path`.
    ///
    /// A missing file is an empty store. So is an unreadable or corrupt one;
    /// it is left on disk untouched until the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Ignoring unreadable local storage {:?}: {}", path, e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        let previous = self.entries.remove(key);
        if previous.is_some() {
            self.flush()?;
        }
        Ok(previous)
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

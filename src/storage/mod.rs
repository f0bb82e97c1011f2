//! Persistent storage
//!
//! Local key-value state (session id, selected mode) and user settings,
//! both stored as JSON files in the application data directory.

pub mod local;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "SPRINTCHAT_DATA_DIR";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine the application data directory")]
    NoDataDir,
}

/// Directory holding `settings.json` and `local_storage.json`
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    directories::ProjectDirs::from("dev", "TechSprint", "SprintChat")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}

//! Settings storage
//!
//! Manages persistence of user preferences and application settings.

use crate::storage::{get_data_dir, StorageError};
use crate::types::config::{ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `server_url` at load time
pub const SERVER_URL_ENV: &str = "SPRINTCHAT_SERVER_URL";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the chat backend
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Timeout for buffered requests, in seconds (1 - 600)
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Stream replies as they are generated
    #[serde(default = "default_true")]
    pub stream_responses: bool,
    /// Ask the backend to ground replies in uploaded documents
    #[serde(default = "default_true")]
    pub use_rag: bool,
    /// Load the server-side transcript of a saved session on startup
    #[serde(default = "default_true")]
    pub restore_history: bool,
    /// UI theme: "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_timeout(),
            stream_responses: true,
            use_rag: true,
            restore_history: true,
            theme: default_theme(),
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Ensures all parameters are within acceptable ranges.
    pub fn validate(&mut self) {
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 600);

        let url = self.server_url.trim().trim_end_matches('/');
        if url.starts_with("http://") || url.starts_with("https://") {
            self.server_url = url.to_string();
        } else {
            if !url.is_empty() {
                tracing::warn!("Ignoring server URL without http(s) scheme: {}", url);
            }
            self.server_url = default_server_url();
        }

        if self.theme != "dark" && self.theme != "light" {
            self.theme = "dark".to_string();
        }
    }

    /// Replace `server_url` when the override is set and non-empty
    pub fn apply_server_url_override(&mut self, server_url: Option<String>) {
        if let Some(url) = server_url.filter(|u| !u.trim().is_empty()) {
            tracing::info!("Using server URL from {}: {}", SERVER_URL_ENV, url);
            self.server_url = url;
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.server_url.clone(), self.request_timeout_secs)
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted.
/// The server URL environment override is applied in both cases.
pub fn load_settings() -> AppSettings {
    let mut settings = match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    };
    settings.apply_server_url_override(std::env::var(SERVER_URL_ENV).ok());
    settings.validate();
    settings
}

/// Settings loading with error propagation
pub fn load_settings_from(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    save_settings_to(settings, &get_settings_path()?)
}

pub fn save_settings_to(settings: &AppSettings, path: &Path) -> Result<(), StorageError> {
    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}

//! Configuration types
//!
//! Connection settings for the backend API client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// API client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,
    /// Timeout for buffered requests. Streaming requests only use the connect timeout.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, request_timeout_secs: u64) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }

    /// Join an absolute API path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS)
    }
}

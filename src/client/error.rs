use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`super::ApiClient`]
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or body read failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    /// Displays the raw body, or `HTTP <code>` when the body is empty.
    #[error("{}", status_message(.status, .body))]
    Status { status: StatusCode, body: String },
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn status_message(status: &StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        body.to_string()
    }
}

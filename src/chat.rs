//! Chat flows
//!
//! The parts of sending, uploading and starting up that do not touch the
//! UI. Components call these and copy the results into their signals.

use crate::client::{ApiClient, ApiError};
use crate::session::{SessionError, SessionManager};
use crate::storage::StorageError;
use crate::types::api::{ChatRequest, HealthResponse, HistoryEntry, RagStatus};
use crate::types::message::{ChatMessage, Role};
use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

pub const STATUS_THINKING: &str = "Thinking...";
pub const STATUS_UPLOADING: &str = "Uploading & indexing...";
pub const STATUS_UPLOAD_OK: &str = "Upload OK.";
/// How long "Upload OK." stays on the status line
pub const UPLOAD_OK_VISIBLE_FOR: Duration = Duration::from_millis(1200);

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<SessionError> for ChatError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Api(e) => ChatError::Api(e),
            SessionError::Storage(e) => ChatError::Storage(e),
        }
    }
}

pub fn error_text(err: impl Display) -> String {
    format!("❌ Error: {err}")
}

pub fn upload_error_text(err: impl Display) -> String {
    format!("❌ Upload error: {err}")
}

pub fn init_error_text(err: impl Display) -> String {
    format!("❌ Init error: {err}")
}

/// Appended to a partially streamed reply when the stream fails
pub fn stream_error_suffix(err: impl Display) -> String {
    format!("\n\n{}", error_text(err))
}

/// Trim user input. Blank input is not sent.
pub fn prepare_input(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Ordered list of messages in the chat pane
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a transcript from server-side history, skipping empty entries
    pub fn from_history(history: &[HistoryEntry]) -> Self {
        let messages = history
            .iter()
            .filter(|entry| !entry.content.is_empty())
            .map(|entry| ChatMessage::new(Role::from_wire(&entry.role), entry.content.clone()))
            .collect();
        Self { messages }
    }

    /// Add a message and return its id.
    ///
    /// Ids stay valid across later pushes; after [`clear`](Self::clear) they
    /// no longer match and updates through them are dropped.
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> Uuid {
        let message = ChatMessage::new(role, content);
        let id = message.id;
        self.messages.push(message);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn set_content(&mut self, id: Uuid, content: impl Into<String>) {
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == id) {
            msg.content = content.into();
        }
    }

    pub fn append(&mut self, id: Uuid, text: &str) {
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == id) {
            msg.content.push_str(text);
        }
    }

    pub fn last_bot_mut(&mut self) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().rev().find(|m| m.role == Role::Bot)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Send a message and wait for the whole reply. A missing reply is empty text.
pub async fn send_buffered(client: &ApiClient, request: &ChatRequest) -> Result<String, ApiError> {
    let response = client.chat(request).await?;
    Ok(response.reply)
}

/// Send a message and stream the reply.
///
/// `on_text` receives the accumulated reply after every chunk. On failure the
/// text received so far has already been delivered and the error is returned.
pub async fn send_streaming<F>(
    client: &ApiClient,
    request: &ChatRequest,
    mut on_text: F,
) -> Result<String, ApiError>
where
    F: FnMut(&str),
{
    let mut stream = client.chat_stream(request).await?;
    let mut acc = String::new();
    while let Some(text) = stream.next_text().await? {
        acc.push_str(&text);
        on_text(&acc);
    }
    Ok(acc)
}

/// Chunk counts for the session. `None` without a session or on any failure.
pub async fn refresh_rag_status(client: &ApiClient, session_id: Option<&str>) -> Option<RagStatus> {
    let session_id = session_id.filter(|id| !id.is_empty())?;
    match client.rag_status(session_id).await {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::debug!("RAG status unavailable: {}", e);
            None
        }
    }
}

/// Backend health, `None` when unreachable
pub async fn check_health(client: &ApiClient) -> Option<HealthResponse> {
    match client.health().await {
        Ok(health) => Some(health),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            None
        }
    }
}

/// Everything the UI needs after startup
#[derive(Debug, Clone, PartialEq)]
pub struct InitState {
    pub modes: Vec<String>,
    pub mode: Option<String>,
    pub session_id: String,
    pub transcript: Transcript,
    pub rag_status: Option<RagStatus>,
}

/// Load modes, pick one, make sure a session exists, then fetch its state.
///
/// A saved session's history is restored when `restore_history` is set;
/// a failure there only costs the old transcript.
pub async fn initialize(
    client: &ApiClient,
    sessions: &mut SessionManager,
    restore_history: bool,
) -> Result<InitState, ChatError> {
    let modes = client.modes().await?;
    let mode = sessions.choose_mode(&modes)?;

    let resumed = sessions.session_id().is_some();
    let session_id = sessions.ensure_session(client).await?;

    let transcript = if resumed && restore_history {
        match client.history(&session_id).await {
            Ok(history) => Transcript::from_history(&history.history),
            Err(e) => {
                tracing::warn!("Could not restore history for {}: {}", session_id, e);
                Transcript::new()
            }
        }
    } else {
        Transcript::new()
    };

    let rag_status = refresh_rag_status(client, Some(&session_id)).await;

    Ok(InitState {
        modes,
        mode,
        session_id,
        transcript,
        rag_status,
    })
}

/// The health check and [`initialize`], run concurrently
pub async fn startup(
    client: &ApiClient,
    sessions: &mut SessionManager,
    restore_history: bool,
) -> (Option<HealthResponse>, Result<InitState, ChatError>) {
    tokio::join!(
        check_health(client),
        initialize(client, sessions, restore_history)
    )
}

/// Replace the session with a fresh one. Returns the new id and its RAG status.
pub async fn start_new_chat(
    client: &ApiClient,
    sessions: &mut SessionManager,
) -> Result<(String, Option<RagStatus>), ChatError> {
    let session_id = sessions.new_session(client).await?;
    let rag_status = refresh_rag_status(client, Some(&session_id)).await;
    Ok((session_id, rag_status))
}

/// Clear the session on the backend, keeping its id
pub async fn clear_chat(client: &ApiClient, session_id: &str) -> Result<Option<RagStatus>, ApiError> {
    client.clear_session(session_id).await?;
    tracing::info!("Cleared session {}", session_id);
    Ok(refresh_rag_status(client, Some(session_id)).await)
}

/// A document picked for RAG indexing
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Nothing was selected
    Skipped,
    Uploaded(Option<RagStatus>),
}

/// Upload the selected document, then refresh the chunk counts
pub async fn upload_document(
    client: &ApiClient,
    session_id: &str,
    file: Option<UploadFile>,
) -> Result<UploadOutcome, ApiError> {
    let Some(file) = file else {
        return Ok(UploadOutcome::Skipped);
    };

    client.rag_upload(session_id, &file.name, file.bytes).await?;
    tracing::info!("Uploaded {} to session {}", file.name, session_id);

    let rag_status = refresh_rag_status(client, Some(session_id)).await;
    Ok(UploadOutcome::Uploaded(rag_status))
}

//! Backend wire types
//!
//! JSON bodies exchanged with the chat backend. Optional fields carry
//! `#[serde(default)]` because older backends omit them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /api/chat` and `POST /api/chat/stream`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
    pub mode: String,
    pub use_rag: bool,
}

/// Buffered chat reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub session_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModesResponse {
    #[serde(default)]
    pub modes: Vec<String>,
}

/// Chunk counts of the documents indexed for a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagStatus {
    #[serde(default)]
    pub total_chunks: usize,
    #[serde(default)]
    pub by_doc: BTreeMap<String, usize>,
}

impl RagStatus {
    /// Label shown under the upload controls
    pub fn label(&self) -> String {
        format!("RAG chunks: {}", self.total_chunks)
    }

    /// One `name: count` line per document
    pub fn breakdown(&self) -> String {
        self.by_doc
            .iter()
            .map(|(doc, count)| format!("{doc}: {count}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default)]
    pub demo: Option<bool>,
    #[serde(default)]
    pub local_only: Option<bool>,
    #[serde(default)]
    pub has_gemini_key: Option<bool>,
}

impl HealthResponse {
    /// Short badge text, e.g. `gemini` or `demo`
    pub fn badge(&self) -> String {
        match (&self.backend, self.ok) {
            (Some(backend), true) => backend.clone(),
            (None, true) => "online".to_string(),
            (_, false) => "unhealthy".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

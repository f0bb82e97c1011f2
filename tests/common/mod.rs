//! In-process stand-in for the chat backend

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream::{self, StreamExt};
use serde_json::{json, Value};
use sprintchat::client::ApiClient;
use sprintchat::types::api::ChatRequest;
use sprintchat::types::config::ClientConfig;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub const MODES: [&str; 3] = ["General", "Study", "Code"];

/// What the fake backend has seen and stored
#[derive(Debug, Default)]
pub struct Recorded {
    pub sessions_created: usize,
    pub cleared: Vec<String>,
    pub chat_requests: Vec<ChatRequest>,
    pub uploads: Vec<(String, String, Vec<u8>)>,
    pub chunks: BTreeMap<String, BTreeMap<String, usize>>,
    pub history: HashMap<String, Vec<(String, String)>>,
}

#[derive(Clone, Default)]
pub struct Backend {
    pub recorded: Arc<Mutex<Recorded>>,
    /// When set, `/health` does not answer until `/api/rag/status` is hit
    health_gate: Option<Arc<Notify>>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(self, session_id: &str, turns: &[(&str, &str)]) -> Self {
        self.recorded.lock().unwrap().history.insert(
            session_id.to_string(),
            turns
                .iter()
                .map(|(r, c)| (r.to_string(), c.to_string()))
                .collect(),
        );
        self
    }

    pub fn with_health_held_until_rag_status(mut self) -> Self {
        self.health_gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/api/modes", get(modes))
            .route("/api/session/new", post(new_session))
            .route("/api/session/clear", post(clear_session))
            .route("/api/session/history", get(history))
            .route("/api/chat", post(chat))
            .route("/api/chat/stream", post(chat_stream))
            .route("/api/rag/status", get(rag_status))
            .route("/api/rag/upload", post(rag_upload))
            .with_state(self.clone())
    }

    /// Serve on an ephemeral port and return a client pointed at it
    pub async fn spawn(&self) -> ApiClient {
        serve(self.router()).await
    }
}

pub async fn serve(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::new(ClientConfig::new(format!("http://{addr}/"), 5)).unwrap()
}

/// A client for a port nothing listens on
pub async fn unreachable_client() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ApiClient::new(ClientConfig::new(format!("http://{addr}"), 2)).unwrap()
}

async fn health(State(backend): State<Backend>) -> Json<Value> {
    if let Some(gate) = &backend.health_gate {
        gate.notified().await;
    }
    Json(json!({
        "ok": true,
        "backend": "demo",
        "demo": true,
        "local_only": true,
        "has_gemini_key": false
    }))
}

async fn modes() -> Json<Value> {
    Json(json!({ "modes": MODES }))
}

async fn new_session(State(backend): State<Backend>) -> Json<Value> {
    let mut recorded = backend.recorded.lock().unwrap();
    recorded.sessions_created += 1;
    let session_id = format!("sess-{:04}", recorded.sessions_created);
    Json(json!({ "session_id": session_id }))
}

async fn clear_session(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    let Some(session_id) = body.get("session_id").and_then(Value::as_str) else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "session_id required").into_response();
    };
    let mut recorded = backend.recorded.lock().unwrap();
    recorded.cleared.push(session_id.to_string());
    recorded.chunks.remove(session_id);
    recorded.history.remove(session_id);
    Json(json!({ "ok": true, "session_id": session_id })).into_response()
}

async fn history(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let session_id = params.get("session_id").cloned().unwrap_or_default();
    let recorded = backend.recorded.lock().unwrap();
    let turns: Vec<Value> = recorded
        .history
        .get(&session_id)
        .map(|turns| {
            turns
                .iter()
                .map(|(role, content)| json!({ "role": role, "content": content }))
                .collect()
        })
        .unwrap_or_default();
    Json(json!({ "session_id": session_id, "history": turns }))
}

async fn chat(State(backend): State<Backend>, Json(req): Json<ChatRequest>) -> Response {
    if !MODES.contains(&req.mode.as_str()) {
        return (StatusCode::BAD_REQUEST, format!("Unknown mode: {}", req.mode)).into_response();
    }
    if req.message == "explode" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let reply = format!("[{}] echo: {}", req.mode, req.message);
    let body = json!({ "session_id": req.session_id, "reply": reply, "mode": req.mode });
    backend.recorded.lock().unwrap().chat_requests.push(req);
    Json(body).into_response()
}

/// Streams "Olá, mundo ☕" with the multibyte characters split across chunks
async fn chat_stream(State(backend): State<Backend>, Json(req): Json<ChatRequest>) -> Response {
    if req.message == "refuse" {
        return (StatusCode::SERVICE_UNAVAILABLE, "Model overloaded").into_response();
    }
    let cut_short = req.message == "cut";
    backend.recorded.lock().unwrap().chat_requests.push(req);

    let text = "Olá, mundo ☕".as_bytes().to_vec();
    // "á" is bytes 2..4 and "☕" the last three
    let mut pieces: Vec<Result<Vec<u8>, std::io::Error>> = vec![
        Ok(text[..3].to_vec()),
        Ok(text[3..text.len() - 2].to_vec()),
        Ok(text[text.len() - 2..].to_vec()),
    ];
    if cut_short {
        pieces.truncate(1);
        pieces.push(Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "upstream went away",
        )));
    }

    let body = stream::iter(pieces).then(|piece| async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        piece
    });
    Response::builder()
        .header("content-type", "text/plain; charset=utf-8")
        .body(Body::from_stream(body))
        .unwrap()
}

async fn rag_status(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(session_id) = params.get("session_id") else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "session_id required").into_response();
    };
    if let Some(gate) = &backend.health_gate {
        gate.notify_one();
    }
    if session_id == "missing" {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }
    let recorded = backend.recorded.lock().unwrap();
    let by_doc = recorded.chunks.get(session_id).cloned().unwrap_or_default();
    let total: usize = by_doc.values().sum();
    Json(json!({ "total_chunks": total, "by_doc": by_doc })).into_response()
}

async fn rag_upload(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
    mut multipart: Multipart,
) -> Response {
    let session_id = params.get("session_id").cloned().unwrap_or_default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap().to_vec();
        if bytes.is_empty() {
            return (StatusCode::BAD_REQUEST, "Empty file").into_response();
        }

        let chunk_count = bytes.len().div_ceil(8);
        let mut recorded = backend.recorded.lock().unwrap();
        recorded
            .chunks
            .entry(session_id.clone())
            .or_default()
            .insert(file_name.clone(), chunk_count);
        recorded.uploads.push((file_name.clone(), content_type, bytes));
        return Json(json!({ "ok": true, "doc": file_name, "chunks": chunk_count })).into_response();
    }
    (StatusCode::BAD_REQUEST, "No file").into_response()
}

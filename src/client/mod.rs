//! Backend API client
//!
//! Thin `reqwest` wrapper over the chat backend's HTTP surface. Every call
//! is a single request with no retries; failures are returned to the caller
//! which decides how to show them.

pub mod error;
pub mod streaming;

pub use error::ApiError;

use crate::types::api::{
    ChatRequest, ChatResponse, ClearRequest, ClearResponse, HealthResponse, HistoryResponse,
    ModesResponse, NewSessionResponse, RagStatus,
};
use crate::types::config::ClientConfig;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use streaming::Utf8ChunkDecoder;

/// HTTP client for the chat backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("SprintChat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Wrap an already configured `reqwest` client
    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `POST /api/session/new`
    pub async fn new_session(&self) -> Result<NewSessionResponse, ApiError> {
        let request = self.http.post(self.config.endpoint("/api/session/new"));
        self.send_json(request).await
    }

    /// `POST /api/session/clear`: drop the server-side history and RAG chunks of a session
    pub async fn clear_session(&self, session_id: &str) -> Result<ClearResponse, ApiError> {
        let body = ClearRequest {
            session_id: session_id.to_string(),
        };
        let request = self
            .http
            .post(self.config.endpoint("/api/session/clear"))
            .json(&body);
        self.send_json(request).await
    }

    /// `GET /api/modes`
    pub async fn modes(&self) -> Result<Vec<String>, ApiError> {
        let request = self.http.get(self.config.endpoint("/api/modes"));
        let response: ModesResponse = self.send_json(request).await?;
        Ok(response.modes)
    }

    /// `POST /api/chat`: wait for the whole reply
    pub async fn chat(&self, payload: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let request = self
            .http
            .post(self.config.endpoint("/api/chat"))
            .json(payload);
        self.send_json(request).await
    }

    /// `POST /api/chat/stream`: the reply arrives as chunked plain text.
    ///
    /// Only the status is checked here; read the body with [`ChatStream::next_text`].
    pub async fn chat_stream(&self, payload: &ChatRequest) -> Result<ChatStream, ApiError> {
        let url = self.config.endpoint("/api/chat/stream");
        tracing::debug!("POST {} (stream)", url);
        let response = self.http.post(url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(ChatStream::new(response))
    }

    /// `GET /api/rag/status`
    pub async fn rag_status(&self, session_id: &str) -> Result<RagStatus, ApiError> {
        let request = self
            .http
            .get(self.config.endpoint("/api/rag/status"))
            .query(&[("session_id", session_id)]);
        self.send_json(request).await
    }

    /// `POST /api/rag/upload`: index a document for the session.
    ///
    /// The backend's reply body is returned verbatim.
    pub async fn rag_upload(
        &self,
        session_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(guess_mime(file_name))?;
        let form = Form::new().part("file", part);

        let request = self
            .http
            .post(self.config.endpoint("/api/rag/upload"))
            .query(&[("session_id", session_id)])
            .multipart(form);
        self.send_text(request).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let request = self.http.get(self.config.endpoint("/health"));
        self.send_json(request).await
    }

    /// `GET /api/session/history`
    pub async fn history(&self, session_id: &str) -> Result<HistoryResponse, ApiError> {
        let request = self
            .http
            .get(self.config.endpoint("/api/session/history"))
            .query(&[("session_id", session_id)]);
        self.send_json(request).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let raw = self.send_text(request).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Send a buffered request and read the body as text, failing on non-2xx
    async fn send_text(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let request = request.timeout(self.config.request_timeout()).build()?;
        tracing::debug!("{} {}", request.method(), request.url());

        let response = self.http.execute(request).await?;
        read_text(response).await
    }
}

async fn read_text(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status { status, body });
    }
    Ok(body)
}

fn guess_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "md" | "markdown" => "text/markdown",
        "txt" | "text" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// A streamed chat reply being read chunk by chunk
pub struct ChatStream {
    response: Response,
    decoder: Utf8ChunkDecoder,
    finished: bool,
}

impl ChatStream {
    fn new(response: Response) -> Self {
        Self {
            response,
            decoder: Utf8ChunkDecoder::new(),
            finished: false,
        }
    }

    /// Next piece of decoded text, or `None` once the body is exhausted
    pub async fn next_text(&mut self) -> Result<Option<String>, ApiError> {
        while !self.finished {
            match self.response.chunk().await? {
                Some(bytes) => {
                    let text = self.decoder.push(&bytes);
                    if !text.is_empty() {
                        return Ok(Some(text));
                    }
                }
                None => {
                    self.finished = true;
                    let tail = self.decoder.finish();
                    if !tail.is_empty() {
                        return Ok(Some(tail));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Read the remaining body into one string
    pub async fn collect_text(mut self) -> Result<String, ApiError> {
        let mut acc = String::new();
        while let Some(text) = self.next_text().await? {
            acc.push_str(&text);
        }
        Ok(acc)
    }
}

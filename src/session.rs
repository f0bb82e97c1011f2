//! Session id cache
//!
//! The backend identifies a conversation by an opaque session id. The id is
//! created on first use, kept in the local store across restarts, and only
//! replaced when the user starts a new chat.

use crate::client::{ApiClient, ApiError};
use crate::storage::local::{LocalStore, MODE_KEY, SESSION_ID_KEY};
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug)]
pub struct SessionManager {
    store: LocalStore,
    session_id: Option<String>,
}

impl SessionManager {
    pub fn new(store: LocalStore) -> Self {
        let session_id = store
            .get(SESSION_ID_KEY)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        Self { store, session_id }
    }

    /// The cached session id, if one was ever created
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Return the cached id, creating a session on the backend the first time
    pub async fn ensure_session(&mut self, client: &ApiClient) -> Result<String, SessionError> {
        if let Some(id) = &self.session_id {
            return Ok(id.clone());
        }
        self.new_session(client).await
    }

    /// Ask the backend for a fresh session and replace the stored id
    pub async fn new_session(&mut self, client: &ApiClient) -> Result<String, SessionError> {
        let response = client.new_session().await?;
        self.replace_session(response.session_id.clone())?;
        tracing::info!("Started session {}", response.session_id);
        Ok(response.session_id)
    }

    fn replace_session(&mut self, session_id: String) -> Result<(), StorageError> {
        self.store.set(SESSION_ID_KEY, &session_id)?;
        self.session_id = Some(session_id);
        Ok(())
    }

    pub fn saved_mode(&self) -> Option<&str> {
        self.store.get(MODE_KEY).filter(|m| !m.is_empty())
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<(), StorageError> {
        self.store.set(MODE_KEY, mode)
    }

    /// Pick the mode to show after the mode list loads.
    ///
    /// The saved mode wins when the backend still offers it. Otherwise the
    /// first offered mode is selected and persisted. An empty list selects
    /// nothing and leaves the store alone.
    pub fn choose_mode(&mut self, modes: &[String]) -> Result<Option<String>, StorageError> {
        if let Some(saved) = self.saved_mode() {
            if modes.iter().any(|m| m == saved) {
                return Ok(Some(saved.to_string()));
            }
        }

        match modes.first() {
            Some(first) => {
                self.set_mode(first)?;
                Ok(Some(first.clone()))
            }
            None => Ok(None),
        }
    }
}

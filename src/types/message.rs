//! Message types
//!
//! Defines chat message structures and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Message typed by the user
    User,
    /// Reply from the backend, or a client-side error shown in its place
    Bot,
}

impl Role {
    /// Map a role name as the backend reports it in session history.
    ///
    /// The backend uses `user` and `assistant`; anything that is not the
    /// user is rendered on the bot side.
    pub fn from_wire(role: &str) -> Self {
        if role.eq_ignore_ascii_case("user") {
            Role::User
        } else {
            Role::Bot
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    /// The role of the message sender
    pub role: Role,
    /// The content of the message
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

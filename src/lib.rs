//! SprintChat Library
//!
//! Core library for the SprintChat desktop client: the backend API client,
//! local session storage, and the chat flows the UI is built on.

pub mod chat;
pub mod client;
pub mod session;
pub mod storage;
pub mod types;

#[cfg(feature = "desktop")]
pub mod app;
#[cfg(feature = "desktop")]
pub mod ui;

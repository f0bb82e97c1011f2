//! Shared type definitions
//!
//! This module contains all shared data types used across the application.

pub mod api;
pub mod config;
pub mod message;

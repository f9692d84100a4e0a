//! Customer support chat
//!
//! A chat widget that posts user messages to a `/chat` endpoint and renders
//! the conversation, plus a reference backend that answers those posts.
//!
//! # Architecture
//!
//! - **Widget**: a rendering-agnostic session controller driving the send
//!   lifecycle (validate, disable input, append user message, await reply,
//!   append bot message, restore input)
//! - **Client**: `reqwest`-based [`client::HttpChatBackend`]
//! - **Server**: Axum backend answering from an optional LLM or a keyword table
//! - **Terminal**: line-oriented front-end binding the widget to stdin/stdout
//!
//! # Modules
//!
//! - [`widget`]: session controller, transcript, notifications
//! - [`client`]: chat endpoint client
//! - [`server`]: HTTP routes
//! - [`replies`]: reply selection
//! - [`llm`]: Chat Completions client
//! - [`terminal`]: terminal front-end

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::unused_async)]

pub mod client;
pub mod config;
pub mod error;
pub mod llm;
pub mod replies;
pub mod server;
pub mod terminal;
pub mod types;
pub mod widget;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::replies::ReplyService;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Reply selection for incoming messages.
    pub replies: Arc<ReplyService>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

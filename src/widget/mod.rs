//! The chat widget: session controller, transcript model and notifications.
//!
//! The controller never touches a concrete UI. It renders through the
//! [`ChatView`] trait and talks to the endpoint through [`ChatBackend`], so
//! the send lifecycle can be driven headless in tests.
//!
//! # Structure
//!
//! - [`controller`]: the send lifecycle state machine
//! - [`message`]: transcript entries
//! - [`counter`]: the draft character counter
//! - [`input`]: draft validation and submit key handling
//! - [`notify`]: transient banners with scheduled removal
//! - [`view`]: the rendering capability and an in-memory implementation
//! - [`bindings`]: the entry points a front-end invokes
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use support_chat::client::HttpChatBackend;
//! use support_chat::widget::{ChatController, MemoryView, NotificationCenter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(HttpChatBackend::new("http://127.0.0.1:5000")?);
//! let mut chat = ChatController::new(
//!     MemoryView::default(),
//!     backend,
//!     NotificationCenter::default(),
//!     "Hello! How can I help you today?",
//! );
//!
//! chat.set_draft("What are your hours?");
//! chat.send_message().await?;
//! assert_eq!(chat.transcript().len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod bindings;
pub mod controller;
pub mod counter;
pub mod input;
pub mod message;
pub mod notify;
pub mod view;

pub use bindings::{CLEAR_PROMPT, Command, Confirm, Handled, run_command};
pub use controller::{
    ChatController, Delivery, InFlight, PendingSend, Phase, SessionUiState, Settled,
};
pub use counter::{CharCount, CounterTone};
pub use input::{Key, KeyPress, Modifiers, validate_draft};
pub use message::{Author, Message};
pub use notify::{Notification, NotificationCenter, NotificationTiming, Severity, Stage};
pub use view::{ChatView, MemoryView};

pub use crate::client::{ChatBackend, ChatReply};

/// Maximum length of a message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Draft length above which the counter switches to the warning tone.
pub const COUNTER_WARNING_THRESHOLD: usize = 450;

/// Bot message appended when a request yields no reply.
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error. Please try again or contact our support team directly.";

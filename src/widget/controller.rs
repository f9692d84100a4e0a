//! Chat session controller.
//!
//! The send lifecycle runs in four steps, each available on its own so a
//! front-end can keep handling events while a request is out:
//!
//! 1. [`ChatController::submit`] validates the draft, disables input, appends
//!    the user's message and shows the loading indicator.
//! 2. [`ChatController::dispatch`] hands the message to the backend.
//! 3. [`InFlight::settle`] awaits the reply without borrowing the controller.
//! 4. [`ChatController::complete`] appends the reply or the fallback and
//!    restores input.
//!
//! [`ChatController::send_message`] runs all four in order.

use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use crate::client::{ChatBackend, ChatReply};
use crate::error::{RequestError, SubmitError};

use super::counter::CharCount;
use super::input::{KeyPress, validate_draft};
use super::message::Message;
use super::notify::{NotificationCenter, Severity};
use super::view::ChatView;
use super::FALLBACK_REPLY;

const SEND_FAILED_NOTICE: &str = "Failed to send message. Please try again.";
const CLEARED_NOTICE: &str = "Chat cleared successfully";

/// Where the controller is in the send lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Sending,
    AwaitingResponse,
    /// Held only while [`ChatController::complete`] applies a failed
    /// outcome; `complete` always leaves the controller `Idle`, so callers
    /// never read this from [`ChatController::phase`].
    Error,
}

/// Input availability as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUiState {
    pub input_enabled: bool,
    pub pending_request: bool,
}

/// How a send attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The endpoint replied and the reply was appended.
    Replied,
    /// The request failed and the fallback apology was appended.
    Fallback,
}

/// A validated message whose user bubble is already in the transcript.
#[derive(Debug)]
#[must_use = "a submitted message must be dispatched or input stays disabled"]
pub struct PendingSend {
    text: String,
}

impl PendingSend {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A request on its way to the backend.
#[must_use = "an in-flight request must be settled and completed"]
pub struct InFlight {
    backend: Arc<dyn ChatBackend>,
    text: String,
}

impl std::fmt::Debug for InFlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InFlight").field("text", &self.text).finish()
    }
}

impl InFlight {
    /// Wait for the backend to answer.
    pub async fn settle(self) -> Settled {
        let outcome = self.backend.send(&self.text).await;
        Settled { outcome }
    }
}

/// The outcome of a request, ready to be applied with
/// [`ChatController::complete`].
#[derive(Debug)]
#[must_use = "a settled request must be completed or input stays disabled"]
pub struct Settled {
    outcome: Result<ChatReply, RequestError>,
}

impl Settled {
    pub fn outcome(&self) -> &Result<ChatReply, RequestError> {
        &self.outcome
    }
}

/// Mediates between input events, the chat endpoint and the view.
///
/// The transcript always starts with the greeting, which survives
/// [`clear_conversation`](Self::clear_conversation).
pub struct ChatController<V> {
    view: V,
    backend: Arc<dyn ChatBackend>,
    notifications: NotificationCenter,
    transcript: Vec<Message>,
    draft: String,
    phase: Phase,
}

impl<V: std::fmt::Debug> std::fmt::Debug for ChatController<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatController")
            .field("view", &self.view)
            .field("transcript", &self.transcript.len())
            .field("draft", &self.draft)
            .field("phase", &self.phase)
            .finish()
    }
}

impl<V: ChatView> ChatController<V> {
    /// Bind a controller to `view` and render the greeting.
    pub fn new(
        mut view: V,
        backend: Arc<dyn ChatBackend>,
        notifications: NotificationCenter,
        greeting: impl Into<String>,
    ) -> Self {
        let greeting = Message::bot(greeting, None);
        view.append_message(&greeting);
        view.set_loading(false);
        view.set_input_enabled(true);

        let mut controller = Self {
            view,
            backend,
            notifications,
            transcript: vec![greeting],
            draft: String::new(),
            phase: Phase::Idle,
        };
        controller.update_char_count();

        info!(name: "chat.controller.ready", "Chat controller initialized");
        controller
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Current phase. Between calls this is `Idle`, `Sending` or
    /// `AwaitingResponse`.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ui_state(&self) -> SessionUiState {
        let pending_request = self.phase != Phase::Idle;
        SessionUiState {
            input_enabled: !pending_request,
            pending_request,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Replace the draft, as typing into the input field does.
    pub fn set_draft(&mut self, draft: impl Into<String>) -> CharCount {
        self.draft = draft.into();
        self.view.show_draft(&self.draft);
        self.update_char_count()
    }

    /// Recompute the counter from the draft and render it.
    pub fn update_char_count(&mut self) -> CharCount {
        let count = CharCount::of(&self.draft);
        self.view.show_char_count(count);
        count
    }

    pub fn show_notification(&self, text: impl Into<String>, severity: Severity) -> Uuid {
        self.notifications.show(text, severity)
    }

    /// Validate the draft and move to [`Phase::Sending`].
    ///
    /// On rejection nothing changes except a banner for invalid drafts.
    pub fn submit(&mut self) -> Result<PendingSend, SubmitError> {
        if self.phase != Phase::Idle {
            debug!(
                name: "chat.send.busy",
                phase = ?self.phase,
                "Submit ignored while a request is pending"
            );
            return Err(SubmitError::Busy);
        }

        let text = match validate_draft(&self.draft) {
            Ok(text) => text,
            Err(e) => {
                self.notifications.show(e.to_string(), e.severity());
                return Err(e.into());
            }
        };

        self.phase = Phase::Sending;
        self.view.set_input_enabled(false);

        let message = Message::user(text.as_str());
        self.view.append_message(&message);
        self.transcript.push(message);

        self.draft.clear();
        self.view.show_draft(&self.draft);
        self.update_char_count();

        self.view.set_loading(true);

        info!(
            name: "chat.send.started",
            chars = text.chars().count(),
            "Message submitted"
        );
        Ok(PendingSend { text })
    }

    /// Hand a submitted message to the backend.
    pub fn dispatch(&mut self, pending: PendingSend) -> InFlight {
        self.phase = Phase::AwaitingResponse;
        InFlight {
            backend: Arc::clone(&self.backend),
            text: pending.text,
        }
    }

    /// Apply a request outcome and restore input.
    pub fn complete(&mut self, settled: Settled) -> Delivery {
        let delivery = match settled.outcome {
            Ok(reply) => {
                let message = Message::bot(reply.text, reply.source);
                info!(
                    name: "chat.send.replied",
                    source = message.source().unwrap_or_default(),
                    "Reply received"
                );
                self.view.append_message(&message);
                self.transcript.push(message);
                Delivery::Replied
            }
            Err(e) => {
                self.phase = Phase::Error;
                error!(name: "chat.send.failed", error = %e, "Error sending message");

                let message = Message::bot(FALLBACK_REPLY, None);
                self.view.append_message(&message);
                self.transcript.push(message);
                self.notifications.show(SEND_FAILED_NOTICE, Severity::Error);
                Delivery::Fallback
            }
        };

        self.view.set_loading(false);
        self.view.set_input_enabled(true);
        self.view.focus_input();
        self.phase = Phase::Idle;

        delivery
    }

    /// Send the current draft and wait for the reply.
    pub async fn send_message(&mut self) -> Result<Delivery, SubmitError> {
        let pending = self.submit()?;
        let settled = self.dispatch(pending).settle().await;
        Ok(self.complete(settled))
    }

    /// Put `text` in the draft and send it.
    pub async fn send_quick_reply(
        &mut self,
        text: impl Into<String>,
    ) -> Result<Delivery, SubmitError> {
        self.set_draft(text);
        self.send_message().await
    }

    /// React to a key press in the input field.
    ///
    /// Returns `None` when the key does not submit.
    pub async fn handle_key(&mut self, press: KeyPress) -> Option<Result<Delivery, SubmitError>> {
        if press.is_submit() {
            Some(self.send_message().await)
        } else {
            None
        }
    }

    /// Drop every message except the greeting.
    pub fn clear_conversation(&mut self) {
        let removed = self.transcript.len().saturating_sub(1);
        self.transcript.truncate(1);
        self.view.clear_all_but_first();
        self.notifications.show(CLEARED_NOTICE, Severity::Info);

        info!(name: "chat.cleared", removed, "Conversation cleared");
    }
}

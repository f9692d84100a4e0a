//! Entry points a front-end invokes on a controller.
//!
//! A front-end owns the controller and passes it in; there is no shared
//! instance to reach for.

use std::ops::ControlFlow;

use async_trait::async_trait;

use crate::error::SubmitError;

use super::controller::{ChatController, Delivery};
use super::view::ChatView;

/// Prompt shown before the transcript is cleared.
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the chat?";

/// Asks the user a yes/no question.
#[async_trait]
pub trait Confirm {
    async fn confirm(&mut self, prompt: &str) -> bool;
}

/// A user action addressed to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the given text as the current draft.
    Send(String),
    /// Send a canned quick-reply.
    QuickReply(String),
    /// Clear the conversation after confirmation.
    Clear,
    /// Leave the session.
    Quit,
}

impl Command {
    /// Parse a line typed into a line-oriented front-end.
    ///
    /// `/quick <text>`, `/clear` and `/quit` are commands; anything else is a
    /// message. A bare `/quick` is an empty quick reply.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("/quick")
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            return Self::QuickReply(rest.trim().to_string());
        }
        match trimmed {
            "/clear" => Self::Clear,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Send(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

/// Outcome of running one [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    Sent(Result<Delivery, SubmitError>),
    Cleared,
    ClearDeclined,
}

/// Run `command` against `controller`.
///
/// Returns [`ControlFlow::Break`] for [`Command::Quit`].
pub async fn run_command<V, C>(
    controller: &mut ChatController<V>,
    confirm: &mut C,
    command: Command,
) -> ControlFlow<(), Handled>
where
    V: ChatView,
    C: Confirm,
{
    match command {
        Command::Send(text) => {
            controller.set_draft(text);
            ControlFlow::Continue(Handled::Sent(controller.send_message().await))
        }
        Command::QuickReply(text) => {
            ControlFlow::Continue(Handled::Sent(controller.send_quick_reply(text).await))
        }
        Command::Clear => {
            if confirm.confirm(CLEAR_PROMPT).await {
                controller.clear_conversation();
                ControlFlow::Continue(Handled::Cleared)
            } else {
                ControlFlow::Continue(Handled::ClearDeclined)
            }
        }
        Command::Quit => ControlFlow::Break(()),
    }
}

//! Error types for the chat widget and its HTTP client.

use thiserror::Error;

use crate::widget::Severity;

/// A draft that was refused before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The draft is empty or whitespace only.
    #[error("Please enter a message")]
    Empty,

    /// The trimmed draft exceeds [`crate::widget::MAX_MESSAGE_CHARS`].
    #[error("Message too long. Please keep it under 500 characters.")]
    TooLong {
        /// Length of the trimmed draft in characters.
        length: usize,
    },
}

impl ValidationError {
    /// Banner severity used when surfacing this error.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Empty => Severity::Warning,
            Self::TooLong { .. } => Severity::Error,
        }
    }
}

/// A request to the chat endpoint that did not yield a reply.
#[derive(Error, Debug)]
pub enum RequestError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The reply body was not the expected JSON envelope.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint answered with `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The endpoint answered with `success: true` but no text.
    #[error("reply carried no response text")]
    EmptyReply,
}

/// Why a submit trigger did not start a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The draft failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A request is already pending.
    #[error("a request is already pending")]
    Busy,
}

//! Transcript entries.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

/// A single rendered message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    text: String,
    author: Author,
    timestamp: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl Message {
    /// A message typed by the user.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::User,
            timestamp: Local::now(),
            source: None,
        }
    }

    /// A bot reply, optionally labelled with the component that produced it.
    ///
    /// Empty labels are dropped.
    #[must_use]
    pub fn bot(text: impl Into<String>, source: Option<String>) -> Self {
        Self {
            text: text.into(),
            author: Author::Bot,
            timestamp: Local::now(),
            source: source.filter(|s| !s.is_empty()),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn author(&self) -> Author {
        self.author
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    /// Wall-clock label shown under the bubble, e.g. `14:05`.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Renders the bubble text, with the source label appended to bot replies.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.author, &self.source) {
            (Author::Bot, Some(source)) => write!(f, "{} ({source})", self.text),
            _ => f.write_str(&self.text),
        }
    }
}

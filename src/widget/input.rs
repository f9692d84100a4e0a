//! Draft validation and submit key handling.

use crate::error::ValidationError;

use super::MAX_MESSAGE_CHARS;

/// Validate a draft and return the text to send.
///
/// The draft is trimmed first; the length limit applies to the trimmed text.
pub fn validate_draft(draft: &str) -> Result<String, ValidationError> {
    let text = draft.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }

    let length = text.chars().count();
    if length > MAX_MESSAGE_CHARS {
        return Err(ValidationError::TooLong { length });
    }

    Ok(text.to_string())
}

/// Keys the input field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }
}

/// A key press in the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// A key press with no modifiers held.
    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Enter with no modifier submits; Shift+Enter and friends insert a newline.
    #[must_use]
    pub fn is_submit(&self) -> bool {
        self.key == Key::Enter && self.modifiers.is_empty()
    }
}

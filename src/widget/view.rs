//! Rendering capability for the chat widget.

use super::counter::CharCount;
use super::message::Message;

/// The UI regions a controller renders into.
///
/// A view provides the message list, the input field and send control, the
/// loading indicator and the character counter. Implementations only draw;
/// every decision is made by the controller.
pub trait ChatView {
    /// Add a message to the bottom of the message list and scroll to it.
    fn append_message(&mut self, message: &Message);

    /// Remove every rendered message except the first one.
    fn clear_all_but_first(&mut self);

    /// Enable or disable both the input field and the send control.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Show or hide the loading indicator.
    fn set_loading(&mut self, visible: bool);

    /// Replace the text shown in the input field.
    fn show_draft(&mut self, draft: &str);

    fn show_char_count(&mut self, count: CharCount);

    fn focus_input(&mut self);
}

/// A view that keeps what it was told to render in memory.
#[derive(Debug, Clone)]
pub struct MemoryView {
    pub messages: Vec<Message>,
    pub input_enabled: bool,
    pub loading: bool,
    pub draft: String,
    pub char_count: CharCount,
    pub focus_count: usize,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            input_enabled: true,
            loading: false,
            draft: String::new(),
            char_count: CharCount::of(""),
            focus_count: 0,
        }
    }
}

impl ChatView for MemoryView {
    fn append_message(&mut self, message: &Message) {
        self.messages.push(message.clone());
    }

    fn clear_all_but_first(&mut self) {
        self.messages.truncate(1);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn show_draft(&mut self, draft: &str) {
        self.draft = draft.to_string();
    }

    fn show_char_count(&mut self, count: CharCount) {
        self.char_count = count;
    }

    fn focus_input(&mut self) {
        self.focus_count += 1;
    }
}

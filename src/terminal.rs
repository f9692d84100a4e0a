//! Line-oriented terminal front-end for the chat widget.
//!
//! Every line typed is a submit. `/quick <text>` sends a quick reply,
//! `/clear` clears the conversation after confirmation and `/quit` exits.

use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::watch;
use tracing::debug;

use crate::client::HttpChatBackend;
use crate::config::WidgetConfig;
use crate::widget::{
    ChatController, ChatView, CharCount, Command, Confirm, CounterTone, Message, Notification,
    NotificationCenter, Severity, run_command,
};

const HELP: &str = "Type a message and press Enter. Commands: /quick <text>, /clear, /quit";

/// [`ChatView`] that prints to a writer.
///
/// A terminal cannot take lines back, so clearing prints a separator and
/// the retained greeting again.
#[derive(Debug)]
pub struct TerminalView<W> {
    out: W,
    first: Option<Message>,
    input_enabled: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            first: None,
            input_enabled: true,
        }
    }

    /// Print the input prompt.
    pub fn prompt(&mut self) {
        let marker = if self.input_enabled { ">" } else { "…" };
        self.write(format_args!("{marker} "));
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = self.out.write_fmt(args) {
            debug!(name: "terminal.write.failed", error = %e, "Terminal write failed");
        }
    }

    fn render(&mut self, message: &Message) {
        let who = if message.is_user() { "You" } else { "Bot" };
        let time = message.time_label();
        self.write(format_args!("[{time}] {who}: {message}\n"));
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn append_message(&mut self, message: &Message) {
        if self.first.is_none() {
            self.first = Some(message.clone());
        }
        self.render(message);
    }

    fn clear_all_but_first(&mut self) {
        self.write(format_args!("──── chat cleared ────\n"));
        if let Some(first) = self.first.clone() {
            self.render(&first);
        }
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_loading(&mut self, visible: bool) {
        if visible {
            self.write(format_args!("Bot is typing…\n"));
        }
    }

    fn show_draft(&mut self, _draft: &str) {}

    fn show_char_count(&mut self, count: CharCount) {
        if count.tone == CounterTone::Warning {
            self.write(format_args!("({count} characters)\n"));
        }
    }

    fn focus_input(&mut self) {}
}

/// [`Confirm`] that reads a yes/no answer from the next input line.
#[derive(Debug)]
pub struct LineConfirm<'a, R> {
    lines: &'a mut Lines<R>,
}

impl<'a, R> LineConfirm<'a, R> {
    pub fn new(lines: &'a mut Lines<R>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl<'a, R> Confirm for LineConfirm<'a, R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();

        match self.lines.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn banner_prefix(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[info]",
        Severity::Warning => "[warning]",
        Severity::Error => "[error]",
    }
}

/// Print each banner once, as it appears.
async fn print_banners(mut updates: watch::Receiver<Vec<Notification>>) {
    let mut seen = HashSet::new();
    while updates.changed().await.is_ok() {
        let fresh: Vec<Notification> = updates
            .borrow_and_update()
            .iter()
            .filter(|n| !seen.contains(&n.id))
            .cloned()
            .collect();
        for n in fresh {
            seen.insert(n.id);
            println!("{} {}", banner_prefix(n.severity), n.text);
        }
    }
}

/// Run an interactive session against the configured endpoint.
pub async fn run(widget: &WidgetConfig) -> anyhow::Result<()> {
    let backend = Arc::new(HttpChatBackend::new(&widget.endpoint)?);
    let notifications = NotificationCenter::default();
    let banners = tokio::spawn(print_banners(notifications.subscribe()));

    println!("{HELP}");
    let mut chat = ChatController::new(
        TerminalView::new(std::io::stdout()),
        backend,
        notifications,
        widget.greeting.as_str(),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        chat.view_mut().prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = Command::parse(&line);
        let mut confirm = LineConfirm::new(&mut lines);
        if run_command(&mut chat, &mut confirm, command).await.is_break() {
            break;
        }
    }

    banners.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_renders_and_reprints_greeting() {
        let mut view = TerminalView::new(Vec::new());
        view.append_message(&Message::bot("Welcome!", None));
        view.append_message(&Message::user("Hello"));
        view.append_message(&Message::bot("Hi!", Some("faq".to_string())));
        view.clear_all_but_first();

        let out = String::from_utf8(view.into_inner()).unwrap();
        assert!(out.contains("Bot: Welcome!"));
        assert!(out.contains("You: Hello"));
        assert!(out.contains("Bot: Hi! (faq)"));
        assert_eq!(out.matches("Bot: Welcome!").count(), 2);
    }

    #[test]
    fn test_counter_printed_only_in_warning() {
        let mut view = TerminalView::new(Vec::new());
        view.show_char_count(CharCount::of("short"));
        view.show_char_count(CharCount::of(&"a".repeat(460)));

        let out = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(out, "(460/500 characters)\n");
    }

    #[tokio::test]
    async fn test_line_confirm() {
        let mut lines = BufReader::new(&b"yes\nno\n"[..]).lines();
        let mut confirm = LineConfirm::new(&mut lines);
        assert!(confirm.confirm("Clear?").await);
        assert!(!confirm.confirm("Clear?").await);
        assert!(!confirm.confirm("Clear?").await);
    }
}

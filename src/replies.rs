//! Reply selection for the backend.
//!
//! The configured LLM is asked first. Without one, or when it fails, the
//! reply comes from a fixed keyword table.

use tracing::warn;

use crate::llm::ChatCompletionsClient;

const SYSTEM_PROMPT: &str = "You are a helpful customer support assistant. Be friendly, professional, and concise. Help with general inquiries about products, services, billing, and support.";

/// Keyword replies, checked in order. The first keyword contained in the
/// lowercased message wins.
const KEYWORD_REPLIES: &[(&str, &str)] = &[
    (
        "hello",
        "Hello! Welcome to our customer support. How can I help you today?",
    ),
    (
        "hi",
        "Hi there! I'm here to assist you. What can I do for you?",
    ),
    (
        "hours",
        "Our business hours are Monday-Friday 9 AM to 6 PM EST.",
    ),
    (
        "contact",
        "You can reach us at support@company.com or call (555) 123-4567.",
    ),
    (
        "pricing",
        "Our basic plan starts at $29/month. Premium plan is $59/month. Enterprise pricing available on request.",
    ),
    (
        "refund",
        "We offer a 30-day money-back guarantee. Please contact support@company.com for refund requests.",
    ),
    (
        "shipping",
        "We offer free shipping on orders over $50. Standard shipping takes 3-5 business days.",
    ),
    (
        "return",
        "Returns are accepted within 30 days of purchase. Items must be in original condition.",
    ),
    (
        "support",
        "Our support team is available 24/7 via chat, email, or phone.",
    ),
    (
        "account",
        "To manage your account, please log in to our website and visit the account settings page.",
    ),
    (
        "password",
        "To reset your password, click 'Forgot Password' on the login page.",
    ),
    (
        "cancel",
        "To cancel your subscription, please contact our support team or visit account settings.",
    ),
    (
        "features",
        "Our platform includes real-time analytics, team collaboration, automated workflows, and 24/7 support.",
    ),
    (
        "demo",
        "You can schedule a free demo at demo@company.com or book online through our website.",
    ),
    (
        "trial",
        "We offer a 14-day free trial with full access to all features. No credit card required!",
    ),
    ("bye", "Thank you for contacting us! Have a great day!"),
    (
        "thanks",
        "You're welcome! Is there anything else I can help you with?",
    ),
];

/// Word families checked after the keyword table.
const FAMILY_REPLIES: &[(&[&str], &str)] = &[
    (
        &["help", "assist", "support"],
        "I'm here to help! You can ask me about our hours, pricing, shipping, returns, or any other questions.",
    ),
    (
        &["problem", "issue", "error", "bug"],
        "I'm sorry to hear you're experiencing an issue. Can you please provide more details about the problem you're facing?",
    ),
    (
        &["buy", "purchase", "order"],
        "Great! You can place an order through our website or contact our sales team at sales@company.com for assistance.",
    ),
];

const DEFAULT_REPLY: &str = "I understand your question. For detailed assistance, please contact our support team at support@company.com or call (555) 123-4567.";

/// Component that produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Ai,
    Predefined,
}

impl ReplySource {
    /// Label sent to the widget.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Predefined => "Predefined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

/// Canned reply for `message`. Never fails.
#[must_use]
pub fn predefined_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();

    if let Some((_, reply)) = KEYWORD_REPLIES.iter().find(|(k, _)| lower.contains(k)) {
        return *reply;
    }

    FAMILY_REPLIES
        .iter()
        .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
        .map_or(DEFAULT_REPLY, |(_, reply)| *reply)
}

/// Picks a reply for each incoming message.
#[derive(Debug, Clone, Default)]
pub struct ReplyService {
    llm: Option<ChatCompletionsClient>,
}

impl ReplyService {
    #[must_use]
    pub fn new(llm: Option<ChatCompletionsClient>) -> Self {
        Self { llm }
    }

    /// Whether an LLM is configured.
    #[must_use]
    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn reply(&self, message: &str) -> Reply {
        if let Some(llm) = &self.llm {
            match llm.complete(SYSTEM_PROMPT, message).await {
                Ok(text) if !text.is_empty() => {
                    return Reply {
                        text,
                        source: ReplySource::Ai,
                    };
                }
                Ok(_) => warn!(name: "llm.reply.empty", "LLM returned an empty reply"),
                Err(e) => warn!(name: "llm.reply.failed", error = %e, "LLM request failed"),
            }
        }

        Reply {
            text: predefined_reply(message).to_string(),
            source: ReplySource::Predefined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmSettings;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(
            predefined_reply("What are your HOURS?"),
            "Our business hours are Monday-Friday 9 AM to 6 PM EST."
        );
    }

    #[test]
    fn test_first_keyword_wins() {
        // "hello" precedes "pricing" in the table.
        assert!(predefined_reply("hello, pricing?").starts_with("Hello! Welcome"));
    }

    #[test]
    fn test_word_families() {
        assert!(predefined_reply("I found a bug").starts_with("I'm sorry to hear"));
        assert!(predefined_reply("Can I purchase now").starts_with("Great!"));
        assert!(predefined_reply("assist me").starts_with("I'm here to help!"));
    }

    #[test]
    fn test_default_reply() {
        assert_eq!(predefined_reply("quantum flux"), DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn test_without_llm_uses_table() {
        let service = ReplyService::default();
        assert!(!service.has_llm());

        let reply = service.reply("refund please").await;
        assert_eq!(reply.source, ReplySource::Predefined);
        assert!(reply.text.contains("30-day money-back"));
    }

    #[tokio::test]
    async fn test_llm_failure_falls_back() {
        // Bind and drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let llm = ChatCompletionsClient::new(LlmSettings {
            base_url: format!("http://{addr}"),
            api_key: None,
            model: "test-model".to_string(),
            max_tokens: 150,
            temperature: 0.7,
        });
        let service = ReplyService::new(Some(llm));

        let reply = service.reply("bye").await;
        assert_eq!(reply.source, ReplySource::Predefined);
        assert_eq!(reply.text, "Thank you for contacting us! Have a great day!");
        assert_eq!(reply.source.label(), "Predefined");
    }
}

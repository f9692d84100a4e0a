//! HTTP client for the `/chat` endpoint.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::RequestError;
use crate::types::{ChatRequest, ChatResponse};

/// A reply produced by the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub source: Option<String>,
}

/// Outbound side of the widget: one message in, one reply out.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &str) -> Result<ChatReply, RequestError>;
}

/// [`ChatBackend`] that posts to `{base_url}/chat`.
///
/// # Example
///
/// ```rust,no_run
/// use support_chat::client::{ChatBackend, HttpChatBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpChatBackend::new("http://127.0.0.1:5000")?;
/// let reply = backend.send("What are your hours?").await?;
/// println!("{}", reply.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpChatBackend {
    /// Create a backend for the server at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, RequestError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a backend with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self, RequestError> {
        let mut base = Url::parse(base_url.as_ref())?;
        // Resolve under the base path, not the host root.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("chat")?;
        Ok(Self { endpoint, http })
    }

    /// The full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str) -> Result<ChatReply, RequestError> {
        let req = ChatRequest {
            message: message.to_string(),
        };
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&req)
            .send()
            .await?;

        // Failures come back as a JSON envelope with a 4xx/5xx status, so the
        // body is read whatever the status.
        let status = response.status();
        let body = response.bytes().await?;
        debug!(
            name: "chat.client.response",
            status = status.as_u16(),
            bytes = body.len(),
            "Chat endpoint answered"
        );

        let envelope: ChatResponse = serde_json::from_slice(&body)?;
        into_reply(envelope)
    }
}

/// Interpret a reply envelope.
pub fn into_reply(envelope: ChatResponse) -> Result<ChatReply, RequestError> {
    if !envelope.success {
        return Err(RequestError::Rejected(
            envelope
                .error
                .unwrap_or_else(|| "Failed to get response".to_string()),
        ));
    }

    match envelope.response {
        Some(text) => Ok(ChatReply {
            text,
            source: envelope.source,
        }),
        None => Err(RequestError::EmptyReply),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_chat_path() {
        let backend = HttpChatBackend::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(backend.endpoint().as_str(), "http://127.0.0.1:5000/chat");

        let backend = HttpChatBackend::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(backend.endpoint().as_str(), "http://127.0.0.1:5000/chat");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let backend = HttpChatBackend::new("http://support.example.com/api").unwrap();
        assert_eq!(
            backend.endpoint().as_str(),
            "http://support.example.com/api/chat"
        );

        let backend = HttpChatBackend::new("http://support.example.com/api/").unwrap();
        assert_eq!(
            backend.endpoint().as_str(),
            "http://support.example.com/api/chat"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpChatBackend::new("not a url"),
            Err(RequestError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_successful_envelope() {
        let reply = into_reply(ChatResponse::reply("Hi!", "faq")).unwrap();
        assert_eq!(reply.text, "Hi!");
        assert_eq!(reply.source.as_deref(), Some("faq"));
    }

    #[test]
    fn test_unsuccessful_envelope() {
        let err = into_reply(ChatResponse::failure("Message is required")).unwrap_err();
        assert_eq!(err.to_string(), "Message is required");

        let err = into_reply(ChatResponse::default()).unwrap_err();
        assert_eq!(err.to_string(), "Failed to get response");
    }

    #[test]
    fn test_success_without_text() {
        let envelope = ChatResponse {
            success: true,
            ..ChatResponse::default()
        };
        assert!(matches!(into_reply(envelope), Err(RequestError::EmptyReply)));
    }
}

//! Wire types for the `/chat` and `/health` endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    #[serde(default)]
    pub message: String,
}

/// Reply envelope returned by `POST /chat`.
///
/// Failures are reported in-band with `success: false` and an `error` text,
/// whatever the HTTP status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Whether a reply was produced.
    #[serde(default)]
    pub success: bool,
    /// Reply text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Label of the component that produced the reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Human-readable failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    /// A successful reply.
    #[must_use]
    pub fn reply(response: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
            source: Some(source.into()),
            error: None,
        }
    }

    /// A failed reply.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

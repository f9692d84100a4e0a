//! Optional LLM used by the backend before falling back to canned replies.
//!
//! Any OpenAI-compatible Chat Completions endpoint works
//! (`{base_url}/v1/chat/completions`).

pub mod chat_completions;

pub use chat_completions::ChatCompletionsClient;

use crate::config::LlmConfig;

/// LLM connection and sampling settings.
#[derive(Clone)]
pub struct LlmSettings {
    /// Base URL for the LLM API (e.g., `https://api.openai.com`).
    pub base_url: String,
    /// Optional API key for authentication.
    pub api_key: Option<String>,
    /// Model identifier (e.g., `gpt-3.5-turbo`).
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Key shipped in sample `.env` files; never sent to a provider.
pub const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";

impl LlmSettings {
    /// Settings from the `llm` config section.
    ///
    /// Returns `None` unless an API key other than
    /// [`PLACEHOLDER_API_KEY`] is configured, along with a base URL and a
    /// model.
    #[must_use]
    pub fn from_config(config: &LlmConfig) -> Option<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY)?;
        let base_url = Some(config.base_url.trim()).filter(|s| !s.is_empty())?;
        let model = Some(config.model.trim()).filter(|s| !s.is_empty())?;

        Some(Self {
            base_url: base_url.to_string(),
            api_key: Some(api_key.to_string()),
            model: model.to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: api_key.map(ToString::to_string),
            max_tokens: 150,
            temperature: 0.7,
        }
    }

    #[test]
    fn test_key_enables_llm() {
        let settings = LlmSettings::from_config(&llm_config(Some("sk-real"))).unwrap();
        assert_eq!(settings.base_url, "https://api.openai.com");
        assert_eq!(settings.model, "gpt-3.5-turbo");
        assert_eq!(settings.api_key.as_deref(), Some("sk-real"));
    }

    #[test]
    fn test_missing_blank_or_placeholder_key_disables_llm() {
        assert!(LlmSettings::from_config(&llm_config(None)).is_none());
        assert!(LlmSettings::from_config(&llm_config(Some("  "))).is_none());
        assert!(LlmSettings::from_config(&llm_config(Some(PLACEHOLDER_API_KEY))).is_none());
    }

    #[test]
    fn test_requires_url_and_model() {
        let mut config = llm_config(Some("sk-real"));
        config.model = " ".to_string();
        assert!(LlmSettings::from_config(&config).is_none());

        let mut config = llm_config(Some("sk-real"));
        config.base_url = String::new();
        assert!(LlmSettings::from_config(&config).is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = LlmSettings::from_config(&llm_config(Some("sk-secret"))).unwrap();
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("sk-secret"));
    }
}

//! Groq Provider Implementation
//!
//! Talks to Groq's OpenAI-compatible chat completions endpoint. The API key is
//! read from `GROQ_API_KEY` unless given explicitly.
//!
//! ```no_run
//! use intake_llm::GroqProvider;
//!
//! let provider = GroqProvider::from_env().expect("GROQ_API_KEY must be set");
//! ```

use crate::http::{build_client, post_json_with_retry};
use crate::LlmError;
use intake_domain::traits::LlmProvider as LlmProviderTrait;
use intake_domain::ExtractionRequest;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Groq API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Default timeout for a single HTTP request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Groq chat completions provider
pub struct GroqProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl GroqProvider {
    /// Create a provider with an explicit endpoint, model and key
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a provider with default endpoint and model, key from `GROQ_API_KEY`
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_env_var(API_KEY_ENV)
    }

    /// Create a provider with default endpoint and model, key from `var`
    pub fn from_env_var(var: &str) -> Result<Self, LlmError> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::Configuration(format!("{} is not set", var)))?;
        Ok(Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key))
    }

    /// Use a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a different base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the per-request HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    fn build_request<'a>(&'a self, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: 0.0,
        }
    }

    /// Send one system/user exchange to `/chat/completions`
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = self.build_request(system, user);

        let response: ChatResponse = post_json_with_retry(
            &self.client,
            &url,
            &body,
            Some(&self.api_key),
            &self.model,
            self.max_retries,
        )
        .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))
    }
}

impl LlmProviderTrait for GroqProvider {
    type Error = LlmError;

    async fn generate(&self, request: &ExtractionRequest) -> Result<String, Self::Error> {
        self.complete(&request.instructions, request.user_message()).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_domain::RawInput;

    #[test]
    fn test_groq_provider_defaults() {
        let provider = GroqProvider::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, "key");
        assert_eq!(provider.model_name(), "llama-3.3-70b-versatile");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_groq_missing_key() {
        let result = GroqProvider::from_env_var("INTAKE_TEST_UNSET_GROQ_KEY");
        assert!(matches!(result, Err(LlmError::Configuration(_))));
    }

    #[test]
    fn test_chat_request_shape() {
        let provider = GroqProvider::new("https://example.test/v1/", "m", "key");
        assert_eq!(provider.endpoint, "https://example.test/v1");

        let body = provider.build_request("Extract the phone number.", "it's +923207373878");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "Extract the phone number.");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "it's +923207373878");
    }

    #[test]
    fn test_chat_response_parsing() {
        let raw = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"03207673078"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("03207673078")
        );
    }

    #[tokio::test]
    async fn test_groq_unreachable_endpoint() {
        let provider = GroqProvider::new("http://localhost:99999", DEFAULT_MODEL, "key")
            .with_max_retries(1);
        let request = ExtractionRequest::new("Extract.", RawInput::new("test"));

        let result = provider.generate(&request).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}

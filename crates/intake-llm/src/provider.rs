//! Runtime provider selection

use crate::{groq, ollama, GroqProvider, LlmError, OllamaProvider};
use intake_domain::traits::LlmProvider as LlmProviderTrait;
use intake_domain::ExtractionRequest;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which extraction backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local Ollama server
    Ollama,
    /// Groq hosted API
    Groq,
}

/// Serializable provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Backend
    pub kind: ProviderKind,

    /// Base URL; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variable holding the API key (Groq only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Per-request HTTP timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Transport-level retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_request_timeout_secs() -> u64 {
    ollama::DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    ollama::DEFAULT_MAX_RETRIES
}

impl ProviderSettings {
    /// Local Ollama with default endpoint and model
    pub fn ollama() -> Self {
        Self {
            kind: ProviderKind::Ollama,
            endpoint: None,
            model: None,
            api_key_env: None,
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }

    /// Groq with default endpoint and model, key from `GROQ_API_KEY`
    pub fn groq() -> Self {
        Self {
            kind: ProviderKind::Groq,
            ..Self::ollama()
        }
    }

    /// The model that will be used
    pub fn effective_model(&self) -> &str {
        match (&self.model, self.kind) {
            (Some(model), _) => model,
            (None, ProviderKind::Ollama) => ollama::DEFAULT_MODEL,
            (None, ProviderKind::Groq) => groq::DEFAULT_MODEL,
        }
    }

    /// The endpoint that will be used
    pub fn effective_endpoint(&self) -> &str {
        match (&self.endpoint, self.kind) {
            (Some(endpoint), _) => endpoint,
            (None, ProviderKind::Ollama) => ollama::DEFAULT_ENDPOINT,
            (None, ProviderKind::Groq) => groq::DEFAULT_ENDPOINT,
        }
    }

    /// Build the provider
    ///
    /// Fails for Groq when the API key variable is unset.
    pub fn build(&self) -> Result<Provider, LlmError> {
        let timeout = Duration::from_secs(self.request_timeout_secs.max(1));

        match self.kind {
            ProviderKind::Ollama => Ok(Provider::Ollama(
                OllamaProvider::new(self.effective_endpoint(), self.effective_model())
                    .with_timeout(timeout)
                    .with_max_retries(self.max_retries),
            )),
            ProviderKind::Groq => {
                let var = self.api_key_env.as_deref().unwrap_or(groq::API_KEY_ENV);
                let provider = GroqProvider::from_env_var(var)?
                    .with_endpoint(self.effective_endpoint())
                    .with_model(self.effective_model())
                    .with_timeout(timeout)
                    .with_max_retries(self.max_retries);
                Ok(Provider::Groq(provider))
            }
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self::ollama()
    }
}

/// A provider chosen at runtime
pub enum Provider {
    /// Ollama backend
    Ollama(OllamaProvider),
    /// Groq backend
    Groq(GroqProvider),
}

impl LlmProviderTrait for Provider {
    type Error = LlmError;

    async fn generate(&self, request: &ExtractionRequest) -> Result<String, Self::Error> {
        match self {
            Provider::Ollama(provider) => provider.generate(request).await,
            Provider::Groq(provider) => provider.generate(request).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Provider::Ollama(provider) => provider.model_name(),
            Provider::Groq(provider) => provider.model_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_defaults() {
        let settings = ProviderSettings::ollama();
        assert_eq!(settings.effective_endpoint(), ollama::DEFAULT_ENDPOINT);
        assert_eq!(settings.effective_model(), ollama::DEFAULT_MODEL);

        let settings = ProviderSettings::groq();
        assert_eq!(settings.effective_endpoint(), groq::DEFAULT_ENDPOINT);
        assert_eq!(settings.effective_model(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_build_ollama() {
        let settings = ProviderSettings {
            model: Some("mistral".to_string()),
            ..ProviderSettings::ollama()
        };
        let provider = settings.build().unwrap();
        assert!(matches!(provider, Provider::Ollama(_)));
        assert_eq!(provider.model_name(), "mistral");
    }

    #[test]
    fn test_build_groq_without_key_fails() {
        let settings = ProviderSettings {
            api_key_env: Some("INTAKE_TEST_MISSING_KEY".to_string()),
            ..ProviderSettings::groq()
        };
        assert!(matches!(settings.build(), Err(LlmError::Configuration(_))));
    }

    #[test]
    fn test_settings_serde_defaults() {
        let settings: ProviderSettings = from_json(r#"{"kind":"groq","model":"llama-3.1-8b-instant"}"#);
        assert_eq!(settings.kind, ProviderKind::Groq);
        assert_eq!(settings.request_timeout_secs, ollama::DEFAULT_TIMEOUT_SECS);
        assert_eq!(settings.max_retries, ollama::DEFAULT_MAX_RETRIES);
        assert_eq!(settings.effective_model(), "llama-3.1-8b-instant");
    }

    fn from_json(json: &str) -> ProviderSettings {
        serde_json::from_str(json).unwrap()
    }
}

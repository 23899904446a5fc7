//! Intake LLM Provider Layer
//!
//! Extraction-service implementations of the `LlmProvider` trait from
//! `intake-domain`. Every provider sends the field's instructions as the system
//! message and the operator's raw input as the user message, and returns the
//! service's text response untouched.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing, doubles as a spy
//! - `OllamaProvider`: Local Ollama API integration
//! - `GroqProvider`: Groq's OpenAI-compatible chat completions API
//! - `Provider`: Runtime-selected provider built from `ProviderSettings`
//!
//! # Examples
//!
//! ```
//! use intake_domain::traits::LlmProvider;
//! use intake_domain::{ExtractionRequest, RawInput};
//! use intake_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("03207673078");
//! let request = ExtractionRequest::new("Extract the phone number.", RawInput::new("it's 03207673078"));
//! assert_eq!(provider.generate(&request).await.unwrap(), "03207673078");
//! # }
//! ```

#![warn(missing_docs)]

mod http;
pub mod groq;
pub mod ollama;
pub mod provider;

use intake_domain::traits::LlmProvider as LlmProviderTrait;
use intake_domain::ExtractionRequest;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use groq::GroqProvider;
pub use ollama::OllamaProvider;
pub use provider::{Provider, ProviderKind, ProviderSettings};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The service rejected our credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Provider is misconfigured (missing API key, bad endpoint)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Scripted reply for one input
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
    Hang,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are keyed by the operator's raw input (the user message), falling
/// back to a default response. Every request is recorded so tests can assert
/// whether extraction was invoked at all.
///
/// # Examples
///
/// ```
/// use intake_llm::MockProvider;
///
/// let mut provider = MockProvider::new("Invalid");
/// provider.add_response("my number is 03207673078", "03207673078");
/// provider.add_error("trigger a failure");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    requests: Arc<Mutex<Vec<ExtractionRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all inputs
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given raw input
    pub fn add_response(&mut self, input: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(input.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific raw input
    pub fn add_error(&mut self, input: impl Into<String>) {
        lock(&self.responses).insert(input.into(), MockReply::Error);
    }

    /// Configure to never answer for a specific raw input
    pub fn add_hang(&mut self, input: impl Into<String>) {
        lock(&self.responses).insert(input.into(), MockReply::Hang);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<ExtractionRequest> {
        lock(&self.requests).clone()
    }

    /// Forget recorded requests
    pub fn reset_call_count(&self) {
        lock(&self.requests).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, request: &ExtractionRequest) -> Result<String, Self::Error> {
        let reply = {
            lock(&self.requests).push(request.clone());
            lock(&self.responses).get(request.user_message()).cloned()
        };

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error) => Err(LlmError::Other("Mock error".to_string())),
            Some(MockReply::Hang) => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(LlmError::Other("Mock hang elapsed".to_string()))
            }
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

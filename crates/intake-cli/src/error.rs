//! Error types for the CLI application.

use intake_extractor::{AbandonReason, ExtractorError};
use intake_gatekeeper::GatekeeperError;
use intake_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction service setup error
    #[error("Provider error: {0}")]
    Llm(#[from] LlmError),

    /// Extraction or collection error
    #[error("{0}")]
    Extractor(#[from] ExtractorError),

    /// Validation setup error
    #[error("Validation error: {0}")]
    Gatekeeper(#[from] GatekeeperError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal line editor error
    #[error("Terminal error: {0}")]
    Readline(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// A field could not be collected
    #[error("No valid value for '{field}': {reason}")]
    Abandoned {
        /// Field being collected
        field: String,
        /// Why collection stopped
        reason: AbandonReason,
    },
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Readline(err.to_string())
    }
}

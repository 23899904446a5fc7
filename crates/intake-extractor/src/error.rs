//! Error types for the Extractor

use intake_gatekeeper::GatekeeperError;
use thiserror::Error;

/// Errors that can occur during extraction and collection
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Input exceeds maximum length
    #[error("Input too long: {0} chars (max: {1})")]
    InputTooLong(usize, usize),

    /// Extraction timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Gatekeeper could not be built for a field
    #[error("Validation setup error: {0}")]
    Gatekeeper(#[from] GatekeeperError),

    /// The operator channel failed
    #[error("Channel error: {0}")]
    Channel(String),

    /// A collected value could not be used (e.g. non-positive age)
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Unknown field profile
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// True for extraction-service failures the collection loop recovers from
    pub fn is_service_failure(&self) -> bool {
        matches!(self, ExtractorError::Llm(_) | ExtractorError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_failures() {
        assert!(ExtractorError::Timeout.is_service_failure());
        assert!(ExtractorError::Llm("down".into()).is_service_failure());
        assert!(!ExtractorError::InputTooLong(10, 5).is_service_failure());
        assert!(!ExtractorError::Channel("closed".into()).is_service_failure());
    }
}

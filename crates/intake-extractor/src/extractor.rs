//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::normalize_response;
use crate::profile::{FieldProfile, Normalization};
use crate::prompt::PromptBuilder;
use intake_domain::traits::LlmProvider;
use intake_domain::{Candidate, ExtractionRequest, RawInput};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Sends operator input to the extraction service for one field
///
/// The returned [`Candidate`] is advisory and must still be validated.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
    field: String,
    instructions: String,
    normalization: Normalization,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Send + Sync,
    L::Error: std::fmt::Display,
{
    /// Create an Extractor for a field profile
    pub fn new(llm_provider: Arc<L>, profile: &FieldProfile, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            config,
            field: profile.name.clone(),
            instructions: PromptBuilder::for_profile(profile).build(),
            normalization: profile.normalization,
        }
    }

    /// The instruction text sent with every request
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Extract a candidate from raw operator input
    pub async fn extract(&self, input: &RawInput) -> Result<Candidate, ExtractorError> {
        let length = input.char_len();
        if length > self.config.max_input_length {
            return Err(ExtractorError::InputTooLong(
                length,
                self.config.max_input_length,
            ));
        }

        let request = ExtractionRequest::new(self.instructions.clone(), input.clone());

        debug!(
            "Extracting '{}' with {} ({} chars of input)",
            self.field,
            self.llm_provider.model_name(),
            length
        );

        let response = timeout(
            self.config.extraction_timeout(),
            self.llm_provider.generate(&request),
        )
        .await
        .map_err(|_| {
            warn!(
                "Extraction of '{}' timed out after {}s",
                self.field, self.config.extraction_timeout_secs
            );
            ExtractorError::Timeout
        })?
        .map_err(|e| {
            warn!("Extraction of '{}' failed: {}", self.field, e);
            ExtractorError::Llm(e.to_string())
        })?;

        let candidate = normalize_response(&response, self.normalization);
        debug!("Field '{}' candidate: {:?}", self.field, candidate.as_str());
        Ok(candidate)
    }
}

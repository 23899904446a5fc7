//! Trait definitions for external interactions
//!
//! These traits define the boundaries between intake logic and infrastructure.
//! Implementations live in other crates.

use std::future::Future;

use crate::{ExtractionRequest, Notice};

/// Trait for extraction-service (LLM) operations
///
/// Implemented by the infrastructure layer (intake-llm). The response is
/// advisory: callers must still validate it.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Ask the service to extract a value from the request's input
    ///
    /// By contract the response is either a single normalized value or the
    /// literal `Invalid`.
    fn generate(
        &self,
        request: &ExtractionRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

/// Trait for the prompt/notice channel to an operator
///
/// Implemented by the interface layer (terminal, scripted input, web form).
pub trait OperatorChannel {
    /// Error type for channel I/O
    type Error;

    /// Show `message` and read back one line
    ///
    /// Returns `Ok(None)` once the operator has closed the channel.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, Self::Error>;

    /// Show an informational or corrective notice
    fn notice(&mut self, notice: &Notice) -> Result<(), Self::Error>;
}

//! Extraction requests sent to an external extraction service

use crate::field::RawInput;

/// Instructional template plus operator input
///
/// Providers render `instructions` as the system message and the raw input as
/// the user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Fixed instructional text describing what to extract and how to answer
    pub instructions: String,

    /// The operator's text for this cycle
    pub input: RawInput,
}

impl ExtractionRequest {
    /// Create a new request
    pub fn new(instructions: impl Into<String>, input: RawInput) -> Self {
        Self {
            instructions: instructions.into(),
            input,
        }
    }

    /// The operator text to send as the user message
    pub fn user_message(&self) -> &str {
        self.input.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_keeps_input_verbatim() {
        let request = ExtractionRequest::new(
            "Extract the phone number.",
            RawInput::new("  my number is 03207673078 "),
        );
        assert_eq!(request.instructions, "Extract the phone number.");
        assert_eq!(request.user_message(), "  my number is 03207673078 ");
    }
}

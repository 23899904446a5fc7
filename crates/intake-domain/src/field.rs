//! Raw operator input and extraction candidates

use std::fmt;

/// Reserved literal an extraction service returns when it found no plausible value
pub const SENTINEL_INVALID: &str = "Invalid";

/// Operator-supplied text for a single prompt cycle
///
/// Raw input is never handed back to a caller as a result. It only exists to
/// be sent for extraction and is dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput(String);

impl RawInput {
    /// Wrap operator text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text exactly as the operator typed it
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the input is empty or whitespace-only
    ///
    /// # Examples
    ///
    /// ```
    /// use intake_domain::RawInput;
    ///
    /// assert!(RawInput::new("   \t").is_blank());
    /// assert!(!RawInput::new(" 0320 ").is_blank());
    /// ```
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RawInput {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// A value returned by the extraction service, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate(String);

impl Candidate {
    /// Wrap a service response
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The candidate text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the candidate, returning its text
    pub fn into_inner(self) -> String {
        self.0
    }

    /// True if the candidate is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the candidate is exactly the `Invalid` sentinel
    pub fn is_sentinel(&self) -> bool {
        self.0 == SENTINEL_INVALID
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input() {
        assert!(RawInput::new("").is_blank());
        assert!(RawInput::new("  \n ").is_blank());
        assert!(!RawInput::new("my number is 03207673078").is_blank());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(RawInput::new("").word_count(), 0);
        assert_eq!(RawInput::new("House 12,  Street 4 ").word_count(), 4);
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(RawInput::new("آمنہ").char_len(), 4);
    }

    #[test]
    fn test_sentinel_detection() {
        assert!(Candidate::new("Invalid").is_sentinel());
        assert!(!Candidate::new("invalid").is_sentinel());
        assert!(!Candidate::new("03207673078").is_sentinel());
    }

    #[test]
    fn test_candidate_display() {
        let candidate = Candidate::new("+923207373878");
        assert_eq!(candidate.to_string(), "+923207373878");
        assert_eq!(candidate.into_inner(), "+923207373878");
    }
}

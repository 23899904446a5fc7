//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for extraction and the collection loop
///
/// Missing TOML keys take their values from [`ExtractorConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum raw input length (characters)
    pub max_input_length: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Rejected cycles allowed before a field is abandoned
    ///
    /// `None` retries forever. Blank input never counts as an attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_length == 0 {
            return Err("max_input_length must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if self.max_attempts == Some(0) {
            return Err("max_attempts must be greater than 0 when set".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Unbounded retries, 30 second extraction timeout
    fn default() -> Self {
        Self {
            max_input_length: 2_000,
            extraction_timeout_secs: 30,
            max_attempts: None,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: short inputs, short timeout, three attempts per field
    pub fn strict() -> Self {
        Self {
            max_input_length: 500,
            extraction_timeout_secs: 15,
            max_attempts: Some(3),
        }
    }

    /// Lenient preset: long inputs and a patient timeout for slow local models
    pub fn lenient() -> Self {
        Self {
            max_input_length: 10_000,
            extraction_timeout_secs: 120,
            max_attempts: None,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_attempts, None);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::strict().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
        assert_eq!(ExtractorConfig::strict().max_attempts, Some(3));
    }

    #[test]
    fn test_zero_attempts_invalid() {
        let config = ExtractorConfig {
            max_attempts: Some(0),
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_invalid() {
        let mut config = ExtractorConfig::default();
        config.extraction_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("max_attempts = 4\n").unwrap();
        assert_eq!(parsed.max_attempts, Some(4));
        assert_eq!(parsed.extraction_timeout_secs, 30);
    }

    #[test]
    fn test_toml_without_max_attempts_is_unbounded() {
        let parsed = ExtractorConfig::from_toml(
            "max_input_length = 100\nextraction_timeout_secs = 5\n",
        )
        .unwrap();
        assert_eq!(parsed.max_attempts, None);
        assert_eq!(parsed.extraction_timeout(), Duration::from_secs(5));
    }
}

//! Gatekeeper configuration

use intake_domain::SENTINEL_INVALID;
use serde::{Deserialize, Serialize};

/// Inclusive integer bounds for numeric fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericRange {
    /// Smallest accepted value
    pub min: i64,
    /// Largest accepted value
    pub max: i64,
}

impl NumericRange {
    /// True if `value` lies within the bounds
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Validation rules for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Regular expression the whole candidate must match
    pub pattern: String,

    /// Human description of the accepted format, used in rejection notices
    pub description: String,

    /// Concrete accepted values, at least one per accepted form
    #[serde(default)]
    pub examples: Vec<String>,

    /// Literal responses meaning "nothing found"; rejected before the grammar runs
    #[serde(default = "default_sentinels")]
    pub sentinels: Vec<String>,

    /// Compare sentinels ignoring ASCII case
    #[serde(default)]
    pub sentinel_ignore_case: bool,

    /// Accepted numeric range, for numeric fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_range: Option<NumericRange>,

    /// Maximum number of whitespace-separated words
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_words: Option<usize>,
}

fn default_sentinels() -> Vec<String> {
    vec![SENTINEL_INVALID.to_string()]
}

impl ValidationConfig {
    /// Create a configuration with the default `Invalid` sentinel
    pub fn new(pattern: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            description: description.into(),
            examples: Vec::new(),
            sentinels: default_sentinels(),
            sentinel_ignore_case: false,
            numeric_range: None,
            max_words: None,
        }
    }

    /// Add accepted example values
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples.extend(examples.into_iter().map(Into::into));
        self
    }

    /// Pakistani phone numbers: `03` + 9 digits, or `+92` + 10 digits
    pub fn pakistani_phone() -> Self {
        Self::new(
            r"03[0-9]{9}|\+92[0-9]{10}",
            "Please provide a valid Pakistani phone number: 03 followed by 9 digits, or +92 followed by 10 digits",
        )
        .with_examples(["03207673078", "+923207373878"])
    }

    /// A human name: letters, spaces, apostrophes, hyphens and dots
    pub fn person_name() -> Self {
        Self {
            sentinels: vec!["Not a valid name.".to_string(), SENTINEL_INVALID.to_string()],
            sentinel_ignore_case: true,
            ..Self::new(
                r"\p{L}[\p{L}\p{M} .'\-]{0,99}",
                "Please provide a valid name",
            )
            .with_examples(["Ayesha Khan"])
        }
    }

    /// Age in whole years, 1 to 100
    pub fn age() -> Self {
        Self {
            numeric_range: Some(NumericRange { min: 1, max: 100 }),
            ..Self::new(r"[0-9]{1,3}", "Age must be a whole number between 1 and 100")
                .with_examples(["34"])
        }
    }

    /// Gender code: `M`, `F` or `N` (prefer not to say)
    pub fn gender() -> Self {
        Self {
            sentinel_ignore_case: true,
            ..Self::new(
                r"[MFN]",
                "Please specify Male, Female, or Prefer not to say",
            )
            .with_examples(["M", "F", "N"])
        }
    }

    /// Free-text postal address of at most 50 words
    pub fn address() -> Self {
        Self {
            sentinels: vec![
                "INVALID".to_string(),
                "TOO LONG".to_string(),
            ],
            sentinel_ignore_case: true,
            max_words: Some(50),
            ..Self::new(
                r"\S(?s:.*)",
                "Please provide a proper address of 50 words or less",
            )
            .with_examples(["House 12, Street 4, G-9/1, Islamabad"])
        }
    }

    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.pattern.trim().is_empty() {
            return Err("pattern must not be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        if self.examples.is_empty() {
            return Err("at least one example is required".to_string());
        }
        if let Some(range) = self.numeric_range {
            if range.min > range.max {
                return Err(format!(
                    "numeric_range min {} exceeds max {}",
                    range.min, range.max
                ));
            }
        }
        if self.max_words == Some(0) {
            return Err("max_words must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for config in [
            ValidationConfig::pakistani_phone(),
            ValidationConfig::person_name(),
            ValidationConfig::age(),
            ValidationConfig::gender(),
            ValidationConfig::address(),
        ] {
            assert!(config.validate().is_ok(), "{:?}", config);
        }
    }

    #[test]
    fn test_default_sentinel() {
        let config = ValidationConfig::new(r"\d+", "digits");
        assert_eq!(config.sentinels, vec!["Invalid".to_string()]);
        assert!(!config.sentinel_ignore_case);
    }

    #[test]
    fn test_missing_examples_rejected() {
        let config = ValidationConfig::new(r"\d+", "digits");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = ValidationConfig::age();
        config.numeric_range = Some(NumericRange { min: 10, max: 1 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_defaults() {
        let config: ValidationConfig = toml::from_str(
            r#"
            pattern = '[^@\s]+@[^@\s]+\.[a-z]{2,}'
            description = "Please provide a valid email address"
            examples = ["patient@example.com"]
            "#,
        )
        .unwrap();

        assert_eq!(config.sentinels, vec!["Invalid".to_string()]);
        assert!(config.numeric_range.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_range_contains() {
        let range = NumericRange { min: 1, max: 100 };
        assert!(range.contains(1));
        assert!(range.contains(100));
        assert!(!range.contains(0));
        assert!(!range.contains(101));
    }
}

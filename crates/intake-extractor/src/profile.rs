//! Field profiles: everything needed to collect one field
//!
//! A profile pairs the operator prompt and LLM instructions with the
//! validation rules for the field. Built-in profiles cover the patient
//! registration fields; custom profiles can be loaded from TOML.

use intake_domain::RawInput;
use intake_gatekeeper::{Gatekeeper, GatekeeperError, ValidationConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ExtractorError;

/// Name of the built-in phone profile
pub const PHONE: &str = "phone";
/// Name of the built-in name profile
pub const NAME: &str = "name";
/// Name of the built-in age profile
pub const AGE: &str = "age";
/// Name of the built-in gender profile
pub const GENDER: &str = "gender";
/// Name of the built-in address profile
pub const ADDRESS: &str = "address";

/// Post-processing applied to the service response before validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Use the trimmed response as is
    #[default]
    Verbatim,
    /// Upper-case the response
    Uppercase,
    /// Keep only the first run of ASCII digits, if there is one
    FirstNumber,
}

/// Checks on the raw input that run before any extraction call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputGuard {
    /// Regex the raw input must contain somewhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub must_contain: Option<String>,

    /// Maximum words in the raw input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_words: Option<usize>,

    /// Notice shown when a guard fails; defaults to the rejection message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InputGuard {
    fn is_empty(&self) -> bool {
        self.must_contain.is_none() && self.max_words.is_none()
    }
}

/// Compiled form of an [`InputGuard`]
#[derive(Debug, Clone)]
pub(crate) struct CompiledGuard {
    must_contain: Option<Regex>,
    max_words: Option<usize>,
    message: Option<String>,
}

impl CompiledGuard {
    pub(crate) fn new(guard: &InputGuard) -> Result<Self, ExtractorError> {
        let must_contain = guard
            .must_contain
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| ExtractorError::Config(format!("invalid input guard: {}", e)))?;
        Ok(Self {
            must_contain,
            max_words: guard.max_words,
            message: guard.message.clone(),
        })
    }

    /// True if the input passes every guard
    pub(crate) fn permits(&self, input: &RawInput) -> bool {
        if let Some(re) = &self.must_contain {
            if !re.is_match(input.as_str()) {
                return false;
            }
        }
        match self.max_words {
            Some(max) => input.word_count() <= max,
            None => true,
        }
    }

    pub(crate) fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Everything needed to collect one field from an operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldProfile {
    /// Field identifier, e.g. `phone`
    pub name: String,

    /// Human-readable label, e.g. `Phone number`
    pub label: String,

    /// Text shown to the operator when asking for input
    pub prompt: String,

    /// What the extraction service should pull out of the input
    pub instructions: String,

    /// Rules a candidate must pass
    pub validation: ValidationConfig,

    /// Response post-processing
    #[serde(default)]
    pub normalization: Normalization,

    /// Raw-input checks run before extraction
    #[serde(default, skip_serializing_if = "InputGuard::is_empty")]
    pub guard: InputGuard,

    /// Lower-case operator inputs mapped directly to a canonical value
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,

    /// Notice shown on blank input
    #[serde(default = "default_empty_notice")]
    pub empty_notice: String,
}

fn default_empty_notice() -> String {
    "Input cannot be empty. Please try again.".to_string()
}

impl FieldProfile {
    /// Pakistani phone number
    pub fn phone() -> Self {
        Self {
            name: PHONE.to_string(),
            label: "Phone number".to_string(),
            prompt: "Enter your phone number: ".to_string(),
            instructions: "\
Extract only the phone number from the given input.
The phone number must be a valid Pakistani number in one of these formats:
- 03 followed by exactly 9 digits (11 digits in total), e.g. 03207673078
- +92 followed by exactly 10 digits, e.g. +923207373878
Return the phone number exactly as written, without adding, removing or changing any character."
                .to_string(),
            validation: ValidationConfig::pakistani_phone(),
            normalization: Normalization::Verbatim,
            guard: InputGuard::default(),
            aliases: BTreeMap::new(),
            empty_notice: "Phone number cannot be empty. Please try again.".to_string(),
        }
    }

    /// Full name of a person
    pub fn name() -> Self {
        Self {
            name: NAME.to_string(),
            label: "Name".to_string(),
            prompt: "Enter your name: ".to_string(),
            instructions: "\
Extract the full name of the person from the given input.
A valid name contains only letters, spaces, apostrophes, hyphens and dots.
If the input is a greeting, a number, or anything other than a name, treat it as having no name."
                .to_string(),
            validation: ValidationConfig::person_name(),
            normalization: Normalization::Verbatim,
            guard: InputGuard::default(),
            aliases: BTreeMap::new(),
            empty_notice: "Name cannot be empty. Please try again.".to_string(),
        }
    }

    /// Age in whole years
    pub fn age() -> Self {
        Self {
            name: AGE.to_string(),
            label: "Age".to_string(),
            prompt: "Enter your age: ".to_string(),
            instructions: "\
Extract the age of the person, in whole years, from the given input.
Return only the number, for example 34."
                .to_string(),
            validation: ValidationConfig::age(),
            normalization: Normalization::FirstNumber,
            guard: InputGuard {
                must_contain: Some("[0-9]".to_string()),
                max_words: None,
                message: Some("Please enter a numeric age between 1 and 100.".to_string()),
            },
            aliases: BTreeMap::new(),
            empty_notice: "Age cannot be empty. Please try again.".to_string(),
        }
    }

    /// Gender code `M`, `F` or `N`
    pub fn gender() -> Self {
        let aliases = [
            ("male", "M"),
            ("m", "M"),
            ("female", "F"),
            ("f", "F"),
            ("prefer not to say", "N"),
            ("prefer not", "N"),
            ("n", "N"),
        ]
        .into_iter()
        .map(|(alias, code)| (alias.to_string(), code.to_string()))
        .collect();

        Self {
            name: GENDER.to_string(),
            label: "Gender".to_string(),
            prompt: "Enter your gender (Male/Female/Prefer not to say): ".to_string(),
            instructions: "\
Classify the gender stated in the given input.
Return M for male, F for female, or N if the person prefers not to say."
                .to_string(),
            validation: ValidationConfig::gender(),
            normalization: Normalization::Uppercase,
            guard: InputGuard::default(),
            aliases,
            empty_notice: "Gender cannot be empty. Please try again.".to_string(),
        }
    }

    /// Postal address of at most 50 words
    pub fn address() -> Self {
        Self {
            name: ADDRESS.to_string(),
            label: "Address".to_string(),
            prompt: "Enter your address (max 50 words): ".to_string(),
            instructions: "\
Extract the postal address from the given input.
Keep house number, street, area and city as written.
If the address is longer than 50 words, return exactly TOO LONG."
                .to_string(),
            validation: ValidationConfig::address(),
            normalization: Normalization::Verbatim,
            guard: InputGuard {
                must_contain: None,
                max_words: Some(50),
                message: Some("Address is too long. Please keep it under 50 words.".to_string()),
            },
            aliases: BTreeMap::new(),
            empty_notice: "Address cannot be empty. Please try again.".to_string(),
        }
    }

    /// All built-in profiles, in registration order
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::name(),
            Self::gender(),
            Self::phone(),
            Self::age(),
            Self::address(),
        ]
    }

    /// Build the gatekeeper for this field
    pub fn gatekeeper(&self) -> Result<Gatekeeper, GatekeeperError> {
        Gatekeeper::new(self.name.clone(), self.validation.clone())
    }

    /// Canonical value for an alias, matched case-insensitively on trimmed input
    pub fn alias_for(&self, input: &RawInput) -> Option<&str> {
        let key = input.as_str().trim().to_lowercase();
        self.aliases.get(&key).map(String::as_str)
    }

    /// Check the profile for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("field name must not be empty".to_string());
        }
        if self.instructions.trim().is_empty() {
            return Err(format!("field '{}': instructions must not be empty", self.name));
        }
        self.validation
            .validate()
            .map_err(|e| format!("field '{}': {}", self.name, e))?;
        if self.guard.max_words == Some(0) {
            return Err(format!("field '{}': guard max_words must be greater than 0", self.name));
        }
        Ok(())
    }

    /// Load a profile from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize the profile to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// The set of field profiles available by name
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    profiles: BTreeMap<String, FieldProfile>,
}

impl FieldCatalog {
    /// Catalog of the built-in profiles
    pub fn builtin() -> Self {
        Self {
            profiles: FieldProfile::builtin()
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
        }
    }

    /// Add custom profiles; a custom profile replaces a built-in of the same name
    pub fn with_custom<I>(mut self, custom: I) -> Result<Self, ExtractorError>
    where
        I: IntoIterator<Item = FieldProfile>,
    {
        for profile in custom {
            profile.validate().map_err(ExtractorError::Config)?;
            self.profiles.insert(profile.name.clone(), profile);
        }
        Ok(self)
    }

    /// Look up a profile
    pub fn get(&self, name: &str) -> Result<&FieldProfile, ExtractorError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ExtractorError::UnknownField(name.to_string()))
    }

    /// Profile names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// All profiles in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &FieldProfile> {
        self.profiles.values()
    }

    /// Number of profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// True if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_are_valid() {
        for profile in FieldProfile::builtin() {
            assert!(profile.validate().is_ok(), "{}", profile.name);
            assert!(profile.gatekeeper().is_ok(), "{}", profile.name);
            assert!(CompiledGuard::new(&profile.guard).is_ok(), "{}", profile.name);
        }
    }

    #[test]
    fn test_gender_aliases() {
        let gender = FieldProfile::gender();
        assert_eq!(gender.alias_for(&RawInput::new("Male")), Some("M"));
        assert_eq!(gender.alias_for(&RawInput::new("  f ")), Some("F"));
        assert_eq!(gender.alias_for(&RawInput::new("Prefer not to say")), Some("N"));
        assert_eq!(gender.alias_for(&RawInput::new("I am a woman")), None);
    }

    #[test]
    fn test_phone_has_no_aliases() {
        let phone = FieldProfile::phone();
        assert_eq!(phone.alias_for(&RawInput::new("m")), None);
    }

    #[test]
    fn test_age_guard_requires_digit() {
        let guard = CompiledGuard::new(&FieldProfile::age().guard).unwrap();
        assert!(guard.permits(&RawInput::new("I am 34")));
        assert!(!guard.permits(&RawInput::new("thirty four")));
        assert!(guard.message().is_some());
    }

    #[test]
    fn test_address_guard_word_limit() {
        let guard = CompiledGuard::new(&FieldProfile::address().guard).unwrap();
        let long = vec!["word"; 51].join(" ");
        let ok = vec!["word"; 50].join(" ");
        assert!(!guard.permits(&RawInput::new(long)));
        assert!(guard.permits(&RawInput::new(ok)));
    }

    #[test]
    fn test_invalid_guard_regex() {
        let guard = InputGuard {
            must_contain: Some("(".to_string()),
            ..InputGuard::default()
        };
        assert!(matches!(
            CompiledGuard::new(&guard),
            Err(ExtractorError::Config(_))
        ));
    }

    #[test]
    fn test_custom_profile_from_toml() {
        let profile = FieldProfile::from_toml(
            r#"
            name = "email"
            label = "Email"
            prompt = "Enter your email: "
            instructions = "Extract the email address."

            [validation]
            pattern = '[^@\s]+@[^@\s]+\.[a-z]{2,}'
            description = "Please provide a valid email address"
            examples = ["patient@example.com"]
            "#,
        )
        .unwrap();

        assert_eq!(profile.normalization, Normalization::Verbatim);
        assert!(profile.aliases.is_empty());
        assert_eq!(profile.empty_notice, default_empty_notice());

        let catalog = FieldCatalog::builtin().with_custom([profile]).unwrap();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.get("email").is_ok());
    }

    #[test]
    fn test_profile_toml_round_trip() {
        let gender = FieldProfile::gender();
        let parsed = FieldProfile::from_toml(&gender.to_toml().unwrap()).unwrap();
        assert_eq!(gender, parsed);
    }

    #[test]
    fn test_custom_profile_must_be_valid() {
        let mut broken = FieldProfile::phone();
        broken.validation.examples.clear();
        assert!(FieldCatalog::builtin().with_custom([broken]).is_err());
    }

    #[test]
    fn test_unknown_field() {
        let catalog = FieldCatalog::builtin();
        assert!(matches!(
            catalog.get("blood_type"),
            Err(ExtractorError::UnknownField(_))
        ));
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec!["address", "age", "gender", "name", "phone"]
        );
    }
}

//! Candidate validation logic

use crate::{FieldGrammar, GatekeeperError, ValidationConfig};
use intake_domain::Candidate;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Result of candidate validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the candidate passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,

    /// Whether the grammar was consulted at all
    ///
    /// False when the candidate was rejected up front as empty or a sentinel.
    pub grammar_evaluated: bool,
}

impl ValidationResult {
    fn accepted() -> Self {
        Self {
            status: ValidationStatus::Accepted,
            reasons: Vec::new(),
            grammar_evaluated: true,
        }
    }

    fn rejected(reason: RejectionReason, grammar_evaluated: bool) -> Self {
        Self {
            status: ValidationStatus::Rejected,
            reasons: vec![reason],
            grammar_evaluated,
        }
    }

    /// True if the candidate was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Candidate accepted
    Accepted,

    /// Candidate rejected
    Rejected,
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The extraction service returned nothing
    EmptyCandidate,

    /// The extraction service returned a "nothing found" sentinel
    Sentinel(String),

    /// The candidate does not match the grammar in full
    GrammarMismatch {
        /// The rejected candidate
        value: String,
        /// The pattern it was checked against
        pattern: String,
    },

    /// The candidate matched the grammar but is not a number
    NotANumber(String),

    /// Numeric value outside the accepted range
    OutOfRange {
        /// Parsed value
        value: i64,
        /// Smallest accepted value
        min: i64,
        /// Largest accepted value
        max: i64,
    },

    /// Too many words
    TooManyWords {
        /// Words in the candidate
        count: usize,
        /// Maximum accepted
        max: usize,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::EmptyCandidate => write!(f, "empty candidate"),
            RejectionReason::Sentinel(s) => write!(f, "sentinel '{}'", s),
            RejectionReason::GrammarMismatch { value, pattern } => {
                write!(f, "'{}' does not match {}", value, pattern)
            }
            RejectionReason::NotANumber(value) => write!(f, "'{}' is not a number", value),
            RejectionReason::OutOfRange { value, min, max } => {
                write!(f, "{} is outside [{}, {}]", value, min, max)
            }
            RejectionReason::TooManyWords { count, max } => {
                write!(f, "{} words exceeds the limit of {}", count, max)
            }
        }
    }
}

/// A candidate that passed validation
///
/// Only [`Gatekeeper::admit`] constructs this type, so holding one means the
/// value satisfies its field's grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedField {
    field: String,
    value: String,
}

impl ValidatedField {
    /// Name of the field this value belongs to
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The validated value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume, returning the value
    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for ValidatedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// The Gatekeeper validates candidates for one field
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    field: String,
    config: ValidationConfig,
    grammar: FieldGrammar,
}

impl Gatekeeper {
    /// Create a Gatekeeper for `field`
    ///
    /// Fails if the configuration is inconsistent, the pattern does not
    /// compile, or one of the configured examples would itself be rejected.
    pub fn new(field: impl Into<String>, config: ValidationConfig) -> Result<Self, GatekeeperError> {
        config.validate().map_err(GatekeeperError::Config)?;
        let grammar = FieldGrammar::new(&config.pattern)?;

        let gatekeeper = Self {
            field: field.into(),
            config,
            grammar,
        };

        for example in &gatekeeper.config.examples {
            let result = gatekeeper.validate(example);
            if !result.is_accepted() {
                return Err(GatekeeperError::Config(format!(
                    "example '{}' for field '{}' is rejected: {}",
                    example,
                    gatekeeper.field,
                    result
                        .reasons
                        .first()
                        .map(ToString::to_string)
                        .unwrap_or_default()
                )));
            }
        }

        Ok(gatekeeper)
    }

    /// Field name
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// The compiled grammar
    pub fn grammar(&self) -> &FieldGrammar {
        &self.grammar
    }

    /// Validate a candidate string
    ///
    /// Checks run in order and stop at the first failure:
    ///
    /// 1. empty candidate
    /// 2. sentinel (the grammar is not consulted)
    /// 3. whole-string grammar
    /// 4. numeric range
    /// 5. word limit
    ///
    /// This is a pure function of the configuration and `candidate`.
    pub fn validate(&self, candidate: &str) -> ValidationResult {
        if candidate.is_empty() {
            return ValidationResult::rejected(RejectionReason::EmptyCandidate, false);
        }

        if self.is_sentinel(candidate) {
            return ValidationResult::rejected(
                RejectionReason::Sentinel(candidate.to_string()),
                false,
            );
        }

        if !self.grammar.matches(candidate) {
            return ValidationResult::rejected(
                RejectionReason::GrammarMismatch {
                    value: candidate.to_string(),
                    pattern: self.grammar.pattern().to_string(),
                },
                true,
            );
        }

        if let Some(range) = self.config.numeric_range {
            match candidate.parse::<i64>() {
                Ok(value) if range.contains(value) => {}
                Ok(value) => {
                    return ValidationResult::rejected(
                        RejectionReason::OutOfRange {
                            value,
                            min: range.min,
                            max: range.max,
                        },
                        true,
                    );
                }
                Err(_) => {
                    return ValidationResult::rejected(
                        RejectionReason::NotANumber(candidate.to_string()),
                        true,
                    );
                }
            }
        }

        if let Some(max) = self.config.max_words {
            let count = candidate.split_whitespace().count();
            if count > max {
                return ValidationResult::rejected(
                    RejectionReason::TooManyWords { count, max },
                    true,
                );
            }
        }

        ValidationResult::accepted()
    }

    /// Validate a candidate and, if it passes, turn it into a [`ValidatedField`]
    pub fn admit(&self, candidate: Candidate) -> Result<ValidatedField, ValidationResult> {
        let result = self.validate(candidate.as_str());
        if result.is_accepted() {
            Ok(ValidatedField {
                field: self.field.clone(),
                value: candidate.into_inner(),
            })
        } else {
            debug!(
                "Field '{}' rejected candidate: {}",
                self.field,
                result
                    .reasons
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ")
            );
            Err(result)
        }
    }

    /// Operator-facing message naming the accepted format with examples
    ///
    /// # Examples
    ///
    /// ```
    /// use intake_gatekeeper::{Gatekeeper, ValidationConfig};
    ///
    /// let gatekeeper = Gatekeeper::new("phone", ValidationConfig::pakistani_phone()).unwrap();
    /// let message = gatekeeper.rejection_message();
    /// assert!(message.contains("03207673078"));
    /// assert!(message.contains("+923207373878"));
    /// ```
    pub fn rejection_message(&self) -> String {
        let description = self.config.description.trim_end_matches('.');
        if self.config.examples.is_empty() {
            format!("{}.", description)
        } else {
            format!("{} (e.g., {}).", description, self.config.examples.join(" or "))
        }
    }

    /// Sentinels match with trailing `.` or `!` ignored on either side.
    fn is_sentinel(&self, candidate: &str) -> bool {
        let candidate = strip_terminal_punctuation(candidate);
        self.config.sentinels.iter().any(|sentinel| {
            let sentinel = strip_terminal_punctuation(sentinel);
            if self.config.sentinel_ignore_case {
                sentinel.eq_ignore_ascii_case(candidate)
            } else {
                sentinel == candidate
            }
        })
    }
}

fn strip_terminal_punctuation(text: &str) -> &str {
    text.trim_end_matches(['.', '!']).trim_end()
}

//! Collection outcomes and loop states

use intake_domain::{Candidate, Notice, RawInput};
use intake_gatekeeper::ValidatedField;
use std::fmt;

/// Why collection of a field stopped without a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbandonReason {
    /// The configured attempt limit was reached
    AttemptsExhausted,
    /// The operator closed the input channel
    OperatorClosed,
}

impl fmt::Display for AbandonReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbandonReason::AttemptsExhausted => write!(f, "attempt limit reached"),
            AbandonReason::OperatorClosed => write!(f, "input closed by operator"),
        }
    }
}

/// Result of collecting one field
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionOutcome {
    /// A value passed validation
    Accepted(ValidatedField),

    /// Collection stopped without a value
    Abandoned {
        /// Why collection stopped
        reason: AbandonReason,
        /// Rejected cycles before stopping
        attempts: u32,
    },
}

impl CollectionOutcome {
    /// The validated field, if one was accepted
    pub fn accepted(self) -> Option<ValidatedField> {
        match self {
            CollectionOutcome::Accepted(field) => Some(field),
            CollectionOutcome::Abandoned { .. } => None,
        }
    }

    /// True if a value was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, CollectionOutcome::Accepted(_))
    }
}

/// States of the collection loop
#[derive(Debug)]
pub(crate) enum CollectionState {
    Prompting,
    Extracting(RawInput),
    Validating(Candidate),
    Rejected(Notice),
    Accepted(ValidatedField),
    Abandoned(AbandonReason),
}

impl CollectionState {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            CollectionState::Prompting => "prompting",
            CollectionState::Extracting(_) => "extracting",
            CollectionState::Validating(_) => "validating",
            CollectionState::Rejected(_) => "rejected",
            CollectionState::Accepted(_) => "accepted",
            CollectionState::Abandoned(_) => "abandoned",
        }
    }
}

//! Intake Gatekeeper
//!
//! Decides whether an extraction candidate is an acceptable value for a field.
//! The gatekeeper never trusts the extraction service's own judgement: every
//! candidate is checked independently against an exact-match grammar.
//!
//! The Gatekeeper provides:
//! - Sentinel short-circuit (`Invalid` and empty candidates never reach the grammar)
//! - Whole-string grammar matching (configurable regular expression)
//! - Optional numeric range and word-count limits
//! - Operator-facing rejection messages with concrete examples
//!
//! # Examples
//!
//! ```
//! use intake_gatekeeper::{Gatekeeper, ValidationConfig, ValidationStatus};
//!
//! let gatekeeper = Gatekeeper::new("phone", ValidationConfig::pakistani_phone()).unwrap();
//!
//! assert_eq!(gatekeeper.validate("03207673078").status, ValidationStatus::Accepted);
//! assert_eq!(gatekeeper.validate("+923207373878").status, ValidationStatus::Accepted);
//! assert_eq!(gatekeeper.validate("0320767307").status, ValidationStatus::Rejected);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod grammar;
mod validator;

pub use config::{NumericRange, ValidationConfig};
pub use error::GatekeeperError;
pub use grammar::FieldGrammar;
pub use validator::{Gatekeeper, RejectionReason, ValidatedField, ValidationResult, ValidationStatus};

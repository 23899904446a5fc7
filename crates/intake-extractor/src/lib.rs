//! Intake Extractor
//!
//! Collects validated field values from free operator text.
//!
//! # Overview
//!
//! Operators answer a prompt in their own words. The Extractor hands that
//! text to an extraction service (an LLM) with fixed instructions for the
//! field, and the Gatekeeper checks the returned candidate against the
//! field's grammar. The service is never trusted on its own: a value only
//! leaves this crate as a [`ValidatedField`](intake_gatekeeper::ValidatedField).
//!
//! # Architecture
//!
//! ```text
//! Operator → FieldCollector → Extractor → LLM → Candidate → Gatekeeper → ValidatedField
//!               ↑                                               │
//!               └────────────── notice + re-prompt ─────────────┘
//! ```
//!
//! # Key Features
//!
//! - **Field profiles**: prompt, instructions and validation rules per field
//! - **Retry loop**: explicit state machine with an optional attempt limit
//! - **Timeouts**: extraction calls are bounded; failures surface as notices
//! - **Registration**: collects every patient field and derives the anchor year
//!
//! # Example Usage
//!
//! ```
//! use intake_extractor::{CollectionOutcome, ExtractorConfig, FieldCollector, FieldProfile, ScriptedChannel};
//! use intake_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut llm = MockProvider::new("Invalid");
//! llm.add_response("my number is 03207673078", "03207673078");
//!
//! let collector = FieldCollector::new(Arc::new(llm), &FieldProfile::phone(), ExtractorConfig::default())?;
//! let mut channel = ScriptedChannel::new(["my number is 03207673078"]);
//!
//! match collector.collect(&mut channel).await? {
//!     CollectionOutcome::Accepted(field) => assert_eq!(field.value(), "03207673078"),
//!     CollectionOutcome::Abandoned { .. } => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod channel;
mod collector;
mod config;
mod error;
mod extractor;
mod parser;
mod profile;
mod prompt;
mod registration;
mod types;


pub use channel::ScriptedChannel;
pub use collector::FieldCollector;
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::normalize_response;
pub use profile::{
    FieldCatalog, FieldProfile, InputGuard, Normalization, ADDRESS, AGE, GENDER, NAME, PHONE,
};
pub use prompt::PromptBuilder;
pub use registration::{
    anchor_year_group, PatientRecord, Registration, RegistrationOutcome, REGISTRATION_FIELDS,
};
pub use types::{AbandonReason, CollectionOutcome};

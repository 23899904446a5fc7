//! Intake Domain Layer
//!
//! This crate contains the core value types for validated field intake and
//! the trait interfaces every other layer depends upon. It does no I/O.
//!
//! ## Key Concepts
//!
//! - **RawInput**: Operator-supplied text for one prompt cycle
//! - **ExtractionRequest**: Instructional template plus the raw input, sent to
//!   an extraction service
//! - **Candidate**: What the extraction service returned, or the `Invalid` sentinel
//! - **Notice**: Informational or corrective text shown to the operator
//!
//! ## Architecture
//!
//! - Pure value types only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions (`LlmProvider`,
//!   `OperatorChannel`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod field;
pub mod notice;
pub mod patient;
pub mod request;
pub mod traits;

// Re-exports for convenience
pub use field::{Candidate, RawInput, SENTINEL_INVALID};
pub use notice::{Notice, NoticeKind};
pub use patient::PatientId;
pub use request::ExtractionRequest;

//! Gatekeeper error types

use thiserror::Error;

/// Errors that can occur while building a gatekeeper
///
/// Validation itself never fails: an unmatched candidate is a normal
/// rejection, not an error.
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// The grammar pattern does not compile
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

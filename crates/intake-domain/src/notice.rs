//! Operator-facing notices

use std::fmt;

/// Category of a notice shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// Blank input was submitted; the prompt is repeated immediately
    EmptyInput,

    /// The cycle was rejected (sentinel, grammar mismatch, input guard)
    Rejected,

    /// The extraction service failed or timed out
    ServiceUnavailable,

    /// The attempt limit was reached and collection stopped
    Abandoned,
}

/// A plain-text message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// What kind of notice this is
    pub kind: NoticeKind,

    /// Text to display
    pub message: String,
}

impl Notice {
    /// Create a notice
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Blank-input notice
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::EmptyInput, message)
    }

    /// Rejection notice
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Rejected, message)
    }

    /// Service failure notice
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::ServiceUnavailable, message)
    }

    /// Abandonment notice
    pub fn abandoned(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Abandoned, message)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

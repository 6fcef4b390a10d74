//! Error types for the rendering pipeline.
//!
//! The pipeline boundary itself never propagates errors to callers: `render`
//! degrades to a safe fallback string instead. These types exist for the
//! recoverable sub-stages (patch application, account validation) and for the
//! sanitize-error collection callers may surface.

use thiserror::Error;

/// Why a candidate account name failed Steem account-name syntax validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccountNameError {
    #[error("account name should not be empty")]
    Empty,
    #[error("account name should be at least 3 characters long")]
    TooShort,
    #[error("account name should be at most 16 characters long")]
    TooLong,
    #[error("account name segment should start with a letter")]
    BadSegmentStart,
    #[error("account name segment should only contain letters, digits, or dashes")]
    BadSegmentChar,
    #[error("account name segment should end with a letter or digit")]
    BadSegmentEnd,
    #[error("account name segment should be at least 3 characters long")]
    SegmentTooShort,
}

/// Failure while parsing or applying a diff-match-patch patch body.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("malformed patch header: {0}")]
    BadHeader(String),
    #[error("malformed patch line: {0}")]
    BadLine(String),
    #[error("invalid percent-encoding in patch body")]
    BadEncoding,
    #[error("patch context does not match the text it is applied to")]
    ContextMismatch,
}

/// A recoverable problem recorded while sanitizing; the render continues and
/// the offending node is replaced with a visible placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeError(pub String);

impl std::fmt::Display for SanitizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Identity retrieval failure reported by the user service.
//!
//! The error is transport agnostic: adapters map their own failures onto an
//! opaque `(code, message)` pair and the view model turns it into feedback
//! text. It is never retried and never surfaces as a panic.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message used when an adapter reports a failure without any text.
pub const UNSPECIFIED_FAILURE: &str = "unspecified failure";

/// Failure delivered in place of a [`User`](super::User) when the current
/// user cannot be retrieved.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use input_blade::domain::UserRetrievalError;
///
/// let err = UserRetrievalError::new(404, "no current user");
/// assert_eq!(err.code(), 404);
/// assert_eq!(err.message(), "no current user");
/// assert_eq!(UserRetrievalError::new(500, "  ").message(), "unspecified failure");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRetrievalError {
    code: u32,
    message: String,
}

impl UserRetrievalError {
    /// Build a retrieval error, substituting [`UNSPECIFIED_FAILURE`] for a
    /// blank message.
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNSPECIFIED_FAILURE.to_owned()
        } else {
            message
        };
        Self { code, message }
    }

    /// Opaque adapter-specific failure code.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Human-readable failure description.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Feedback text shown to the user while the blade is disabled.
    #[must_use]
    pub fn feedback(&self) -> String {
        format!(
            "Unable to retrieve the current user: {} (code {})",
            self.message, self.code
        )
    }
}

impl fmt::Display for UserRetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user retrieval failed ({}): {}", self.code, self.message)
    }
}

impl std::error::Error for UserRetrievalError {}

//! Outcome messages returned by mutating operations.

use serde::{Deserialize, Serialize};

/// A human-readable outcome of a mutation.
///
/// Successful mutations carry only the message text. Failures that are
/// reported rather than raised (a failed image upload, a rolled back item
/// deletion) also name the operation they came from and a status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Whether the mutation took effect.
    pub success: bool,
    /// Human-readable message text.
    pub message: String,
    /// Operation that produced a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Suggested HTTP status for a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Text of the underlying error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

impl Message {
    /// A success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            origin: None,
            status_code: None,
            exception: None,
        }
    }

    /// A failure message tagged with its origin and a status code.
    pub fn failure(message: impl Into<String>, origin: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            origin: Some(origin.into()),
            status_code: Some(status_code),
            exception: None,
        }
    }

    /// Attach the text of an underlying error.
    pub fn with_exception(mut self, exception: impl std::fmt::Display) -> Self {
        self.exception = Some(exception.to_string());
        self
    }
}

//! The catalog error type.
//!
//! Repositories, services and uploaders all return [`AppError`]. The HTTP
//! layer turns its [`ErrorKind`] into a status code; nothing else about an
//! error is inspected by callers.

use std::fmt;

use thiserror::Error;

/// What went wrong, at the granularity callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No row with the given id.
    NotFound,
    /// Malformed filter, sort or range, an invalid request body, or a
    /// reference to a row that does not exist.
    Validation,
    /// Duplicate key, or deleting a row that is still referenced.
    Conflict,
    /// Statement or connection failure.
    Database,
    /// Local file I/O failed.
    Storage,
    /// Object storage misbehaved in a way that is not an upload rejection.
    ExternalService,
    /// Bad or missing configuration.
    Configuration,
    /// A JSON payload could not be encoded or decoded.
    Serialization,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// Whether the caller's input caused the error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::Validation | Self::Conflict | Self::Serialization
        )
    }

    fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION",
            Self::Conflict => "CONFLICT",
            Self::Database => "DATABASE",
            Self::Storage => "STORAGE",
            Self::ExternalService => "EXTERNAL_SERVICE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An error with its kind, a message fit for clients, and the underlying
/// cause when there is one.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// Error kind.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Underlying cause, kept for logs only.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// An error without a cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// An error wrapping `source`.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    /// The cause is not cloneable and is dropped.
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorKind::Serialization, format!("Invalid JSON: {err}"), err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

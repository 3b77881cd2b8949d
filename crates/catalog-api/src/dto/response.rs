//! Response DTOs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use catalog_core::types::Message;

/// Row count of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Number of rows matching the filter.
    pub count: i64,
}

/// Health check result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Whether the database answered.
    pub database: bool,
    /// Whether the image store answered.
    pub storage: bool,
}

/// A mutation outcome with its HTTP status.
///
/// Failures carry their own status code; successes use `success_status`.
#[derive(Debug)]
pub struct MessageResponse {
    message: Message,
    success_status: StatusCode,
}

impl MessageResponse {
    /// Respond `200 OK` on success.
    pub fn ok(message: Message) -> Self {
        Self {
            message,
            success_status: StatusCode::OK,
        }
    }

    /// Respond `201 Created` on success.
    pub fn created(message: Message) -> Self {
        Self {
            message,
            success_status: StatusCode::CREATED,
        }
    }

    fn status(&self) -> StatusCode {
        if self.message.success {
            return self.success_status;
        }
        self.message
            .status_code
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self.message)).into_response()
    }
}

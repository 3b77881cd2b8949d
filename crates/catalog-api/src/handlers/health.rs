//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
///
/// `200` when the database answers, `503` otherwise. Image storage trouble
/// only degrades the status.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db.health_check().await.unwrap_or_else(|e| {
        warn!(error = %e, "Database health check failed");
        false
    });
    let storage = state.uploader.health_check().await.unwrap_or_else(|e| {
        warn!(error = %e, "Storage health check failed");
        false
    });

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let label = if database && storage { "ok" } else { "degraded" };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            storage,
        }),
    )
}

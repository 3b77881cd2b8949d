//! Category handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_RANGE;
use axum::response::{IntoResponse, Response};

use catalog_core::types::ListDefaults;
use catalog_entity::category::Category;

use crate::dto::request::{CreateCategoryRequest, UpdateCategoryRequest, validated};
use crate::dto::response::{CountResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{CountParams, ListParams, content_range};
use crate::state::AppState;

/// GET /api/categories?filter=&range=&sort=
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let query = params.into_query(&ListDefaults::CATEGORIES)?;
    let rows = state.category_service.list(&query).await?;
    let total = state.category_service.count(&query.filter).await?;

    let range = content_range("categories", query.range, rows.len(), total);
    Ok(([(CONTENT_RANGE, range)], Json(rows)).into_response())
}

/// GET /api/categories/count?filter=
pub async fn count_categories(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
) -> Result<Json<CountResponse>, ApiError> {
    let filter = params.into_filter()?;
    let count = state.category_service.count(&filter).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.category_service.find(id).await?))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<MessageResponse, ApiError> {
    let req = validated(req)?;
    let message = state.category_service.add(req.into()).await?;
    Ok(MessageResponse::created(message))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<MessageResponse, ApiError> {
    let req = validated(req)?;
    let message = state.category_service.update(id, req.into()).await?;
    Ok(MessageResponse::ok(message))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<MessageResponse, ApiError> {
    let message = state.category_service.delete(id).await?;
    Ok(MessageResponse::ok(message))
}

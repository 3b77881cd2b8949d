//! Item handlers.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::CONTENT_RANGE;
use axum::response::{IntoResponse, Response};

use catalog_core::types::ListDefaults;
use catalog_entity::item::ItemDetail;

use crate::dto::request::{
    CreateItemRequest, UpdateItemImageRequest, UpdateItemRequest, validated,
};
use crate::dto::response::{CountResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{CountParams, ItemForm, ListParams, content_range};
use crate::state::AppState;

/// GET /api/items?filter=&range=&sort=
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let query = params.into_query(&ListDefaults::ITEMS)?;
    let rows = state.item_service.list(&query).await?;
    let total = state.item_service.count(&query.filter).await?;

    let range = content_range("items", query.range, rows.len(), total);
    Ok(([(CONTENT_RANGE, range)], Json(rows)).into_response())
}

/// GET /api/items/count?filter=
pub async fn count_items(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
) -> Result<Json<CountResponse>, ApiError> {
    let filter = params.into_filter()?;
    let count = state.item_service.count(&filter).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ItemDetail>>, ApiError> {
    Ok(Json(state.item_service.find(id).await?))
}

/// POST /api/items
///
/// `multipart/form-data` with `title`, `description`, `alt_text`,
/// `category_id` and an `image` file part.
pub async fn create_item(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<MessageResponse, ApiError> {
    let mut form = ItemForm::read(multipart).await?;
    let req = validated(CreateItemRequest::try_from(&form)?)?;
    let image = form.take_image()?;

    let message = state
        .item_service
        .add_item(req.into_item(image.path()))
        .await?;
    Ok(MessageResponse::created(message))
}

/// PUT /api/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<MessageResponse, ApiError> {
    let req = validated(req)?;
    let message = state.item_service.update_item(id, req.into()).await?;
    Ok(MessageResponse::ok(message))
}

/// PUT /api/items/{id}/image
///
/// `multipart/form-data` with an `image` file part and optional `alt_text`.
pub async fn update_item_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<MessageResponse, ApiError> {
    let mut form = ItemForm::read(multipart).await?;
    let req = validated(UpdateItemImageRequest::from(&form))?;
    let image = form.take_image()?;

    let message = state
        .item_service
        .update_item_image(id, image.path(), req.alt_text.as_deref())
        .await?;
    Ok(MessageResponse::ok(message))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<MessageResponse, ApiError> {
    let message = state.item_service.delete_item(id).await?;
    Ok(MessageResponse::ok(message))
}

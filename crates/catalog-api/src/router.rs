//! Route definitions for the catalog HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to every handler via Axum's `State` extractor.

use axum::Router;
use axum::routing::{get, put};
use tower_http::services::ServeDir;

use catalog_core::config::ImageProvider;

use crate::handlers;
use crate::state::AppState;

/// Mount point for images stored by the local image store.
pub const LOCAL_IMAGE_ROUTE: &str = "/static/item-images";

/// Build the router with every route. Middleware is added by
/// [`build_app`](crate::app::build_app).
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(category_routes())
        .merge(item_routes())
        .merge(health_routes());

    let mut router = Router::new().nest("/api", api_routes);

    if state.config.storage.provider == ImageProvider::Local {
        router = router.nest_service(
            LOCAL_IMAGE_ROUTE,
            ServeDir::new(&state.config.storage.local.root_path),
        );
    }

    router.with_state(state)
}

/// Category listing and CRUD.
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route("/categories/count", get(handlers::categories::count_categories))
        .route(
            "/categories/{id}",
            get(handlers::categories::get_category)
                .put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
}

/// Item listing, CRUD, and image replacement.
fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::items::list_items).post(handlers::items::create_item),
        )
        .route("/items/count", get(handlers::items::count_items))
        .route(
            "/items/{id}",
            get(handlers::items::get_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        .route("/items/{id}/image", put(handlers::items::update_item_image))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

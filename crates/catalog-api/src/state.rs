//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use catalog_core::config::AppConfig;
use catalog_core::traits::storage::ImageUploader;
use catalog_database::{CategoryRepository, DatabasePool, IdAllocator, ItemRepository};
use catalog_service::{CategoryService, ItemService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or pool handles, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Item image storage backend
    pub uploader: Arc<dyn ImageUploader>,
    /// Category use cases
    pub category_service: Arc<CategoryService>,
    /// Item use cases
    pub item_service: Arc<ItemService>,
}

impl AppState {
    /// Wire repositories and services over `db` and `uploader`.
    pub fn new(config: AppConfig, db: DatabasePool, uploader: Arc<dyn ImageUploader>) -> Self {
        let ids = IdAllocator::new(config.database.serialize_id_allocation);
        let category_repo = Arc::new(CategoryRepository::new(db.clone(), ids));
        let item_repo = Arc::new(ItemRepository::new(db.clone(), ids));

        Self {
            category_service: Arc::new(CategoryService::new(category_repo)),
            item_service: Arc::new(ItemService::new(item_repo, Arc::clone(&uploader))),
            config: Arc::new(config),
            db,
            uploader,
        }
    }
}

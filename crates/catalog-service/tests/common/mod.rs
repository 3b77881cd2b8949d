//! Live-database fixtures for service tests.
//!
//! Set `CATALOG_TEST_DATABASE_URL` to a disposable database to run them;
//! without it they return early.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex as StdMutex, OnceLock};

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use catalog_core::config::DatabaseConfig;
use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::storage::{ImageUploader, UploadStatus};
use catalog_database::migration::run_migrations;
use catalog_database::{CategoryRepository, DatabasePool, IdAllocator, ItemRepository};
use catalog_service::{CategoryService, ItemService};

pub const DATABASE_URL_VAR: &str = "CATALOG_TEST_DATABASE_URL";

fn lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Records uploads in memory. `reject` turns every upload into a
/// rejection, `unreachable` into an error.
#[derive(Debug, Default)]
pub struct RecordingUploader {
    pub reject: bool,
    pub unreachable: bool,
    pub uploads: StdMutex<Vec<String>>,
}

impl RecordingUploader {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn uploaded(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageUploader for RecordingUploader {
    fn provider_type(&self) -> &str {
        "recording"
    }

    async fn upload(&self, _local_path: &Path, filename: &str) -> AppResult<UploadStatus> {
        if self.unreachable {
            return Err(AppError::new(ErrorKind::ExternalService, "connection refused"));
        }
        if self.reject {
            return Ok(UploadStatus::Failed {
                status_code: Some(403),
                reason: "bucket is read-only".to_string(),
            });
        }
        self.uploads.lock().unwrap().push(filename.to_string());
        Ok(UploadStatus::Uploaded)
    }

    fn public_url(&self, filename: &str) -> String {
        format!("https://cdn.test/item-images/{filename}")
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

pub struct Fixture {
    pub db: DatabasePool,
    pub categories: CategoryService,
    pub items: ItemService,
    pub item_repo: Arc<ItemRepository>,
    pub uploader: Arc<RecordingUploader>,
    _guard: MutexGuard<'static, ()>,
}

/// Migrate and empty the catalog tables, then wire the services.
pub async fn fixture(uploader: RecordingUploader) -> Option<Fixture> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        eprintln!("{DATABASE_URL_VAR} not set, skipping");
        return None;
    };

    let guard = lock().lock().await;
    let mut config = DatabaseConfig::with_url(url);
    config.max_connections = 4;
    let db = DatabasePool::connect(&config).await.expect("connect");
    run_migrations(db.pool()).await.expect("migrate");
    for sql in [
        "DROP TRIGGER IF EXISTS block_item_delete ON items",
        "TRUNCATE item_images, item_categories, items, categories",
    ] {
        sqlx::query(sql).execute(db.pool()).await.expect(sql);
    }

    let ids = IdAllocator::new(true);
    let category_repo = Arc::new(CategoryRepository::new(db.clone(), ids));
    let item_repo = Arc::new(ItemRepository::new(db.clone(), ids));
    let uploader = Arc::new(uploader);

    Some(Fixture {
        categories: CategoryService::new(category_repo),
        items: ItemService::new(item_repo.clone(), uploader.clone()),
        item_repo,
        uploader,
        db,
        _guard: guard,
    })
}

pub async fn table_count(db: &DatabasePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .expect("count")
}

//! Shared setup for tests that need a live PostgreSQL.
//!
//! Set `CATALOG_TEST_DATABASE_URL` to a disposable database to run them;
//! without it they return early. Every test truncates the catalog tables,
//! so tests holding the guard run one at a time.

use std::sync::OnceLock;

use tokio::sync::{Mutex, MutexGuard};

use catalog_core::config::DatabaseConfig;
use catalog_database::DatabasePool;
use catalog_database::migration::run_migrations;

pub const DATABASE_URL_VAR: &str = "CATALOG_TEST_DATABASE_URL";

fn lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Connect, migrate, and empty the catalog tables.
pub async fn fresh_database() -> Option<(DatabasePool, MutexGuard<'static, ()>)> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        eprintln!("{DATABASE_URL_VAR} not set, skipping");
        return None;
    };

    let guard = lock().lock().await;
    let mut config = DatabaseConfig::with_url(url);
    config.max_connections = 4;
    let db = DatabasePool::connect(&config).await.expect("connect");
    run_migrations(db.pool()).await.expect("migrate");
    sqlx::query("TRUNCATE item_images, item_categories, items, categories")
        .execute(db.pool())
        .await
        .expect("truncate");

    Some((db, guard))
}

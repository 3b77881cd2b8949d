//! Schema migrations bundled from the workspace `migrations/` directory.

use sqlx::PgPool;
use tracing::info;

use catalog_core::error::{AppError, ErrorKind};

/// Apply every pending catalog migration. Already applied ones are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(available = migrator.iter().count(), "Applying catalog migrations");

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!("Catalog schema is up to date");
    Ok(())
}

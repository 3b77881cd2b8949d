//! Construction of the configured image uploader.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use catalog_core::config::{ImageProvider, StorageConfig};
use catalog_core::result::AppResult;
use catalog_core::traits::storage::ImageUploader;

use crate::providers::{LocalImageStore, SupabaseUploader};

/// Build the uploader selected by `config.provider`.
pub async fn build_uploader(config: &StorageConfig) -> AppResult<Arc<dyn ImageUploader>> {
    let uploader: Arc<dyn ImageUploader> = match config.provider {
        ImageProvider::Supabase => Arc::new(SupabaseUploader::new(
            &config.supabase,
            Duration::from_secs(config.upload_timeout_seconds),
        )?),
        ImageProvider::Local => Arc::new(
            LocalImageStore::new(&config.local.root_path, &config.local.public_base_url).await?,
        ),
    };

    info!(provider = uploader.provider_type(), "Image storage ready");
    Ok(uploader)
}

//! Supabase object storage uploader.
//!
//! Objects are written with `POST {endpoint}/storage/v1/object/{bucket}/{name}`
//! using the service key as a bearer token. `x-upsert: true` makes a second
//! upload under the same name replace the first, so re-uploading an item's
//! image keeps its public URL stable.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tokio::fs;
use tracing::{debug, warn};

use catalog_core::config::storage::SupabaseStorageConfig;
use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::storage::{ImageUploader, UploadStatus};

use super::image_mime;

/// Longest backend error body kept in an upload failure reason.
const MAX_REASON_LEN: usize = 500;

/// Uploads item images to a Supabase storage bucket.
#[derive(Debug, Clone)]
pub struct SupabaseUploader {
    client: Client,
    endpoint: String,
    bucket: String,
    service_key: String,
}

impl SupabaseUploader {
    /// Create an uploader. Fails when the endpoint or key is missing.
    pub fn new(config: &SupabaseStorageConfig, timeout: Duration) -> AppResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(AppError::configuration("storage.supabase.endpoint is required"));
        }
        if config.service_key.is_empty() {
            return Err(AppError::configuration("storage.supabase.service_key is required"));
        }

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim().trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            service_key: config.service_key.clone(),
        })
    }

    fn object_url(&self, filename: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{filename}",
            self.endpoint, self.bucket
        )
    }
}

#[async_trait]
impl ImageUploader for SupabaseUploader {
    fn provider_type(&self) -> &str {
        "supabase"
    }

    async fn upload(&self, local_path: &Path, filename: &str) -> AppResult<UploadStatus> {
        let data = match fs::read(local_path).await {
            Ok(data) => Bytes::from(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %local_path.display(), "Image file not found");
                return Ok(UploadStatus::Failed {
                    status_code: None,
                    reason: format!("Image file not found: {}", local_path.display()),
                });
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read image: {}", local_path.display()),
                    e,
                ));
            }
        };

        let size = data.len();
        let response = self
            .client
            .post(self.object_url(filename))
            .bearer_auth(&self.service_key)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, image_mime(filename))
            .body(data)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!(filename, error = %e, "Image upload request failed");
                return Ok(UploadStatus::Failed {
                    status_code: None,
                    reason: format!("Upload request failed: {e}"),
                });
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!(filename, bytes = size, "Uploaded image");
            return Ok(UploadStatus::Uploaded);
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_REASON_LEN {
            let mut cut = MAX_REASON_LEN;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        warn!(filename, status = status.as_u16(), "Image upload rejected");
        Ok(UploadStatus::Failed {
            status_code: Some(status.as_u16()),
            reason: format!("Storage returned {status}: {body}"),
        })
    }

    fn public_url(&self, filename: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{filename}",
            self.endpoint, self.bucket
        )
    }

    async fn health_check(&self) -> AppResult<bool> {
        let url = format!("{}/storage/v1/bucket/{}", self.endpoint, self.bucket);
        match self
            .client
            .get(url)
            .bearer_auth(&self.service_key)
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                warn!(error = %e, "Storage health check failed");
                Ok(false)
            }
        }
    }
}

//! Local directory image store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use catalog_core::error::{AppError, ErrorKind};
use catalog_core::result::AppResult;
use catalog_core::traits::storage::{ImageUploader, UploadStatus};

/// Copies item images into a directory served under a public base URL.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    /// Directory images are copied into.
    root: PathBuf,
    /// URL prefix the directory is served under, without trailing slash.
    public_base_url: String,
}

impl LocalImageStore {
    /// Create a store rooted at `root_path`, creating the directory if needed.
    pub async fn new(root_path: &str, public_base_url: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create image directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Directory images are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Object names are flat; anything that could leave the root is rejected.
    fn resolve(&self, filename: &str) -> Option<PathBuf> {
        let valid = !filename.is_empty()
            && !filename.contains(['/', '\\'])
            && filename != "."
            && filename != "..";
        valid.then(|| self.root.join(filename))
    }
}

#[async_trait]
impl ImageUploader for LocalImageStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn upload(&self, local_path: &Path, filename: &str) -> AppResult<UploadStatus> {
        let Some(target) = self.resolve(filename) else {
            return Ok(UploadStatus::Failed {
                status_code: None,
                reason: format!("Invalid image name: {filename}"),
            });
        };

        match fs::copy(local_path, &target).await {
            Ok(bytes) => {
                debug!(source = %local_path.display(), target = %target.display(), bytes, "Stored image");
                Ok(UploadStatus::Uploaded)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %local_path.display(), "Image file not found");
                Ok(UploadStatus::Failed {
                    status_code: None,
                    reason: format!("Image file not found: {}", local_path.display()),
                })
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to store image: {filename}"),
                e,
            )),
        }
    }

    fn public_url(&self, filename: &str) -> String {
        format!("{}/{filename}", self.public_base_url)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }
}

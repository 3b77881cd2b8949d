//! Image upload trait for pluggable object storage backends.

use std::path::Path;

use async_trait::async_trait;

use crate::result::AppResult;

/// Outcome of an upload attempt that reached the storage backend.
///
/// A rejected upload is a normal outcome the caller decides how to handle;
/// `Err` from [`ImageUploader::upload`] is reserved for failures to even
/// attempt it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    /// The object is stored and reachable at [`ImageUploader::public_url`].
    Uploaded,
    /// The backend refused or could not store the object.
    Failed {
        /// HTTP status reported by the backend, if there was one.
        status_code: Option<u16>,
        /// Why the upload failed.
        reason: String,
    },
}

impl UploadStatus {
    /// Whether the upload succeeded.
    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::Uploaded)
    }
}

/// Trait for item image storage backends.
///
/// Implementations exist for Supabase object storage and a local
/// directory. The [`ImageUploader`] trait is defined here in `catalog-core`
/// and implemented in `catalog-storage`.
#[async_trait]
pub trait ImageUploader: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "supabase", "local").
    fn provider_type(&self) -> &str;

    /// Upload the file at `local_path` under the object name `filename`,
    /// replacing any existing object with that name.
    async fn upload(&self, local_path: &Path, filename: &str) -> AppResult<UploadStatus>;

    /// The public URL an uploaded `filename` is served from.
    fn public_url(&self, filename: &str) -> String;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

//! Image storage configuration.

use serde::{Deserialize, Serialize};

/// Which image upload collaborator to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageProvider {
    /// Supabase-compatible object storage over HTTP.
    Supabase,
    /// A directory on the local filesystem.
    #[default]
    Local,
}

/// Top-level image storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider used for item images.
    #[serde(default)]
    pub provider: ImageProvider,
    /// Upload request timeout in seconds.
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_seconds: u64,
    /// Supabase object storage settings.
    #[serde(default)]
    pub supabase: SupabaseStorageConfig,
    /// Local directory settings.
    #[serde(default)]
    pub local: LocalStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: ImageProvider::default(),
            upload_timeout_seconds: default_upload_timeout(),
            supabase: SupabaseStorageConfig::default(),
            local: LocalStorageConfig::default(),
        }
    }
}

/// Supabase object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseStorageConfig {
    /// Project URL, e.g. `https://<project>.supabase.co`.
    #[serde(default)]
    pub endpoint: String,
    /// Bucket holding item images.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Service role key sent as a bearer token.
    #[serde(default)]
    pub service_key: String,
}

impl Default for SupabaseStorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            bucket: default_bucket(),
            service_key: String::new(),
        }
    }
}

/// Local filesystem image storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Directory images are copied into.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL the directory is served under.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_upload_timeout() -> u64 {
    30
}

fn default_bucket() -> String {
    "item-images".to_string()
}

fn default_local_root() -> String {
    "./data/item-images".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8000/static/item-images".to_string()
}

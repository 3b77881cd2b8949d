//! Listener settings and the CORS policy of the admin console.

use serde::{Deserialize, Serialize};

/// Where the API listens and how large or slow a request may be.
///
/// Missing keys fall back to [`ServerConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests still running after this many seconds get a 408.
    pub request_timeout_seconds: u64,
    /// Upper bound on a request body. Image uploads arrive as multipart
    /// bodies, so this also caps the image size.
    pub body_limit_bytes: usize,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_seconds: 30,
            body_limit_bytes: 10 * 1024 * 1024,
            cors: CorsConfig::default(),
        }
    }
}

/// Cross-origin policy for the browser console.
///
/// The console paginates by reading `Content-Range`, which browsers hide
/// unless it is listed in `expose_headers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub expose_headers: Vec<String>,
    /// How long a browser may cache a preflight answer.
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            allowed_origins: owned(&["*"]),
            allowed_methods: owned(&["GET", "POST", "PUT", "DELETE", "OPTIONS"]),
            expose_headers: owned(&["Content-Range"]),
            max_age_seconds: 3600,
        }
    }
}

//! Shared test helpers for integration tests.

use std::path::PathBuf;
use std::sync::OnceLock;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use catalog_api::{AppState, build_app};
use catalog_core::config::{AppConfig, DatabaseConfig, ImageProvider};
use catalog_database::DatabasePool;
use catalog_database::migration::run_migrations;
use catalog_storage::build_uploader;

const DATABASE_URL_VAR: &str = "CATALOG_TEST_DATABASE_URL";
const BOUNDARY: &str = "catalog-integration-boundary";

/// Bytes posted as an item image.
pub const JPEG: &[u8] = b"\xFF\xD8\xFF fake jpeg";

fn lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// A response with its JSON body decoded (`Null` when empty or not JSON).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db: DatabasePool,
    /// Scratch directory holding the image store
    pub scratch: TempDir,
    _guard: MutexGuard<'static, ()>,
}

impl TestApp {
    /// Create a test application over an emptied database, storing images
    /// in a temporary directory.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
            eprintln!("{DATABASE_URL_VAR} not set, skipping");
            return None;
        };
        let guard = lock().lock().await;

        let scratch = tempfile::tempdir().expect("tempdir");
        let mut config = AppConfig {
            server: Default::default(),
            database: DatabaseConfig::with_url(url),
            storage: Default::default(),
            logging: Default::default(),
        };
        config.database.max_connections = 4;
        config.storage.provider = ImageProvider::Local;
        config.storage.local.root_path = scratch
            .path()
            .join("store")
            .to_string_lossy()
            .into_owned();

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");
        sqlx::query("TRUNCATE item_images, item_categories, items, categories")
            .execute(db.pool())
            .await
            .expect("Failed to clean database");

        let uploader = build_uploader(&config.storage).await.expect("uploader");
        let router = build_app(AppState::new(config, db.clone(), uploader));

        Some(Self {
            router,
            db,
            scratch,
            _guard: guard,
        })
    }

    /// Directory the local image store writes to.
    pub fn store_dir(&self) -> PathBuf {
        self.scratch.path().join("store")
    }

    /// Send a request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.send(request).await
    }

    /// Send a `multipart/form-data` body with text parts and an optional
    /// `image` file part.
    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        texts: &[(&str, &str)],
        image: Option<&[u8]>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in texts {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(bytes) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                     filename=\"cover.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}

/// Percent-encode a JSON query parameter value.
pub fn encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() * 3);
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

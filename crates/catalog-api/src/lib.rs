//! # catalog-api
//!
//! HTTP API layer for the catalog console built on Axum.
//!
//! Serves the react-admin style category and item endpoints under `/api`
//! with request logging, CORS, compression, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;

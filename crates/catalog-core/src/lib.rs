//! # catalog-core
//!
//! Core crate for the catalog console. Contains configuration schemas,
//! the typed filter/sort/range parameters every listing endpoint accepts,
//! the mutation [`Message`](types::message::Message) type, the image upload
//! trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other catalog crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

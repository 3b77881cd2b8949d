//! # catalog-entity
//!
//! Row models for the catalog schema. Every struct in this crate
//! represents a table row, a listing row assembled from joins, or a write
//! payload. Row structs derive `sqlx::FromRow` and serialize as flat
//! field mappings, which is the shape listing endpoints return.

pub mod category;
pub mod item;

//! # catalog-service
//!
//! Use cases over the catalog repositories. Mutations report their outcome
//! as a [`Message`](catalog_core::types::Message); item writes are
//! coordinated with the image uploader inside a single transaction.
//!
//! Services follow constructor injection: every dependency is provided at
//! construction time via `Arc` references.

pub mod category;
pub mod item;

pub use category::CategoryService;
pub use item::ItemService;

//! # catalog-database
//!
//! PostgreSQL connection management, the generic filter/sort/range query
//! builder, the `max(id) + 1` id allocator, and the category and item
//! repositories.

pub mod connection;
pub mod error;
pub mod id_allocator;
pub mod migration;
pub mod query;
pub mod repositories;

pub use connection::DatabasePool;
pub use id_allocator::{IdAllocator, Table};
pub use repositories::{CategoryRepository, ItemRepository};

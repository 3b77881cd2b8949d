//! Core type definitions used across the catalog workspace.

pub mod filter;
pub mod message;
pub mod query;
pub mod range;
pub mod sorting;

pub use filter::{Filter, FilterField, FilterValue, ListValues, Scalar};
pub use message::Message;
pub use query::{ListDefaults, ListQuery};
pub use range::RangeSpec;
pub use sorting::{SortDirection, SortField};

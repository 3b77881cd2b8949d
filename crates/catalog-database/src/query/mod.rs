//! Dynamic listing queries.
//!
//! A [`ListStatement`] describes one listing (its select list, joins,
//! grouping, and the columns clients may filter and sort on). Planning a
//! [`ListQuery`](catalog_core::types::ListQuery) against it resolves every
//! client-supplied name to a known column; only the resolved plan is ever
//! turned into SQL.

pub mod builder;
pub mod columns;

pub use builder::{CountPlan, ListPlan, ListStatement, Predicate};
pub use columns::{Column, ColumnSet};

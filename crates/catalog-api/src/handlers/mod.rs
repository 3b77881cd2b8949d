//! Route handlers organized by domain.

pub mod categories;
pub mod health;
pub mod items;

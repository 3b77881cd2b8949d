//! Item-to-category link rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Associates an item with a category.
///
/// The schema allows any number of links per item; listings show one
/// category name per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItemCategory {
    /// Linked item.
    pub item_id: i64,
    /// Linked category.
    pub category_id: i64,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

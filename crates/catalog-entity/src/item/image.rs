//! Item image rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An externally hosted image of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItemImage {
    /// Primary key.
    pub id: i64,
    /// Owning item.
    pub item_id: i64,
    /// Public URL of the uploaded object.
    pub url: String,
    /// Alternative text.
    pub alt_text: String,
    /// When the image row was created.
    pub created_at: DateTime<Utc>,
}

//! Item entity model and the listing rows built from it.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Primary key, allocated as `max(id) + 1`.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// One row of the item listing.
///
/// `category` and `url` are representative values: the smallest category
/// name and image URL among the item's joined rows. Either is `None` when
/// the item has no link or no image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItemSummary {
    /// Item id.
    pub id: i64,
    /// Item title.
    pub title: String,
    /// Item description.
    pub description: String,
    /// Item creation time.
    pub created_at: DateTime<Utc>,
    /// Representative category name.
    pub category: Option<String>,
    /// Representative image URL.
    pub url: Option<String>,
}

/// One row of an item lookup by id: the item joined with one of its
/// (category, image) combinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItemDetail {
    /// Item id.
    pub id: i64,
    /// Item title.
    pub title: String,
    /// Item description.
    pub description: String,
    /// Linked category id.
    pub category_id: Option<i64>,
    /// Linked category name.
    pub name: Option<String>,
    /// Image URL.
    pub url: Option<String>,
}

/// Everything needed to create an item with its category link and image.
///
/// Built by the server, never deserialized from a request: `image_path`
/// names a file the server wrote itself.
#[derive(Debug, Clone)]
pub struct CreateItem {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Local file holding the image to upload.
    pub image_path: PathBuf,
    /// Alternative text for the image.
    pub alt_text: String,
    /// Category to link the item to.
    pub category_id: i64,
}

/// Replacement values for an existing item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateItem {
    /// New title.
    pub title: String,
    /// New description.
    #[serde(default)]
    pub description: String,
    /// When set, the item's category links are replaced by this one.
    #[serde(default)]
    pub category_id: Option<i64>,
}

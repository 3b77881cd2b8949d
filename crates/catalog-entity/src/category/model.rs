//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Primary key, allocated as `max(id) + 1`.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Creation time, overwritten on every update.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// Replacement values for an existing category.
///
/// Both fields are written as given, empty strings included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategory {
    /// New display name.
    pub name: String,
    /// New description.
    #[serde(default)]
    pub description: String,
}

//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Interpret a client keyword: `ASC` in any case is ascending, every
    /// other keyword is descending.
    pub fn from_keyword(keyword: &str) -> Self {
        if keyword.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// A sort specification consisting of a field name and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Column or field name to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Parse a JSON-encoded `["field", "ASC"|"DESC"]` pair.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(raw.trim())
            .map_err(|e| AppError::validation(format!("Malformed sort JSON: {e}")))?;

        match value.as_array().map(Vec::as_slice) {
            Some([Value::String(field), Value::String(direction)]) => {
                if field.is_empty() {
                    return Err(AppError::validation("Sort field must not be empty"));
                }
                Ok(Self::new(field.clone(), SortDirection::from_keyword(direction)))
            }
            _ => Err(AppError::validation(
                "Sort must be a two-element array: [field, \"ASC\"|\"DESC\"]",
            )),
        }
    }
}

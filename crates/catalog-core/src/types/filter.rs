//! Filter types for dynamic query building.
//!
//! Listing endpoints receive their filter as an untrusted JSON object
//! mapping column names to values. The value's JSON shape decides the
//! predicate, and that decision is made once here, at the boundary:
//!
//! | JSON value                         | Predicate                    |
//! |------------------------------------|------------------------------|
//! | string                             | case-insensitive substring   |
//! | list of strings / list of integers | set membership               |
//! | number, boolean, `null`            | exact equality (`IS NULL`)   |
//! | any other list                     | rejected                     |
//!
//! Query builders only ever see the typed [`FilterValue`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;

/// A scalar compared with plain equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// JSON `null`, matched with `IS NULL`.
    Null,
}

/// The element list of a set-membership predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListValues {
    /// A list of integers.
    Integers(Vec<i64>),
    /// A list of strings.
    Strings(Vec<String>),
}

impl ListValues {
    /// Number of elements in the list.
    pub fn len(&self) -> usize {
        match self {
            Self::Integers(v) => v.len(),
            Self::Strings(v) => v.len(),
        }
    }

    /// Whether the list has no elements (matches no rows).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A typed match criterion for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    /// Exact equality.
    Exact(Scalar),
    /// Case-insensitive substring match.
    Contains(String),
    /// Set membership.
    AnyOf(ListValues),
}

impl FilterValue {
    /// Classify an untrusted JSON value for `field`.
    pub fn from_json(field: &str, value: &Value) -> AppResult<Self> {
        match value {
            Value::String(s) => Ok(Self::Contains(s.clone())),
            Value::Array(items) => list_from_json(field, items).map(Self::AnyOf),
            Value::Null => Ok(Self::Exact(Scalar::Null)),
            Value::Bool(b) => Ok(Self::Exact(Scalar::Boolean(*b))),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Exact(Scalar::Integer(i))),
                None => n
                    .as_f64()
                    .map(|f| Self::Exact(Scalar::Float(f)))
                    .ok_or_else(|| {
                        AppError::validation(format!("Unsupported number for field '{field}'"))
                    }),
            },
            Value::Object(_) => Err(AppError::validation(format!(
                "Unsupported filter value for field '{field}': nested objects are not allowed"
            ))),
        }
    }
}

fn list_from_json(field: &str, items: &[Value]) -> AppResult<ListValues> {
    if items.iter().all(Value::is_string) {
        return Ok(ListValues::Strings(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ));
    }

    if items.iter().all(Value::is_i64) {
        return Ok(ListValues::Integers(
            items.iter().filter_map(Value::as_i64).collect(),
        ));
    }

    Err(AppError::validation(format!(
        "Incompatible filter list type for field '{field}': \
         lists must hold only strings or only integers"
    )))
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column or field name to filter on.
    pub field: String,
    /// The match criterion.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }

    /// Shorthand for an integer equality filter.
    pub fn eq(field: impl Into<String>, value: i64) -> Self {
        Self::new(field, FilterValue::Exact(Scalar::Integer(value)))
    }

    /// Shorthand for a case-insensitive substring filter.
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(field, FilterValue::Contains(needle.into()))
    }
}

/// A conjunction of filter conditions.
///
/// Every condition must hold for a row to match. Field names are not
/// checked here; the query builder ignores names that are not columns of
/// the queried entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter {
    fields: Vec<FilterField>,
}

impl Filter {
    /// A filter that matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse a JSON-encoded filter object, e.g. `{"name":"Boo","id":[1,2]}`.
    ///
    /// An empty string is treated as `{}`.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::all());
        }

        let value: Value = serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("Malformed filter JSON: {e}")))?;

        match value {
            Value::Object(map) => {
                let fields = map
                    .iter()
                    .map(|(k, v)| FilterValue::from_json(k, v).map(|fv| FilterField::new(k, fv)))
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(Self { fields })
            }
            _ => Err(AppError::validation("Filter must be a JSON object")),
        }
    }

    /// Add a condition.
    pub fn with(mut self, field: FilterField) -> Self {
        self.fields.push(field);
        self
    }

    /// The conditions in this filter.
    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    /// Whether the filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

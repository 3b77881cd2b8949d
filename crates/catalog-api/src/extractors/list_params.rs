//! react-admin style listing parameters.
//!
//! `filter`, `range` and `sort` arrive as JSON-encoded query parameters,
//! e.g. `?filter={"name":"boo"}&range=[0,24]&sort=["id","DESC"]`.

use serde::{Deserialize, Serialize};

use catalog_core::result::AppResult;
use catalog_core::types::{Filter, ListDefaults, ListQuery, RangeSpec};

/// Raw listing parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// JSON object of column filters.
    pub filter: Option<String>,
    /// JSON `[start, end]` pair.
    pub range: Option<String>,
    /// JSON `[field, direction]` pair.
    pub sort: Option<String>,
}

impl ListParams {
    /// Parse into a [`ListQuery`], filling omitted parts from `defaults`.
    pub fn into_query(self, defaults: &ListDefaults) -> AppResult<ListQuery> {
        ListQuery::parse(
            self.filter.as_deref(),
            self.range.as_deref(),
            self.sort.as_deref(),
            defaults,
        )
    }
}

/// Raw count parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountParams {
    /// JSON object of column filters.
    pub filter: Option<String>,
}

impl CountParams {
    /// Parse the filter; absent means every row.
    pub fn into_filter(self) -> AppResult<Filter> {
        match self.filter.as_deref() {
            Some(raw) => Filter::parse(raw),
            None => Ok(Filter::all()),
        }
    }
}

/// `Content-Range` value for a served page, e.g. `categories 0-24/319`.
/// An empty page is reported as `categories */319`.
pub fn content_range(resource: &str, range: RangeSpec, returned: usize, total: i64) -> String {
    match range.served_end(returned) {
        Some(end) => format!("{resource} {}-{end}/{total}", range.start),
        None => format!("{resource} */{total}"),
    }
}

//! The filter/range/sort triple every listing endpoint accepts.

use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::filter::Filter;
use crate::types::range::RangeSpec;
use crate::types::sorting::{SortDirection, SortField};

/// Per-entity defaults applied when a listing parameter is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDefaults {
    /// Default page.
    pub range: RangeSpec,
    /// Default sort column.
    pub sort_field: &'static str,
    /// Default sort direction.
    pub sort_direction: SortDirection,
}

impl ListDefaults {
    /// Newest categories first, 25 per page.
    pub const CATEGORIES: Self = Self {
        range: RangeSpec { start: 0, end: 24 },
        sort_field: "id",
        sort_direction: SortDirection::Desc,
    };

    /// Items in id order, 10 per page.
    pub const ITEMS: Self = Self {
        range: RangeSpec { start: 0, end: 9 },
        sort_field: "id",
        sort_direction: SortDirection::Asc,
    };

    /// The default sort as a [`SortField`].
    pub fn sort(&self) -> SortField {
        SortField::new(self.sort_field, self.sort_direction)
    }
}

/// A parsed listing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Row filter.
    pub filter: Filter,
    /// Requested page.
    pub range: RangeSpec,
    /// Requested order.
    pub sort: SortField,
}

impl ListQuery {
    /// Parse the three JSON-encoded listing parameters, falling back to
    /// `defaults` for any that are absent.
    ///
    /// All three are parsed before anything touches the database, so a
    /// malformed parameter never reaches query execution.
    pub fn parse(
        filter: Option<&str>,
        range: Option<&str>,
        sort: Option<&str>,
        defaults: &ListDefaults,
    ) -> AppResult<Self> {
        let filter = match filter {
            Some(raw) => Filter::parse(raw)?,
            None => Filter::all(),
        };
        let range = match range {
            Some(raw) => RangeSpec::parse(raw)?,
            None => defaults.range,
        };
        let sort = match sort {
            Some(raw) => SortField::parse(raw)?,
            None => defaults.sort(),
        };

        Ok(Self {
            filter,
            range,
            sort,
        })
    }

    /// A query using only the defaults.
    pub fn defaults(defaults: &ListDefaults) -> Self {
        Self {
            filter: Filter::all(),
            range: defaults.range,
            sort: defaults.sort(),
        }
    }

    /// Replace the filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the range.
    pub fn with_range(mut self, range: RangeSpec) -> Self {
        self.range = range;
        self
    }

    /// Replace the sort.
    pub fn with_sort(mut self, sort: SortField) -> Self {
        self.sort = sort;
        self
    }
}

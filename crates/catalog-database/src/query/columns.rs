//! Column whitelists for the catalog listings.

/// A client-visible column name and the SQL expression it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Name used in filter keys and sort fields.
    pub name: &'static str,
    /// SQL expression, qualified when the listing joins tables.
    pub expr: &'static str,
}

impl Column {
    /// A column whose SQL expression differs from its name.
    pub const fn aliased(name: &'static str, expr: &'static str) -> Self {
        Self { name, expr }
    }

    /// A column whose SQL expression is its name.
    pub const fn plain(name: &'static str) -> Self {
        Self { name, expr: name }
    }
}

/// The columns one listing accepts.
#[derive(Debug)]
pub struct ColumnSet {
    /// Expressions that together identify one listing row. Each one the
    /// sort column does not already cover is appended to the ordering.
    pub keys: &'static [&'static str],
    /// Columns that may appear as filter keys.
    pub filterable: &'static [Column],
    /// Columns that may appear as the sort field.
    pub sortable: &'static [Column],
}

impl ColumnSet {
    /// Look up a filterable column.
    pub fn filter_column(&self, name: &str) -> Option<Column> {
        self.filterable.iter().copied().find(|c| c.name == name)
    }

    /// Look up a sortable column.
    pub fn sort_column(&self, name: &str) -> Option<Column> {
        self.sortable.iter().copied().find(|c| c.name == name)
    }

    /// Comma-separated sortable names, for error messages.
    pub fn sortable_names(&self) -> String {
        self.sortable
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `categories` columns.
pub static CATEGORY_COLUMNS: ColumnSet = ColumnSet {
    keys: &["id"],
    filterable: &[
        Column::plain("id"),
        Column::plain("name"),
        Column::plain("description"),
        Column::plain("created_at"),
    ],
    sortable: &[
        Column::plain("id"),
        Column::plain("name"),
        Column::plain("description"),
        Column::plain("created_at"),
    ],
};

/// Columns of the grouped item listing.
///
/// `category` and `category_id` filter on the joined category, so an item
/// matches when any of its links does. `url` sorts by the representative
/// image URL and is not filterable. The listing yields one row per item
/// and category name, so both make up the row key.
pub static ITEM_COLUMNS: ColumnSet = ColumnSet {
    keys: &["i.id", "c.name"],
    filterable: &[
        Column::aliased("id", "i.id"),
        Column::aliased("title", "i.title"),
        Column::aliased("description", "i.description"),
        Column::aliased("created_at", "i.created_at"),
        Column::aliased("category", "c.name"),
        Column::aliased("category_id", "c.id"),
    ],
    sortable: &[
        Column::aliased("id", "i.id"),
        Column::aliased("title", "i.title"),
        Column::aliased("description", "i.description"),
        Column::aliased("created_at", "i.created_at"),
        Column::aliased("category", "c.name"),
        Column::aliased("url", "MIN(ii.url)"),
    ],
};

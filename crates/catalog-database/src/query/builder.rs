//! Planning and SQL generation for filtered, sorted, paged listings.

use sqlx::{Postgres, QueryBuilder};
use tracing::debug;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;
use catalog_core::types::{
    Filter, FilterValue, ListQuery, ListValues, RangeSpec, Scalar, SortDirection,
};

use super::columns::{CATEGORY_COLUMNS, Column, ColumnSet, ITEM_COLUMNS};

/// The fixed parts of one listing query.
#[derive(Debug)]
pub struct ListStatement {
    /// Select list.
    pub select: &'static str,
    /// `FROM` clause body, including joins.
    pub from: &'static str,
    /// `GROUP BY` list for aggregated listings.
    pub group_by: Option<&'static str>,
    /// Columns clients may name.
    pub columns: &'static ColumnSet,
}

/// Category listing.
pub static CATEGORY_LIST: ListStatement = ListStatement {
    select: "id, name, description, created_at",
    from: "categories",
    group_by: None,
    columns: &CATEGORY_COLUMNS,
};

/// Item listing: one row per item and category name, with a
/// representative category name and image URL.
pub static ITEM_LIST: ListStatement = ListStatement {
    select: "i.id, i.title, i.description, i.created_at, \
             MIN(c.name) AS category, MIN(ii.url) AS url",
    from: "items i \
           LEFT JOIN item_categories ic ON ic.item_id = i.id \
           LEFT JOIN categories c ON c.id = ic.category_id \
           LEFT JOIN item_images ii ON ii.item_id = i.id",
    group_by: Some("i.id, i.title, i.description, i.created_at, c.name"),
    columns: &ITEM_COLUMNS,
};

/// A filter entry resolved to a known column.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Target column.
    pub column: Column,
    /// Match criterion.
    pub value: FilterValue,
}

impl Predicate {
    /// Resolve every entry of `filter` whose key names a filterable column.
    /// Unknown keys are dropped.
    pub fn resolve(columns: &ColumnSet, filter: &Filter) -> Vec<Self> {
        filter
            .fields()
            .iter()
            .filter_map(|f| match columns.filter_column(&f.field) {
                Some(column) => Some(Self {
                    column,
                    value: f.value.clone(),
                }),
                None => {
                    debug!(field = %f.field, "Ignoring filter on unknown column");
                    None
                }
            })
            .collect()
    }

    fn push(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        let expr = self.column.expr;
        qb.push(" AND ");
        match &self.value {
            FilterValue::Contains(needle) => {
                qb.push(format!("CAST({expr} AS TEXT) ILIKE "))
                    .push_bind(format!("%{}%", escape_like(needle)));
            }
            FilterValue::AnyOf(ListValues::Strings(values)) => {
                qb.push(format!("CAST({expr} AS TEXT) = ANY("))
                    .push_bind(values.clone())
                    .push(")");
            }
            FilterValue::AnyOf(ListValues::Integers(values)) => {
                qb.push(format!("{expr} = ANY("))
                    .push_bind(values.clone())
                    .push(")");
            }
            FilterValue::Exact(Scalar::Integer(v)) => {
                qb.push(format!("{expr} = ")).push_bind(*v);
            }
            FilterValue::Exact(Scalar::Float(v)) => {
                qb.push(format!("{expr} = ")).push_bind(*v);
            }
            FilterValue::Exact(Scalar::Boolean(v)) => {
                qb.push(format!("{expr} = ")).push_bind(*v);
            }
            FilterValue::Exact(Scalar::Null) => {
                qb.push(format!("{expr} IS NULL"));
            }
        }
    }
}

/// Escape `LIKE` wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn push_where(
    qb: &mut QueryBuilder<'static, Postgres>,
    statement: &ListStatement,
    predicates: &[Predicate],
) {
    qb.push(" FROM ").push(statement.from).push(" WHERE 1=1");
    for predicate in predicates {
        predicate.push(qb);
    }
    if let Some(group_by) = statement.group_by {
        qb.push(" GROUP BY ").push(group_by);
    }
}

impl ListStatement {
    /// Resolve `query` against this listing.
    ///
    /// Fails when the sort field is not a sortable column. Unknown filter
    /// keys are ignored.
    pub fn plan(&'static self, query: &ListQuery) -> AppResult<ListPlan> {
        let order = self.columns.sort_column(&query.sort.field).ok_or_else(|| {
            AppError::validation(format!(
                "Unknown sort field '{}'; expected one of: {}",
                query.sort.field,
                self.columns.sortable_names()
            ))
        })?;

        Ok(ListPlan {
            statement: self,
            predicates: Predicate::resolve(self.columns, &query.filter),
            order,
            direction: query.sort.direction,
            range: query.range,
        })
    }

    /// Resolve `filter` for counting the rows this listing would return.
    pub fn count_plan(&'static self, filter: &Filter) -> CountPlan {
        CountPlan {
            statement: self,
            predicates: Predicate::resolve(self.columns, filter),
        }
    }
}

/// A listing query with every client-supplied name resolved.
#[derive(Debug, Clone)]
pub struct ListPlan {
    statement: &'static ListStatement,
    predicates: Vec<Predicate>,
    order: Column,
    direction: SortDirection,
    range: RangeSpec,
}

impl ListPlan {
    /// Build the `SELECT`.
    ///
    /// Rows are ordered by the requested column and then by every row key
    /// column in the same direction. The keys make the order total, so
    /// pages do not overlap and the descending listing is the ascending one
    /// reversed.
    pub fn select(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(self.statement.select);
        push_where(&mut qb, self.statement, &self.predicates);

        let dir = self.direction.as_sql();
        qb.push(format!(" ORDER BY {} {dir}", self.order.expr));
        for key in self.statement.columns.keys {
            if *key != self.order.expr {
                qb.push(format!(", {key} {dir}"));
            }
        }

        qb.push(" LIMIT ")
            .push_bind(to_i64(self.range.limit()))
            .push(" OFFSET ")
            .push_bind(to_i64(self.range.offset()));
        qb
    }

    /// The requested range.
    pub fn range(&self) -> RangeSpec {
        self.range
    }
}

/// A count query with its filter resolved.
#[derive(Debug, Clone)]
pub struct CountPlan {
    statement: &'static ListStatement,
    predicates: Vec<Predicate>,
}

impl CountPlan {
    /// Build the `SELECT COUNT(*)`. Grouped listings count their groups.
    pub fn count(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*)");
        match self.statement.group_by {
            Some(_) => {
                qb.push(" FROM (SELECT 1");
                push_where(&mut qb, self.statement, &self.predicates);
                qb.push(") AS grouped");
            }
            None => push_where(&mut qb, self.statement, &self.predicates),
        }
        qb
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

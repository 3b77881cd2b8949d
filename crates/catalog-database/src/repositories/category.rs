//! Category repository implementation.

use catalog_core::result::AppResult;
use catalog_core::types::{Filter, ListQuery};
use catalog_entity::category::{Category, CreateCategory, UpdateCategory};

use crate::connection::DatabasePool;
use crate::error::db_error;
use crate::id_allocator::{IdAllocator, Table};
use crate::query::builder::CATEGORY_LIST;

const COLUMNS: &str = "id, name, description, created_at";

/// Repository for category CRUD and listing.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabasePool,
    ids: IdAllocator,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(db: DatabasePool, ids: IdAllocator) -> Self {
        Self { db, ids }
    }

    /// List categories matching `query`.
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<Category>> {
        const ORIGIN: &str = "category_repository::list";
        let plan = CATEGORY_LIST.plan(query)?;

        self.db
            .retry_once(ORIGIN, |pool| {
                let qb = plan.select();
                async move {
                    let mut qb = qb;
                    qb.build_query_as::<Category>().fetch_all(&pool).await
                }
            })
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to list categories", e))
    }

    /// Count categories matching `filter`.
    pub async fn count(&self, filter: &Filter) -> AppResult<i64> {
        const ORIGIN: &str = "category_repository::count";
        let plan = CATEGORY_LIST.count_plan(filter);

        self.db
            .retry_once(ORIGIN, |pool| {
                let qb = plan.count();
                async move {
                    let mut qb = qb;
                    qb.build_query_scalar::<i64>().fetch_one(&pool).await
                }
            })
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to count categories", e))
    }

    /// Find a category by id. The result is empty when it does not exist.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Vec<Category>> {
        const ORIGIN: &str = "category_repository::find_by_id";
        let sql = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");

        self.db
            .retry_once(ORIGIN, |pool| {
                let sql = sql.clone();
                async move {
                    sqlx::query_as::<_, Category>(&sql)
                        .bind(id)
                        .fetch_all(&pool)
                        .await
                }
            })
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to find category", e))
    }

    /// Insert a category under a freshly allocated id.
    pub async fn create(&self, input: &CreateCategory) -> AppResult<Category> {
        const ORIGIN: &str = "category_repository::create";

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to begin transaction", e))?;

        let id = self
            .ids
            .next_id(&mut tx, Table::Categories)
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to allocate category id", e))?;

        let category = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (id, name, description, created_at) \
             VALUES ($1, $2, $3, NOW()) RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error(ORIGIN, "Failed to insert category", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to commit category", e))?;

        Ok(category)
    }

    /// Overwrite a category's name and description and reset its
    /// `created_at` to now. Returns `None` when the category does not exist.
    pub async fn update(&self, id: i64, input: &UpdateCategory) -> AppResult<Option<Category>> {
        const ORIGIN: &str = "category_repository::update";

        sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories SET name = $2, description = $3, created_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| db_error(ORIGIN, "Failed to update category", e))
    }

    /// Delete a category. Returns whether a row was removed.
    ///
    /// Fails with a conflict while items are still linked to it.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        const ORIGIN: &str = "category_repository::delete";

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to delete category", e))?;

        Ok(result.rows_affected() > 0)
    }
}

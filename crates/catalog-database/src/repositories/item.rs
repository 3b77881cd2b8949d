//! Item repository implementation.
//!
//! Reads go through the pool. Writes are exposed as single-statement steps
//! taking a connection, so a caller can compose them inside one
//! transaction obtained from [`ItemRepository::begin`].

use sqlx::{PgConnection, Postgres, Transaction};

use catalog_core::result::AppResult;
use catalog_core::types::{Filter, ListQuery};
use catalog_entity::item::{Item, ItemCategory, ItemDetail, ItemImage, ItemSummary};

use crate::connection::DatabasePool;
use crate::error::db_error;
use crate::id_allocator::{IdAllocator, Table};
use crate::query::builder::ITEM_LIST;

const ITEM_COLUMNS: &str = "id, title, description, created_at";
const IMAGE_COLUMNS: &str = "id, item_id, url, alt_text, created_at";

const DETAIL_SQL: &str = "SELECT i.id, i.title, i.description, \
     c.id AS category_id, c.name, ii.url \
     FROM items i \
     LEFT JOIN item_categories ic ON ic.item_id = i.id \
     LEFT JOIN categories c ON c.id = ic.category_id \
     LEFT JOIN item_images ii ON ii.item_id = i.id \
     WHERE i.id = $1 \
     ORDER BY c.id ASC NULLS LAST, ii.id ASC NULLS LAST";

/// Repository for items, their category links, and their images.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    db: DatabasePool,
    ids: IdAllocator,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(db: DatabasePool, ids: IdAllocator) -> Self {
        Self { db, ids }
    }

    /// List items matching `query`, with a representative category name
    /// and image URL per row.
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<ItemSummary>> {
        const ORIGIN: &str = "item_repository::list";
        let plan = ITEM_LIST.plan(query)?;

        self.db
            .retry_once(ORIGIN, |pool| {
                let qb = plan.select();
                async move {
                    let mut qb = qb;
                    qb.build_query_as::<ItemSummary>().fetch_all(&pool).await
                }
            })
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to list items", e))
    }

    /// Count the rows [`list`](Self::list) would return for `filter`
    /// without paging.
    pub async fn count(&self, filter: &Filter) -> AppResult<i64> {
        const ORIGIN: &str = "item_repository::count";
        let plan = ITEM_LIST.count_plan(filter);

        self.db
            .retry_once(ORIGIN, |pool| {
                let qb = plan.count();
                async move {
                    let mut qb = qb;
                    qb.build_query_scalar::<i64>().fetch_one(&pool).await
                }
            })
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to count items", e))
    }

    /// One row per (category link, image) combination of the item, or an
    /// empty result when it does not exist.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Vec<ItemDetail>> {
        const ORIGIN: &str = "item_repository::find_by_id";

        self.db
            .retry_once(ORIGIN, |pool| async move {
                sqlx::query_as::<_, ItemDetail>(DETAIL_SQL)
                    .bind(id)
                    .fetch_all(&pool)
                    .await
            })
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to find item", e))
    }

    /// Category links of an item.
    pub async fn find_links(&self, item_id: i64) -> AppResult<Vec<ItemCategory>> {
        const ORIGIN: &str = "item_repository::find_links";

        sqlx::query_as::<_, ItemCategory>(
            "SELECT item_id, category_id, created_at FROM item_categories \
             WHERE item_id = $1 ORDER BY category_id",
        )
        .bind(item_id)
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| db_error(ORIGIN, "Failed to find item links", e))
    }

    /// Image rows of an item, oldest first.
    pub async fn find_images(&self, item_id: i64) -> AppResult<Vec<ItemImage>> {
        const ORIGIN: &str = "item_repository::find_images";

        sqlx::query_as::<_, ItemImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM item_images WHERE item_id = $1 ORDER BY id"
        ))
        .bind(item_id)
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| db_error(ORIGIN, "Failed to find item images", e))
    }

    /// Start a transaction for a multi-step write.
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.db
            .pool()
            .begin()
            .await
            .map_err(|e| db_error("item_repository::begin", "Failed to begin transaction", e))
    }

    /// Lock an item row for the rest of the transaction.
    pub async fn lock(&self, conn: &mut PgConnection, id: i64) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| db_error("item_repository::lock", "Failed to lock item", e))
    }

    /// Insert an item under a freshly allocated id.
    pub async fn insert_item(
        &self,
        conn: &mut PgConnection,
        title: &str,
        description: &str,
    ) -> AppResult<Item> {
        const ORIGIN: &str = "item_repository::insert_item";

        let id = self
            .ids
            .next_id(conn, Table::Items)
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to allocate item id", e))?;

        sqlx::query_as::<_, Item>(&format!(
            "INSERT INTO items (id, title, description, created_at) \
             VALUES ($1, $2, $3, NOW()) RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| db_error(ORIGIN, "Failed to insert item", e))
    }

    /// Link an item to a category.
    ///
    /// Fails with a validation error when the category does not exist.
    pub async fn insert_link(
        &self,
        conn: &mut PgConnection,
        item_id: i64,
        category_id: i64,
    ) -> AppResult<ItemCategory> {
        sqlx::query_as::<_, ItemCategory>(
            "INSERT INTO item_categories (item_id, category_id, created_at) \
             VALUES ($1, $2, NOW()) RETURNING item_id, category_id, created_at",
        )
        .bind(item_id)
        .bind(category_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| db_error("item_repository::insert_link", "Failed to link item to category", e))
    }

    /// Record an uploaded image for an item under a freshly allocated id.
    pub async fn insert_image(
        &self,
        conn: &mut PgConnection,
        item_id: i64,
        url: &str,
        alt_text: &str,
    ) -> AppResult<ItemImage> {
        const ORIGIN: &str = "item_repository::insert_image";

        let id = self
            .ids
            .next_id(conn, Table::ItemImages)
            .await
            .map_err(|e| db_error(ORIGIN, "Failed to allocate image id", e))?;

        sqlx::query_as::<_, ItemImage>(&format!(
            "INSERT INTO item_images (id, item_id, url, alt_text, created_at) \
             VALUES ($1, $2, $3, $4, NOW()) RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(id)
        .bind(item_id)
        .bind(url)
        .bind(alt_text)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| db_error(ORIGIN, "Failed to insert item image", e))
    }

    /// Overwrite an item's title and description.
    pub async fn update_item(
        &self,
        conn: &mut PgConnection,
        id: i64,
        title: &str,
        description: &str,
    ) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>(&format!(
            "UPDATE items SET title = $2, description = $3 WHERE id = $1 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| db_error("item_repository::update_item", "Failed to update item", e))
    }

    /// Remove every category link of an item.
    pub async fn delete_links(&self, conn: &mut PgConnection, item_id: i64) -> AppResult<u64> {
        sqlx::query("DELETE FROM item_categories WHERE item_id = $1")
            .bind(item_id)
            .execute(&mut *conn)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| db_error("item_repository::delete_links", "Failed to delete item links", e))
    }

    /// Remove every image row of an item.
    pub async fn delete_images(&self, conn: &mut PgConnection, item_id: i64) -> AppResult<u64> {
        sqlx::query("DELETE FROM item_images WHERE item_id = $1")
            .bind(item_id)
            .execute(&mut *conn)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| {
                db_error("item_repository::delete_images", "Failed to delete item images", e)
            })
    }

    /// Remove the item row itself. Links and images must be gone already.
    pub async fn delete_item(&self, conn: &mut PgConnection, item_id: i64) -> AppResult<u64> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(&mut *conn)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| db_error("item_repository::delete_item", "Failed to delete item", e))
    }
}

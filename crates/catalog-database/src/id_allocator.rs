//! Primary key allocation for the catalog tables.
//!
//! Ids are `max(id) + 1` over the target table, read on the same
//! connection that performs the insert. Two concurrent writers can read the
//! same maximum; the primary key then rejects the second insert, which
//! surfaces as a conflict. With serialization enabled, each allocation
//! first takes a transaction-scoped advisory lock keyed by the table, so
//! allocations inside transactions are serialized per table until commit.

use sqlx::PgConnection;

/// Tables with application-allocated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// `categories`
    Categories,
    /// `items`
    Items,
    /// `item_images`
    ItemImages,
}

impl Table {
    /// SQL table name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Items => "items",
            Self::ItemImages => "item_images",
        }
    }

    /// Advisory lock key for this table's id sequence.
    fn lock_key(&self) -> i64 {
        const BASE: i64 = 0x00CA_7A10_0000;
        match self {
            Self::Categories => BASE + 1,
            Self::Items => BASE + 2,
            Self::ItemImages => BASE + 3,
        }
    }

    fn next_id_sql(&self) -> String {
        format!("SELECT COALESCE(MAX(id), 0) + 1 FROM {}", self.name())
    }
}

/// Allocates the next id for a [`Table`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IdAllocator {
    serialize: bool,
}

impl IdAllocator {
    /// Create an allocator. `serialize` enables the per-table advisory lock.
    pub fn new(serialize: bool) -> Self {
        Self { serialize }
    }

    /// Return `max(id) + 1` for `table`, or 1 when it is empty.
    ///
    /// Call this inside the transaction that inserts the row.
    pub async fn next_id(&self, conn: &mut PgConnection, table: Table) -> Result<i64, sqlx::Error> {
        if self.serialize {
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(table.lock_key())
                .execute(&mut *conn)
                .await?;
        }

        let sql = table.next_id_sql();
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&mut *conn)
            .await
    }
}

//! End-to-end HTTP tests against a live PostgreSQL.
//!
//! Set `CATALOG_TEST_DATABASE_URL` to a disposable database to run them;
//! without it every test returns early.

mod categories_test;
mod helpers;
mod items_test;

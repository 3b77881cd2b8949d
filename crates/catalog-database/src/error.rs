//! Mapping of sqlx failures onto [`AppError`].
//!
//! Every repository failure is logged here with the operation it came
//! from before being converted, so callers only see the typed error.

use tracing::error;

use catalog_core::error::{AppError, ErrorKind};

/// Log `err` under `origin` and convert it to an [`AppError`].
///
/// Constraint violations become client errors:
///
/// * a primary key collision is a [`ErrorKind::Conflict`] (two writers
///   allocated the same id),
/// * an insert that references a missing row is a [`ErrorKind::Validation`],
/// * a delete of a row that is still referenced is a [`ErrorKind::Conflict`].
///
/// Everything else is a [`ErrorKind::Database`] error.
pub fn db_error(origin: &'static str, context: &str, err: sqlx::Error) -> AppError {
    error!(origin, error = %err, "{context}");

    let kind = match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ErrorKind::Conflict,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            // PostgreSQL reports the referenced side as "update or delete on
            // table ..." and the referencing side as "insert or update ...".
            if db.message().starts_with("update or delete") {
                ErrorKind::Conflict
            } else {
                ErrorKind::Validation
            }
        }
        _ => ErrorKind::Database,
    };

    let message = match kind {
        ErrorKind::Conflict => format!("{context}: the row conflicts with existing data"),
        ErrorKind::Validation => format!("{context}: a referenced row does not exist"),
        _ => context.to_string(),
    };
    AppError::with_source(kind, message, err)
}

//! Translation of sqlx errors into domain errors.

use hoard_core::error::CoreError;

/// PostgreSQL SQLSTATE codes the repositories care about.
const NOT_NULL_VIOLATION: &str = "23502";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";

/// Classify a sqlx error.
///
/// - NOT NULL, foreign key and CHECK violations map to [`CoreError::Integrity`].
/// - Unique violations map to [`CoreError::Conflict`].
/// - Everything else maps to [`CoreError::Storage`] and is logged.
pub fn classify(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            Some(NOT_NULL_VIOLATION | FOREIGN_KEY_VIOLATION | CHECK_VIOLATION) => {
                return CoreError::Integrity(format!(
                    "{} (constraint: {constraint})",
                    db_err.message()
                ));
            }
            Some(UNIQUE_VIOLATION) => {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Database error");
    CoreError::Storage(err.to_string())
}

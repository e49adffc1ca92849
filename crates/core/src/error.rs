use serde::Serialize;

use crate::types::DbId;

/// A single field-level rule violation, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// API-facing field name (e.g. `coolFactor`).
    pub field: String,
    /// Machine-readable rule code (`length`, `range`, `required`, `blank`).
    pub rule: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(Vec<FieldViolation>),

    /// A rejection raised by the store itself (foreign key, not-null).
    #[error("Integrity constraint violated: {0}")]
    Integrity(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FieldViolation {
    /// Flatten `validator` output into a stable, sorted violation list.
    ///
    /// `wire_name` maps Rust attribute names to the names callers see.
    pub fn from_errors(
        errors: &validator::ValidationErrors,
        wire_name: fn(&str) -> &str,
    ) -> Vec<Self> {
        let mut violations: Vec<Self> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = wire_name(field.as_ref()).to_string();
                errs.iter().map(move |err| Self {
                    field: field.clone(),
                    rule: err.code.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map_or_else(|| format!("Invalid {field}"), |m| m.to_string()),
                })
            })
            .collect();
        violations.sort_by(|a, b| (&a.field, &a.rule).cmp(&(&b.field, &b.rule)));
        violations
    }
}

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hoard_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `hoard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let core = match self {
            AppError::Core(core) => core,
            AppError::BadRequest(msg) => {
                return error_body(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg);
            }
        };

        match core {
            CoreError::NotFound { entity, id } => error_body(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            CoreError::Validation(msg) => {
                error_body(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            CoreError::InvalidFields(violations) => {
                let body = json!({
                    "error": "Validation failed",
                    "code": "VALIDATION_ERROR",
                    "violations": violations,
                });
                (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
            }
            CoreError::Integrity(msg) => {
                tracing::warn!(error = %msg, "Store rejected write");
                error_body(StatusCode::CONFLICT, "INTEGRITY_ERROR", msg)
            }
            CoreError::Conflict(msg) => error_body(StatusCode::CONFLICT, "CONFLICT", msg),
            CoreError::Storage(msg) | CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal core error");
                error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        }
    }
}

fn error_body(status: StatusCode, code: &'static str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });

    (status, axum::Json(body)).into_response()
}

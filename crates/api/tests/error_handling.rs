//! Unit-style tests for the `AppError` to HTTP response mapping.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::Value;

use hoard_api::error::AppError;
use hoard_core::error::{CoreError, FieldViolation};

async fn error_to_response(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Core(CoreError::NotFound {
        entity: "Treasure",
        id: 42,
    }))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Treasure with id 42 not found");
}

#[tokio::test]
async fn field_violations_map_to_422_with_list() {
    let violation = FieldViolation {
        field: "coolFactor".into(),
        rule: "range".into(),
        message: "Cool factor must be between 0 and 10".into(),
    };
    let (status, json) =
        error_to_response(AppError::Core(CoreError::InvalidFields(vec![violation]))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["violations"][0]["field"], "coolFactor");
    assert_eq!(json["violations"][0]["rule"], "range");
}

#[tokio::test]
async fn integrity_maps_to_409_distinct_from_conflict() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Integrity("owner missing".into()))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INTEGRITY_ERROR");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Conflict("duplicate".into()))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn validation_and_bad_request_map_to_400() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Validation("bad owner".into()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, json) = error_to_response(AppError::BadRequest("bad".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn storage_errors_are_sanitized() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Storage("pool timed out".into()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[test]
fn core_errors_convert_into_app_errors() {
    let err: AppError = CoreError::Conflict("x".into()).into();
    assert_matches!(err, AppError::Core(CoreError::Conflict(_)));
}

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use hoard_api::config::ServerConfig;
use hoard_api::router::build_app_router;
use hoard_api::state::AppState;

/// Build a test `ServerConfig`: memory storage, dev CORS origin, 10 items
/// per page.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|name| match name {
        "HOST" => Some("127.0.0.1".to_string()),
        "STORAGE" => Some("memory".to_string()),
        _ => None,
    })
    .expect("test configuration must be valid")
}

/// Build the full application router over a fresh in-memory store.
///
/// The router is cheap to clone and every clone shares the same store, so a
/// test builds it once and clones it per request.
pub fn build_test_app() -> Router {
    build_test_app_with_state().0
}

/// Like [`build_test_app`], also handing back the state so a test can reach
/// the store directly, e.g. to publish a treasure.
pub fn build_test_app_with_state() -> (Router, AppState) {
    let config = test_config();
    let state = AppState::in_memory(config.clone());
    (build_app_router(state.clone(), &config), state)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Send a raw, possibly malformed, JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a user and return its id.
pub async fn create_user(app: &Router, username: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/users",
        serde_json::json!({
            "username": username,
            "email": format!("{username}@hoard.test"),
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a treasure owned by `owner` and return its id.
pub async fn create_treasure(app: &Router, owner: i64, name: &str, value: i64) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/treasures",
        serde_json::json!({
            "name": name,
            "description": "Glittering and heavy",
            "value": value,
            "coolFactor": 5,
            "ownedBy": format!("/api/v1/users/{owner}"),
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

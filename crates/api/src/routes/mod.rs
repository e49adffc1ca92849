pub mod health;
pub mod treasures;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /treasures                                       list, create
/// /treasures/{id}                                  get, replace (PUT), update (PATCH), delete
///
/// /users                                           create
/// /users/{id}                                      get, delete
/// /users/{id}/treasures                            owned treasures (paginated)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/treasures", treasures::router())
        .nest("/users", users::router())
}

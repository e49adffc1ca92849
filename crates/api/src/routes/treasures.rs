use axum::routing::get;
use axum::Router;

use crate::handlers::treasures;
use crate::state::AppState;

/// Routes mounted at `/treasures`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> replace
/// PATCH  /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(treasures::list).post(treasures::create))
        .route(
            "/{id}",
            get(treasures::get_by_id)
                .put(treasures::replace)
                .patch(treasures::update)
                .delete(treasures::delete),
        )
}

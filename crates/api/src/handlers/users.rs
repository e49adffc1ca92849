//! Handlers for the `/users` resource and its owned treasures.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hoard_core::error::CoreError;
use hoard_core::filter::{Page, TreasureFilter};
use hoard_core::types::DbId;
use hoard_core::user::NewUser;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::treasures::render;
use crate::query::{selected_properties, PageParams};
use crate::resources::user::UserRead;
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<UserRead>>)> {
    let Json(input) = body?;
    input.ensure_valid()?;
    let user = state.users.create(&input).await?;
    tracing::info!(user_id = user.id, "User created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserRead::from(user),
        }),
    ))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserRead>>> {
    let user = state.users.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: UserRead::from(user),
    }))
}

/// DELETE /api/v1/users/{id}
///
/// Refused with 409 while the user still owns treasures.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if state.users.delete(id).await? {
        tracing::info!(user_id = id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/v1/users/{id}/treasures
pub async fn list_treasures(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> AppResult<Json<ListResponse<Value>>> {
    let Query(params) = params?;
    state.users.find(id).await?.ok_or_else(|| not_found(id))?;

    let filter = TreasureFilter {
        owned_by: Some(id),
        ..Default::default()
    };
    let page = Page::new(params.page, state.config.items_per_page);
    let properties = selected_properties(params.properties.as_deref());

    let treasures = state.treasures.list(&filter, page).await?;
    let total = state.treasures.count(&filter).await?;

    let data = treasures
        .iter()
        .map(|t| render(t, properties.as_deref()))
        .collect();
    Ok(Json(ListResponse::new(data, page, total)))
}

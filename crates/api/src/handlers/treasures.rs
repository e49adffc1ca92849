//! Handlers for the `/treasures` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hoard_core::error::CoreError;
use hoard_core::treasure::Treasure;
use hoard_core::types::DbId;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::query::{selected_properties, PropertiesParams, TreasureListParams};
use crate::resources::treasure::{TreasureRead, TreasureWrite};
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Treasure",
        id,
    })
}

/// Render one treasure in the read profile.
pub(crate) fn render(treasure: &Treasure, properties: Option<&[&str]>) -> Value {
    TreasureRead::new(treasure, Utc::now()).render(properties)
}

/// GET /api/v1/treasures
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<TreasureListParams>, QueryRejection>,
) -> AppResult<Json<ListResponse<Value>>> {
    let Query(params) = params?;
    let filter = params.filter();
    let page = params.page(state.config.items_per_page);
    let properties = selected_properties(params.properties.as_deref());

    let treasures = state.treasures.list(&filter, page).await?;
    let total = state.treasures.count(&filter).await?;
    tracing::debug!(page = page.number, returned = treasures.len(), total, "Listed treasures");

    let data = treasures
        .iter()
        .map(|t| render(t, properties.as_deref()))
        .collect();
    Ok(Json(ListResponse::new(data, page, total)))
}

/// POST /api/v1/treasures
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<TreasureWrite>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<Value>>)> {
    let Json(input) = body?;
    let treasure = input.create()?;
    treasure.ensure_valid()?;
    let treasure = state
        .treasures
        .save(treasure)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Internal("insert returned no row".into())))?;

    tracing::info!(
        treasure_id = treasure.id(),
        owner_id = treasure.owned_by(),
        "Treasure created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: render(&treasure, None),
        }),
    ))
}

/// GET /api/v1/treasures/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    params: Result<Query<PropertiesParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Value>>> {
    let Query(params) = params?;
    let treasure = state
        .treasures
        .find(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let properties = selected_properties(params.properties.as_deref());
    Ok(Json(DataResponse {
        data: render(&treasure, properties.as_deref()),
    }))
}

/// PUT /api/v1/treasures/{id}
///
/// Writable fields missing from the body revert to their defaults.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<TreasureWrite>, JsonRejection>,
) -> AppResult<Json<DataResponse<Value>>> {
    let Json(input) = body?;
    let treasure = state
        .treasures
        .update_with(
            id,
            Box::new(move |existing: Treasure| {
                let treasure = input.replace(&existing)?;
                treasure.ensure_valid()?;
                Ok(treasure)
            }),
        )
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(treasure_id = id, "Treasure replaced");
    Ok(Json(DataResponse {
        data: render(&treasure, None),
    }))
}

/// PATCH /api/v1/treasures/{id}
///
/// Only the fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<TreasureWrite>, JsonRejection>,
) -> AppResult<Json<DataResponse<Value>>> {
    let Json(input) = body?;
    let treasure = state
        .treasures
        .update_with(
            id,
            Box::new(move |mut treasure: Treasure| {
                input.apply(&mut treasure)?;
                treasure.ensure_valid()?;
                Ok(treasure)
            }),
        )
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(treasure_id = id, "Treasure updated");
    Ok(Json(DataResponse {
        data: render(&treasure, None),
    }))
}

/// DELETE /api/v1/treasures/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if state.treasures.delete(id).await? {
        tracing::info!(treasure_id = id, "Treasure deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

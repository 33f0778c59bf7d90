//! Entity CRUD handlers, generic over the resource: list, create, read, update, delete.

use crate::error::AppError;
use crate::extractors::{Existing, JsonObject};
use crate::response::created;
use crate::service::Resource;
use crate::state::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::Response,
    Json,
};

pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Vec<R>>, AppError> {
    let rows = R::list(&state.pool).await?;
    Ok(Json(rows.iter().map(R::sanitized).collect()))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    JsonObject(body): JsonObject,
) -> Result<Response, AppError> {
    let new = R::new_from_body(&body)?;
    let row = R::insert(&state.pool, new).await?;
    tracing::info!(id = row.id(), path = %uri.path(), "created");
    Ok(created(&uri, row.id(), row.sanitized()))
}

pub async fn read<R: Resource>(Existing(row): Existing<R>) -> Json<R> {
    Json(row.sanitized())
}

/// 204 once the pre-check found the row, whatever the delete affected.
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Existing(row): Existing<R>,
) -> Result<StatusCode, AppError> {
    R::delete_by_id(&state.pool, row.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Existing(row): Existing<R>,
    JsonObject(body): JsonObject,
) -> Result<StatusCode, AppError> {
    let patch = R::patch_from_body(&body)?;
    R::update_by_id(&state.pool, row.id(), patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

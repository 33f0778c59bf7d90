//! Load the row named by the `:id` path segment, or reject with the entity's 404.

use crate::error::AppError;
use crate::service::Resource;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// The record addressed by the request path. Read, delete and patch all start from this,
/// so a missing row answers 404 before the body is looked at.
#[derive(Clone, Debug)]
pub struct Existing<T>(pub T);

#[async_trait]
impl<T> FromRequestParts<AppState> for Existing<T>
where
    T: Resource,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(T::NOT_FOUND))?;
        // A non-integer id cannot match a row.
        let id: i32 = raw.parse().map_err(|_| AppError::not_found(T::NOT_FOUND))?;
        let row = T::get_by_id(&state.pool, id).await?;
        row.map(Existing).ok_or_else(|| AppError::not_found(T::NOT_FOUND))
    }
}

//! Root health check and the catch-all for unmatched paths.

use crate::error::AppError;
use axum::http::{StatusCode, Uri};

pub const PATH_NOT_FOUND: &str = "Path Not Found";

/// GET /: 200 with an empty body.
pub async fn root() -> StatusCode {
    StatusCode::OK
}

pub async fn path_not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route");
    AppError::not_found(PATH_NOT_FOUND)
}

//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
    #[error("unknown APP_ENV '{0}' (expected production, development or test)")]
    UnknownMode(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("password hashing: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }
}

/// Message sent in place of internal error text.
pub const SERVER_ERROR_MESSAGE: &str = "server error";

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody {
            error: ErrorDetail {
                message: message.into(),
                details: None,
            },
        }
    }
}

/// Attached to 500 responses so the error responder can expose the cause outside production.
#[derive(Clone, Debug)]
pub struct ServerErrorDetail(pub String);

/// Generic 500 carrying the cause in its extensions.
pub fn server_error_response(detail: String) -> Response {
    let mut res = (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(SERVER_ERROR_MESSAGE)),
    )
        .into_response();
    res.extensions_mut().insert(ServerErrorDetail(detail));
    res
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, Json(ErrorBody::new(message))).into_response(),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response(),
            other => {
                tracing::error!(error = %other, "request failed");
                server_error_response(other.to_string())
            }
        }
    }
}

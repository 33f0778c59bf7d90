//! Response middleware: security headers, panic capture and the centralized 500 responder.

use crate::error::{server_error_response, ErrorBody, ErrorDetail, ServerErrorDetail, SERVER_ERROR_MESSAGE};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;

/// Headers set on every response unless a handler already set them.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-xss-protection", "0"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
];

/// `map_response` middleware adding [`SECURITY_HEADERS`].
pub async fn security_headers(mut res: Response) -> Response {
    let headers = res.headers_mut();
    for &(name, value) in SECURITY_HEADERS {
        headers
            .entry(HeaderName::from_static(name))
            .or_insert(HeaderValue::from_static(value));
    }
    res
}

/// Turns a handler panic into the same 500 an error would produce.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");
    server_error_response(format!("panic: {}", detail))
}

/// Every 500 passes through here. Outside production the cause is added as `error.details`.
pub async fn render_server_errors(State(state): State<AppState>, res: Response) -> Response {
    let Some(ServerErrorDetail(detail)) = res.extensions().get::<ServerErrorDetail>().cloned() else {
        return res;
    };
    if state.config.is_production() {
        return res;
    }
    let (mut parts, _) = res.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    let body = ErrorBody {
        error: ErrorDetail {
            message: SERVER_ERROR_MESSAGE.to_string(),
            details: Some(detail),
        },
    };
    Response::from_parts(parts, Json(body).into_response().into_body())
}

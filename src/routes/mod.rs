//! Application assembly: routers mounted under their prefixes, then the middleware stack.

pub mod common;
pub mod entity;

pub use common::common_routes;
pub use entity::entity_routes;

use crate::handlers::common::path_not_found;
use crate::middleware::{panic_response, render_server_errors, security_headers};
use crate::models::{Article, Comment, User};
use crate::state::AppState;
use axum::{middleware, Router};
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

/// Request bodies above 100 KiB are rejected.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// The whole application. Layers listed last run first on the way in.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .nest("/api/articles", entity_routes::<Article>())
        .nest("/api/comments", entity_routes::<Comment>())
        .nest("/api/users", entity_routes::<User>())
        .fallback(path_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::map_response_with_state(state.clone(), render_server_errors))
        .layer(middleware::map_response(security_headers))
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

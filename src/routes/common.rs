//! Root route: GET / health check.

use crate::handlers::common::root;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes() -> Router<AppState> {
    Router::new().route("/", get(root))
}

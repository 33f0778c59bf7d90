//! Entity CRUD routes. Mounted once per resource under its own prefix.

use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::service::Resource;
use crate::state::AppState;
use axum::{routing::get, Router};

/// `/` list + create, `/:id` read, delete, partial update.
pub fn entity_routes<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route(
            "/:id",
            get(read::<R>).delete(delete_handler::<R>).patch(update::<R>),
        )
}

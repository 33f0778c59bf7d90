//! Response helpers.

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `<request path>/<id>`, without doubling a trailing slash.
pub fn location_for(uri: &Uri, id: i32) -> String {
    format!("{}/{}", uri.path().trim_end_matches('/'), id)
}

/// 201 with a Location header pointing at the new resource.
pub fn created<T: Serialize>(uri: &Uri, id: i32, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location_for(uri, id))],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_joins_path_and_id() {
        let uri: Uri = "/api/articles".parse().unwrap();
        assert_eq!(location_for(&uri, 12), "/api/articles/12");
        let uri: Uri = "/api/users/?x=1".parse().unwrap();
        assert_eq!(location_for(&uri, 3), "/api/users/3");
    }

    #[test]
    fn created_sets_status_and_location() {
        let uri: Uri = "/api/comments".parse().unwrap();
        let res = created(&uri, 5, serde_json::json!({ "id": 5 }));
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()[header::LOCATION], "/api/comments/5");
    }
}

//! Entity services (list, get-by-id, insert, update-by-id, delete-by-id) over the SQL builder,
//! and the `Resource` trait the HTTP layer is generic over.

mod articles;
mod comments;
mod crud;
mod users;
pub mod validation;

pub use articles::ArticlesService;
pub use comments::CommentsService;
pub use crud::CrudService;
pub use users::UsersService;
pub use validation::RequestValidator;

use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use validation::Body;

/// An entity exposed over HTTP: how to read its payloads, scrub it for output, and reach its service.
#[async_trait]
pub trait Resource: Serialize + Sized + Send + Sync + 'static {
    type New: Send;
    type Patch: Send;

    /// 404 message when the id does not match a row.
    const NOT_FOUND: &'static str;

    fn id(&self) -> i32;

    /// Copy with every free-text field scrubbed.
    fn sanitized(&self) -> Self;

    fn new_from_body(body: &Body) -> Result<Self::New, AppError>;

    fn patch_from_body(body: &Body) -> Result<Self::Patch, AppError>;

    async fn list(pool: &PgPool) -> Result<Vec<Self>, AppError>;

    async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError>;

    async fn insert(pool: &PgPool, new: Self::New) -> Result<Self, AppError>;

    async fn update_by_id(pool: &PgPool, id: i32, patch: Self::Patch) -> Result<u64, AppError>;

    async fn delete_by_id(pool: &PgPool, id: i32) -> Result<u64, AppError>;
}

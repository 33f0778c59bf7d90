use crate::error::AppError;
use crate::models::{Comment, CommentPatch, NewComment, COMMENTS};
use crate::service::validation::Body;
use crate::service::{CrudService, Resource};
use crate::sql;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct CommentsService;

impl CommentsService {
    pub async fn get_all_comments(pool: &PgPool) -> Result<Vec<Comment>, AppError> {
        CrudService::fetch_all(pool, sql::select_all(&COMMENTS)).await
    }

    pub async fn get_comment_by_id(pool: &PgPool, id: i32) -> Result<Option<Comment>, AppError> {
        CrudService::fetch_optional(pool, sql::select_by_id(&COMMENTS, id)).await
    }

    /// A dangling `article_id` or `user_id` fails on the store's foreign keys.
    pub async fn insert_comment(pool: &PgPool, new: &NewComment) -> Result<Comment, AppError> {
        CrudService::fetch_one(pool, sql::insert(&COMMENTS, new.columns())).await
    }

    pub async fn update_comment_by_id(pool: &PgPool, id: i32, patch: &CommentPatch) -> Result<u64, AppError> {
        match sql::update(&COMMENTS, id, patch.columns()) {
            Some(q) => CrudService::execute(pool, q).await,
            None => Ok(0),
        }
    }

    pub async fn delete_comment_by_id(pool: &PgPool, id: i32) -> Result<u64, AppError> {
        CrudService::execute(pool, sql::delete(&COMMENTS, id)).await
    }
}

#[async_trait]
impl Resource for Comment {
    type New = NewComment;
    type Patch = CommentPatch;

    const NOT_FOUND: &'static str = "Comment does not exist";

    fn id(&self) -> i32 {
        self.id
    }

    fn sanitized(&self) -> Self {
        Comment::sanitized(self)
    }

    fn new_from_body(body: &Body) -> Result<NewComment, AppError> {
        NewComment::from_body(body)
    }

    fn patch_from_body(body: &Body) -> Result<CommentPatch, AppError> {
        CommentPatch::from_body(body)
    }

    async fn list(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        CommentsService::get_all_comments(pool).await
    }

    async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        CommentsService::get_comment_by_id(pool, id).await
    }

    async fn insert(pool: &PgPool, new: NewComment) -> Result<Self, AppError> {
        CommentsService::insert_comment(pool, &new).await
    }

    async fn update_by_id(pool: &PgPool, id: i32, patch: CommentPatch) -> Result<u64, AppError> {
        CommentsService::update_comment_by_id(pool, id, &patch).await
    }

    async fn delete_by_id(pool: &PgPool, id: i32) -> Result<u64, AppError> {
        CommentsService::delete_comment_by_id(pool, id).await
    }
}

use crate::error::AppError;
use crate::models::{NewUser, User, UserPatch, USERS};
use crate::service::validation::Body;
use crate::service::{CrudService, Resource};
use crate::sql;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct UsersService;

impl UsersService {
    pub async fn get_all_users(pool: &PgPool) -> Result<Vec<User>, AppError> {
        CrudService::fetch_all(pool, sql::select_all(&USERS)).await
    }

    pub async fn get_user_by_id(pool: &PgPool, id: i32) -> Result<Option<User>, AppError> {
        CrudService::fetch_optional(pool, sql::select_by_id(&USERS, id)).await
    }

    /// Hashes the password (if any) before it is written.
    pub async fn insert_user(pool: &PgPool, new: &NewUser) -> Result<User, AppError> {
        let hash = hash_opt(new.password.clone()).await?;
        CrudService::fetch_one(pool, sql::insert(&USERS, new.columns(hash))).await
    }

    pub async fn update_user_by_id(pool: &PgPool, id: i32, patch: &UserPatch) -> Result<u64, AppError> {
        let hash = hash_opt(patch.password.clone()).await?;
        match sql::update(&USERS, id, patch.columns(hash)) {
            Some(q) => CrudService::execute(pool, q).await,
            None => Ok(0),
        }
    }

    pub async fn delete_user_by_id(pool: &PgPool, id: i32) -> Result<u64, AppError> {
        CrudService::execute(pool, sql::delete(&USERS, id)).await
    }
}

/// bcrypt is CPU bound; keep it off the async workers.
async fn hash_opt(password: Option<String>) -> Result<Option<String>, AppError> {
    let Some(password) = password else {
        return Ok(None);
    };
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))??;
    Ok(Some(hash))
}

#[async_trait]
impl Resource for User {
    type New = NewUser;
    type Patch = UserPatch;

    const NOT_FOUND: &'static str = "User does not exist";

    fn id(&self) -> i32 {
        self.id
    }

    fn sanitized(&self) -> Self {
        User::sanitized(self)
    }

    fn new_from_body(body: &Body) -> Result<NewUser, AppError> {
        NewUser::from_body(body)
    }

    fn patch_from_body(body: &Body) -> Result<UserPatch, AppError> {
        UserPatch::from_body(body)
    }

    async fn list(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        UsersService::get_all_users(pool).await
    }

    async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        UsersService::get_user_by_id(pool, id).await
    }

    async fn insert(pool: &PgPool, new: NewUser) -> Result<Self, AppError> {
        UsersService::insert_user(pool, &new).await
    }

    async fn update_by_id(pool: &PgPool, id: i32, patch: UserPatch) -> Result<u64, AppError> {
        UsersService::update_user_by_id(pool, id, &patch).await
    }

    async fn delete_by_id(pool: &PgPool, id: i32) -> Result<u64, AppError> {
        UsersService::delete_user_by_id(pool, id).await
    }
}

use crate::error::AppError;
use crate::models::{Article, ArticlePatch, NewArticle, ARTICLES};
use crate::service::validation::Body;
use crate::service::{CrudService, Resource};
use crate::sql;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct ArticlesService;

impl ArticlesService {
    pub async fn get_all_articles(pool: &PgPool) -> Result<Vec<Article>, AppError> {
        CrudService::fetch_all(pool, sql::select_all(&ARTICLES)).await
    }

    pub async fn get_article_by_id(pool: &PgPool, id: i32) -> Result<Option<Article>, AppError> {
        CrudService::fetch_optional(pool, sql::select_by_id(&ARTICLES, id)).await
    }

    /// Returns the stored row, including `id` and `date_published`.
    pub async fn insert_article(pool: &PgPool, new: &NewArticle) -> Result<Article, AppError> {
        CrudService::fetch_one(pool, sql::insert(&ARTICLES, new.columns())).await
    }

    pub async fn update_article_by_id(pool: &PgPool, id: i32, patch: &ArticlePatch) -> Result<u64, AppError> {
        match sql::update(&ARTICLES, id, patch.columns()) {
            Some(q) => CrudService::execute(pool, q).await,
            None => Ok(0),
        }
    }

    pub async fn delete_article_by_id(pool: &PgPool, id: i32) -> Result<u64, AppError> {
        CrudService::execute(pool, sql::delete(&ARTICLES, id)).await
    }
}

#[async_trait]
impl Resource for Article {
    type New = NewArticle;
    type Patch = ArticlePatch;

    const NOT_FOUND: &'static str = "Article does not exist";

    fn id(&self) -> i32 {
        self.id
    }

    fn sanitized(&self) -> Self {
        Article::sanitized(self)
    }

    fn new_from_body(body: &Body) -> Result<NewArticle, AppError> {
        NewArticle::from_body(body)
    }

    fn patch_from_body(body: &Body) -> Result<ArticlePatch, AppError> {
        ArticlePatch::from_body(body)
    }

    async fn list(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        ArticlesService::get_all_articles(pool).await
    }

    async fn get_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        ArticlesService::get_article_by_id(pool, id).await
    }

    async fn insert(pool: &PgPool, new: NewArticle) -> Result<Self, AppError> {
        ArticlesService::insert_article(pool, &new).await
    }

    async fn update_by_id(pool: &PgPool, id: i32, patch: ArticlePatch) -> Result<u64, AppError> {
        ArticlesService::update_article_by_id(pool, id, &patch).await
    }

    async fn delete_by_id(pool: &PgPool, id: i32) -> Result<u64, AppError> {
        ArticlesService::delete_article_by_id(pool, id).await
    }
}

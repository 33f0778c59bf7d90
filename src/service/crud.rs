//! Executes builder output against PostgreSQL, decoding rows into typed records.

use crate::error::AppError;
use crate::sql::QueryBuf;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

pub struct CrudService;

impl CrudService {
    pub async fn fetch_all<T>(pool: &PgPool, q: QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.fetch_all(pool).await?)
    }

    pub async fn fetch_optional<T>(pool: &PgPool, q: QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.fetch_optional(pool).await?)
    }

    /// For `INSERT ... RETURNING`: exactly one row comes back.
    pub async fn fetch_one<T>(pool: &PgPool, q: QueryBuf) -> Result<T, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.fetch_one(pool).await?)
    }

    /// Returns rows affected.
    pub async fn execute(pool: &PgPool, q: QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        Ok(query.execute(pool).await?.rows_affected())
    }
}

//! Apply the schema to the database: the article style enum, then articles, users, comments.
//! Every statement is idempotent so this runs on each startup.

use crate::error::AppError;
use crate::models::article::{ARTICLE_STYLES, STYLE_TYPE};
use sqlx::PgPool;

pub const ARTICLES_TABLE: &str = "blogful_articles";
pub const COMMENTS_TABLE: &str = "blogful_comments";
pub const USERS_TABLE: &str = "blogful_users";

fn style_type_ddl() -> String {
    let values: Vec<String> = ARTICLE_STYLES
        .iter()
        .map(|v| format!("'{}'", v.replace('\'', "''")))
        .collect();
    format!(
        "DO $$ BEGIN CREATE TYPE {} AS ENUM ({}); EXCEPTION WHEN duplicate_object THEN NULL; END $$",
        STYLE_TYPE,
        values.join(", ")
    )
}

/// Statements in dependency order: comments reference both articles and users.
pub fn schema_statements() -> Vec<String> {
    vec![
        style_type_ddl(),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {ARTICLES_TABLE} (
                id SERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                style {STYLE_TYPE} NOT NULL,
                date_published TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {USERS_TABLE} (
                id SERIAL PRIMARY KEY,
                fullname TEXT NOT NULL,
                username TEXT NOT NULL,
                nickname TEXT,
                password TEXT,
                date_created TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {COMMENTS_TABLE} (
                id SERIAL PRIMARY KEY,
                text TEXT NOT NULL,
                date_commented TIMESTAMPTZ NOT NULL DEFAULT now(),
                article_id INTEGER NOT NULL REFERENCES {ARTICLES_TABLE}(id) ON DELETE CASCADE,
                user_id INTEGER REFERENCES {USERS_TABLE}(id) ON DELETE SET NULL
            )
            "#
        ),
    ]
}

pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for sql in schema_statements() {
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!("schema up to date");
    Ok(())
}

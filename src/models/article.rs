use crate::error::AppError;
use crate::migration::ARTICLES_TABLE;
use crate::sanitize::clean;
use crate::service::validation::{text_field, Body, RequestValidator};
use crate::sql::{Column, SqlValue, Table};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Postgres enum backing `style`.
pub const STYLE_TYPE: &str = "article_category";
pub const ARTICLE_STYLES: &[&str] = &["Listicle", "How-to", "News", "Interview", "Story"];

pub static ARTICLES: Table = Table {
    name: ARTICLES_TABLE,
    columns: &[
        Column::plain("id"),
        Column::plain("title"),
        Column::plain("content"),
        Column::enumerated("style", STYLE_TYPE),
        Column::cast("date_published", "timestamptz"),
    ],
};

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub style: String,
    pub date_published: DateTime<Utc>,
}

impl Article {
    pub fn sanitized(&self) -> Article {
        Article {
            title: clean(&self.title),
            content: clean(&self.content),
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub style: String,
}

const REQUIRED: &[&str] = &["title", "content", "style"];

impl NewArticle {
    pub fn from_body(body: &Body) -> Result<Self, AppError> {
        RequestValidator::require(body, REQUIRED)?;
        let style = required_text(body, "style")?;
        RequestValidator::one_of("style", &style, ARTICLE_STYLES)?;
        Ok(NewArticle {
            title: required_text(body, "title")?,
            content: required_text(body, "content")?,
            style,
        })
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("title", self.title.as_str().into()),
            ("content", self.content.as_str().into()),
            ("style", self.style.as_str().into()),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub style: Option<String>,
    pub content: Option<String>,
}

const MUTABLE: &[&str] = &["title", "style", "content"];
pub const PATCH_MESSAGE: &str = "Request body must contain either 'title', 'style' or 'content'";

impl ArticlePatch {
    pub fn from_body(body: &Body) -> Result<Self, AppError> {
        RequestValidator::require_any(body, MUTABLE, PATCH_MESSAGE)?;
        let style = text_field(body, "style")?;
        if let Some(s) = &style {
            RequestValidator::one_of("style", s, ARTICLE_STYLES)?;
        }
        Ok(ArticlePatch {
            title: text_field(body, "title")?,
            style,
            content: text_field(body, "content")?,
        })
    }

    /// Only the supplied fields.
    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        [("title", &self.title), ("style", &self.style), ("content", &self.content)]
            .into_iter()
            .filter_map(|(k, v)| v.as_deref().map(|s| (k, s.into())))
            .collect()
    }
}

/// Text field already known to be truthy.
pub(crate) fn required_text(body: &Body, field: &str) -> Result<String, AppError> {
    text_field(body, field)?
        .ok_or_else(|| AppError::bad_request(format!("Missing '{}' in request body", field)))
}

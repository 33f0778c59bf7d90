use crate::error::AppError;
use crate::migration::COMMENTS_TABLE;
use crate::models::article::required_text;
use crate::sanitize::clean;
use crate::service::validation::{int_field, text_field, timestamp_field, Body, RequestValidator};
use crate::sql::{Column, SqlValue, Table};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub static COMMENTS: Table = Table {
    name: COMMENTS_TABLE,
    columns: &[
        Column::plain("id"),
        Column::plain("text"),
        Column::cast("date_commented", "timestamptz"),
        Column::plain("article_id"),
        Column::plain("user_id"),
    ],
};

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub date_commented: DateTime<Utc>,
    pub article_id: i32,
    /// Cleared when the author is deleted.
    pub user_id: Option<i32>,
}

impl Comment {
    pub fn sanitized(&self) -> Comment {
        Comment {
            text: clean(&self.text),
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewComment {
    pub text: String,
    pub article_id: i32,
    pub user_id: i32,
    /// Store default (now) when absent.
    pub date_commented: Option<String>,
}

const REQUIRED: &[&str] = &["text", "article_id", "user_id"];

impl NewComment {
    pub fn from_body(body: &Body) -> Result<Self, AppError> {
        RequestValidator::require(body, REQUIRED)?;
        Ok(NewComment {
            text: required_text(body, "text")?,
            article_id: required_int(body, "article_id")?,
            user_id: required_int(body, "user_id")?,
            date_commented: timestamp_field(body, "date_commented")?,
        })
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        let mut cols: Vec<(&'static str, SqlValue)> = vec![
            ("text", self.text.as_str().into()),
            ("article_id", self.article_id.into()),
            ("user_id", self.user_id.into()),
        ];
        if let Some(at) = &self.date_commented {
            cols.push(("date_commented", at.as_str().into()));
        }
        cols
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommentPatch {
    pub text: Option<String>,
    pub date_commented: Option<String>,
}

const MUTABLE: &[&str] = &["text", "date_commented"];
pub const PATCH_MESSAGE: &str = "Request body must contain either text or date_commented";

impl CommentPatch {
    pub fn from_body(body: &Body) -> Result<Self, AppError> {
        RequestValidator::require_any(body, MUTABLE, PATCH_MESSAGE)?;
        Ok(CommentPatch {
            text: text_field(body, "text")?,
            date_commented: timestamp_field(body, "date_commented")?,
        })
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        [("text", &self.text), ("date_commented", &self.date_commented)]
            .into_iter()
            .filter_map(|(k, v)| v.as_deref().map(|s| (k, s.into())))
            .collect()
    }
}

fn required_int(body: &Body, field: &str) -> Result<i32, AppError> {
    int_field(body, field)?.ok_or_else(|| AppError::bad_request(format!("Missing '{}' in request body", field)))
}

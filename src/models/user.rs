use crate::error::AppError;
use crate::migration::USERS_TABLE;
use crate::models::article::required_text;
use crate::sanitize::{clean, clean_opt};
use crate::service::validation::{text_field, Body, RequestValidator};
use crate::sql::{Column, SqlValue, Table};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub static USERS: Table = Table {
    name: USERS_TABLE,
    columns: &[
        Column::plain("id"),
        Column::plain("fullname"),
        Column::plain("username"),
        Column::plain("nickname"),
        Column::plain("password"),
        Column::cast("date_created", "timestamptz"),
    ],
};

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub fullname: String,
    pub username: String,
    pub nickname: Option<String>,
    /// bcrypt hash. Never serialized.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub date_created: DateTime<Utc>,
}

impl User {
    pub fn sanitized(&self) -> User {
        User {
            fullname: clean(&self.fullname),
            username: clean(&self.username),
            nickname: clean_opt(self.nickname.as_deref()),
            ..self.clone()
        }
    }
}

/// Incoming user. `password` is plain text here; the service hashes it before it is stored.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub fullname: String,
    pub username: String,
    pub nickname: Option<String>,
    pub password: Option<String>,
}

const REQUIRED: &[&str] = &["fullname", "username"];

impl NewUser {
    pub fn from_body(body: &Body) -> Result<Self, AppError> {
        RequestValidator::require(body, REQUIRED)?;
        Ok(NewUser {
            fullname: required_text(body, "fullname")?,
            username: required_text(body, "username")?,
            nickname: text_field(body, "nickname")?,
            password: text_field(body, "password")?,
        })
    }

    /// Columns to insert, given the already hashed password.
    pub fn columns(&self, password_hash: Option<String>) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("fullname", self.fullname.as_str().into()),
            ("username", self.username.as_str().into()),
            ("nickname", SqlValue::opt_text(self.nickname.as_deref())),
            ("password", SqlValue::opt_text(password_hash.as_deref())),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserPatch {
    pub fullname: Option<String>,
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub password: Option<String>,
}

const MUTABLE: &[&str] = &["fullname", "username", "nickname", "password"];
pub const PATCH_MESSAGE: &str = "Request body must contain either fullname, username, nickname, or password";

impl UserPatch {
    pub fn from_body(body: &Body) -> Result<Self, AppError> {
        RequestValidator::require_any(body, MUTABLE, PATCH_MESSAGE)?;
        Ok(UserPatch {
            fullname: text_field(body, "fullname")?,
            username: text_field(body, "username")?,
            nickname: text_field(body, "nickname")?,
            password: text_field(body, "password")?,
        })
    }

    /// Supplied columns, with `password` replaced by its hash.
    pub fn columns(&self, password_hash: Option<String>) -> Vec<(&'static str, SqlValue)> {
        let mut cols: Vec<(&'static str, SqlValue)> =
            [("fullname", &self.fullname), ("username", &self.username), ("nickname", &self.nickname)]
                .into_iter()
                .filter_map(|(k, v)| v.as_deref().map(|s| (k, s.into())))
                .collect();
        if let Some(hash) = password_hash {
            cols.push(("password", hash.into()));
        }
        cols
    }
}

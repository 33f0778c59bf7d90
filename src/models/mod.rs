//! Row types, request payloads and table definitions for articles, comments and users.

pub mod article;
pub mod comment;
pub mod user;

pub use article::{Article, ArticlePatch, NewArticle, ARTICLES};
pub use comment::{Comment, CommentPatch, NewComment, COMMENTS};
pub use user::{NewUser, User, UserPatch, USERS};

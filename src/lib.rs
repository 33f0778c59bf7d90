//! Blogful API: REST backend for articles, comments and users over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod sanitize;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppEnv, Config};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::app;
pub use service::{ArticlesService, CommentsService, CrudService, Resource, UsersService};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};

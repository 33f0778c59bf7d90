//! HTTP handlers for the entity routers and the application root.

pub mod common;
pub mod entity;

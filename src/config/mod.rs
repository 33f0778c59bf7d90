//! Runtime configuration from environment variables (optionally loaded from `.env`).

use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Runtime mode. Selects log verbosity and whether 500 responses expose the underlying error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnv {
    Production,
    Development,
    Test,
}

impl FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(AppEnv::Production),
            "development" | "dev" | "" => Ok(AppEnv::Development),
            "test" => Ok(AppEnv::Test),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub env: AppEnv,
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub db_max_connections: u32,
    /// Run CREATE DATABASE against the server's `postgres` database before connecting.
    pub db_create_if_missing: bool,
}

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/blogful";

impl Config {
    /// Read from the process environment. `APP_ENV` wins over `NODE_ENV`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = match get("APP_ENV").or_else(|| get("NODE_ENV")) {
            Some(v) => v.parse()?,
            None => AppEnv::Development,
        };
        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let host = parse_or("HOST", get("HOST"), IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or("PORT", get("PORT"), 8000)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5)?;
        let db_create_if_missing = parse_or("DB_CREATE_IF_MISSING", get("DB_CREATE_IF_MISSING"), false)?;
        Ok(Config {
            env,
            database_url,
            host,
            port,
            db_max_connections,
            db_create_if_missing,
        })
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnv::Production
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Tracing filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.env {
            AppEnv::Production => "blogful_api=info,tower_http=info",
            AppEnv::Development | AppEnv::Test => "blogful_api=debug,tower_http=debug",
        }
    }
}

fn parse_or<T: FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: v }),
    }
}

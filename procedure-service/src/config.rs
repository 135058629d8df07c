//! Process configuration, read once from the environment at startup.

use std::{collections::HashMap, str::FromStr, time::Duration};

use axum::http::{HeaderName, HeaderValue, Method, header};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.to_owned(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; takes precedence over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url)
                .map_err(|e| ConfigError::invalid("DATABASE_URL", "<redacted>", e));
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(self.ssl_mode))
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<Method>,
    pub allow_headers: Vec<HeaderName>,
    pub max_age: Duration,
}

impl CorsConfig {
    /// Explicit origins are allowed with credentials; a `*` entry opens the
    /// API to any origin without credentials.
    pub fn layer(&self) -> Result<CorsLayer, ConfigError> {
        let layer = CorsLayer::new()
            .allow_methods(AllowMethods::list(self.allow_methods.clone()))
            .allow_headers(AllowHeaders::list(self.allow_headers.clone()))
            .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
            .max_age(self.max_age);

        if self.allow_origins.iter().any(|o| o == "*") {
            return Ok(layer.allow_origin(AllowOrigin::any()));
        }

        let origins = self
            .allow_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|e| ConfigError::invalid("CORS_ALLOW_ORIGINS", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true))
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            host: get("DB_HOST", "localhost"),
            port: parse("DB_PORT", &get("DB_PORT", "5432"))?,
            user: get("POSTGRES_USER", "quest"),
            password: get("POSTGRES_PASSWORD", "quest"),
            name: get("POSTGRES_DB", "quest"),
            ssl_mode: parse("DB_SSLMODE", &get("DB_SSLMODE", "disable"))?,
            max_connections: parse("DB_MAX_CONNECTIONS", &get("DB_MAX_CONNECTIONS", "5"))?,
        };

        let cors = CorsConfig {
            allow_origins: split_list(&get(
                "CORS_ALLOW_ORIGINS",
                "http://localhost:5173,http://localhost:3000",
            )),
            allow_methods: split_list(&get("CORS_ALLOW_METHODS", "GET,POST,PUT,DELETE,OPTIONS"))
                .iter()
                .map(|m| parse::<Method>("CORS_ALLOW_METHODS", m))
                .collect::<Result<_, _>>()?,
            allow_headers: split_list(&get(
                "CORS_ALLOW_HEADERS",
                "Origin,Content-Type,Accept,Authorization",
            ))
            .iter()
            .map(|h| parse::<HeaderName>("CORS_ALLOW_HEADERS", h))
            .collect::<Result<_, _>>()?,
            max_age: Duration::from_secs(parse("CORS_MAX_AGE", &get("CORS_MAX_AGE", "3600"))?),
        };

        Ok(Self {
            server_port: parse("SERVER_PORT", &get("SERVER_PORT", "8000"))?,
            database,
            cors,
        })
    }

    /// Convenience for tests and tooling that hold variables in a map.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(key, value, e))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

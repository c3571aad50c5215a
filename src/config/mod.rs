//! Service configuration read from the process environment.
//!
//! `DATABASE_URL` wins when set; otherwise the URL is assembled from the `DB_*` parts.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which `BookStore` implementation backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(ConfigError::UnknownStore(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = get("DB_HOST").unwrap_or_else(|| "localhost".into());
                let port: u16 = parse_var("DB_PORT", get("DB_PORT"), 5432)?;
                let user = get("DB_USERNAME").unwrap_or_else(|| "postgres".into());
                let password = get("DB_PASSWORD").unwrap_or_default();
                let database = get("DB_DATABASE").unwrap_or_else(|| "books".into());
                if password.is_empty() {
                    format!("postgres://{}@{}:{}/{}?sslmode=disable", user, host, port, database)
                } else {
                    format!(
                        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
                        user, password, host, port, database
                    )
                }
            }
        };

        let max_connections = parse_var("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?;
        let bind_addr = parse_var(
            "BIND_ADDR",
            get("BIND_ADDR"),
            SocketAddr::from(([127, 0, 0, 1], 5000)),
        )?;
        let store = match get("BOOKS_STORE") {
            Some(s) => s.parse()?,
            None => StoreKind::Postgres,
        };

        Ok(Config {
            database_url,
            max_connections,
            bind_addr,
            store,
        })
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value: v,
        }),
    }
}

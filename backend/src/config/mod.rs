//! Central module for application-wide configuration settings.
//!
//! Settings come from the process environment (optionally seeded from a
//! `.env` file by `main`). Parsing goes through a lookup closure so the rules
//! can be exercised without mutating the real environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::Duration;
use folio_adapters::MongoConnection;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DATABASE: &str = "portfolio";
pub const DEFAULT_COLLECTION: &str = "users";
/// Fits a maximal submission even when every character is JSON-escaped.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    Mongo(MongoSettings),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl From<MongoSettings> for MongoConnection {
    fn from(settings: MongoSettings) -> Self {
        MongoConnection {
            uri: settings.uri,
            database: settings.database,
            collection: settings.collection,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub storage: StorageConfig,
    /// When set, repeat submissions from one email inside the window are refused.
    pub duplicate_window: Option<Duration>,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            storage: StorageConfig::Memory,
            duplicate_window: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Config::default();

        let host = match get("HOST") {
            Some(value) => parse("HOST", value)?,
            None => defaults.host,
        };
        let port = match get("PORT") {
            Some(value) => parse("PORT", value)?,
            None => defaults.port,
        };
        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(value) => parse("MAX_BODY_BYTES", value)?,
            None => defaults.max_body_bytes,
        };

        let duplicate_window = match get("DUPLICATE_WINDOW_HOURS") {
            Some(value) => {
                let hours: i64 = parse("DUPLICATE_WINDOW_HOURS", value.clone())?;
                if hours <= 0 {
                    return Err(ConfigError::Invalid {
                        key: "DUPLICATE_WINDOW_HOURS",
                        value,
                    });
                }
                Some(Duration::hours(hours))
            }
            None => None,
        };

        let mongo = |uri: String| {
            StorageConfig::Mongo(MongoSettings {
                uri,
                database: get("DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
                collection: get("COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            })
        };
        let mongo_uri = get("MONGO_URI");
        let backend = get("STORAGE_BACKEND").map(|value| value.trim().to_lowercase());
        let storage = match backend.as_deref() {
            Some("memory") => StorageConfig::Memory,
            Some("mongo" | "mongodb") => {
                mongo(mongo_uri.ok_or(ConfigError::Missing("MONGO_URI"))?)
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
            None => mongo_uri.map_or(StorageConfig::Memory, mongo),
        };

        Ok(Self {
            host,
            port,
            storage,
            duplicate_window,
            max_body_bytes,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

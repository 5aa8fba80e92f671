use std::net::SocketAddr;

use thiserror::Error;
use utils_trace::{LogFormat, ParseLogFormatError};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MOUNT_PATH: &str = "/api/bookmarks";
pub const DEFAULT_DB_POOL_SIZE: u32 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub listen_addr: SocketAddr,
    pub mount_path: String,
    pub db_pool_size: u32,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("InvalidListenAddr: '{value}': {source}")]
    InvalidListenAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("InvalidMountPath: '{value}' must start with '/'")]
    InvalidMountPath { value: String },
    #[error("InvalidPoolSize: '{value}' must be a positive integer")]
    InvalidPoolSize { value: String },
    #[error("DotEnv: {source}")]
    DotEnv {
        #[from]
        source: dotenvy::Error,
    },
    #[error("InvalidLogFormat: {source}")]
    InvalidLogFormat {
        #[from]
        source: ParseLogFormatError,
    },
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv_loaded(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen_addr = get("BOOKMARKS_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListenAddr { value: listen_addr.clone(), source })?;

        let mount_path = get("BOOKMARKS_MOUNT_PATH").unwrap_or_else(|| DEFAULT_MOUNT_PATH.to_owned());
        if !mount_path.starts_with('/') {
            return Err(ConfigError::InvalidMountPath { value: mount_path });
        }

        let db_pool_size = match get("BOOKMARKS_DB_POOL_SIZE") {
            Some(value) => match value.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidPoolSize { value }),
            },
            None => DEFAULT_DB_POOL_SIZE,
        };

        let log_format = match get("BOOKMARKS_LOG_FORMAT") {
            Some(value) => value.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        Ok(Config {
            database_url: get("DATABASE_URL"),
            listen_addr,
            mount_path,
            db_pool_size,
            log_level: get("BOOKMARKS_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
            log_format,
        })
    }
}

/// A missing `.env` file is fine; an unreadable or malformed one is not.
fn dotenv_loaded<T>(result: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(source) => Err(ConfigError::DotEnv { source }),
    }
}

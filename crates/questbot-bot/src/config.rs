//! Bot configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use questbot_store::{ConnectTarget, DatabaseSettings};

use crate::error::AppError;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_POOL_MIN: u32 = 10;
const DEFAULT_POOL_MAX: u32 = 200;
const DEFAULT_UPLOADS_DIR: &str = "./uploads";

/// Lowercase names used by older `.env` files, read when the `DB_*` name is unset.
const LEGACY_DB_KEYS: [(&str, &str); 5] = [
    ("DB_NAME", "db_name"),
    ("DB_USER", "user"),
    ("DB_PASSWORD", "password"),
    ("DB_HOST", "host"),
    ("DB_PORT", "port"),
];

/// Everything the bot needs to start.
#[derive(Clone)]
pub struct BotConfig {
    /// Bot API token.
    pub token: String,
    /// Database connection and pool limits.
    pub database: DatabaseSettings,
    /// Directory holding quest pictures.
    pub uploads_dir: PathBuf,
    /// Log destination; stdout when unset.
    pub log_file: Option<PathBuf>,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("database", &self.database)
            .field("uploads_dir", &self.uploads_dir)
            .field("log_file", &self.log_file)
            .finish_non_exhaustive()
    }
}

impl BotConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`BotConfig::from_lookup`].
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Blank values count as unset.
    ///
    /// `DATABASE_URL` wins over the individual `DB_*` variables. Each `DB_*`
    /// variable falls back to its lowercase legacy name (`db_name`, `user`,
    /// `password`, `host`, `port`).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing, a
    /// number does not parse, or `DB_POOL_MIN` exceeds `DB_POOL_MAX`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| AppError::Config(format!("{key} must be set")));
        let db_var = |key: &str| {
            get(key).or_else(|| {
                LEGACY_DB_KEYS
                    .iter()
                    .find(|(current, _)| *current == key)
                    .and_then(|(_, legacy)| get(legacy))
            })
        };
        let require_db = |key: &str| db_var(key).ok_or_else(|| AppError::Config(format!("{key} must be set")));

        let token = require("TELEGRAM_BOT_TOKEN")?;

        let target = match get("DATABASE_URL") {
            Some(url) => ConnectTarget::Url(url),
            None => ConnectTarget::Parts {
                database: require_db("DB_NAME")?,
                user: require_db("DB_USER")?,
                password: db_var("DB_PASSWORD").unwrap_or_default(),
                host: db_var("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_owned()),
                port: parse_or(db_var("DB_PORT"), "DB_PORT", DEFAULT_DB_PORT)?,
            },
        };

        let min_connections = parse_or(get("DB_POOL_MIN"), "DB_POOL_MIN", DEFAULT_POOL_MIN)?;
        let max_connections = parse_or(get("DB_POOL_MAX"), "DB_POOL_MAX", DEFAULT_POOL_MAX)?;
        if min_connections > max_connections {
            return Err(AppError::Config(format!(
                "DB_POOL_MIN ({min_connections}) must not exceed DB_POOL_MAX ({max_connections})"
            )));
        }

        Ok(Self {
            token,
            database: DatabaseSettings {
                target,
                min_connections,
                max_connections,
            },
            uploads_dir: get("UPLOADS_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR), PathBuf::from),
            log_file: get("LOG_FILE").map(PathBuf::from),
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
        None => Ok(default),
    }
}

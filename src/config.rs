use std::path::PathBuf;

use crate::errors::{CmsError, Result};

pub const DATABASE_VAR: &str = "ROSTER_DATABASE";
pub const LOG_VAR: &str = "ROSTER_LOG";

const DEFAULT_DATABASE: &str = "roster.db";
const DEFAULT_LOG: &str = "warn";

/// Runtime configuration for a roster session.
///
/// Everything comes from the process environment; a `.env` file in the
/// working directory is loaded first so local setups don't need exports.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: PathBuf,
    /// Default tracing filter, used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Config {
    /// Load configuration from `.env` and the environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup(DATABASE_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(CmsError::Config(format!("{} is set but empty", DATABASE_VAR)));
            }
            Some(value) => PathBuf::from(value),
            None => PathBuf::from(DEFAULT_DATABASE),
        };

        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG.to_string());

        Ok(Self {
            database,
            log_filter,
        })
    }
}

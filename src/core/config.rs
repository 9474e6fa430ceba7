//! Environment-driven configuration.
//!
//! All knobs come from environment variables with development defaults,
//! resolved once at startup and passed down explicitly.

use crate::error::{Result, StatsError};
use std::path::PathBuf;

/// Database path override.
pub const DB_PATH_ENV_VAR: &str = "MLB_STATS_DB";
/// Base URL of the MLB statistics API.
pub const MLB_API_URL_ENV_VAR: &str = "MLB_STATS_API_URL";
/// Shared-secret bearer token accepted by the auth gate.
pub const API_TOKEN_ENV_VAR: &str = "MLB_STATS_API_TOKEN";
/// Base URL of the Statcast API.
pub const STATCAST_API_URL_ENV_VAR: &str = "STATCAST_API_URL";
/// Statcast bearer key; Statcast calls fail without it.
pub const STATCAST_API_KEY_ENV_VAR: &str = "STATCAST_API_KEY";

pub const DEFAULT_MLB_API_URL: &str = "https://statsapi.mlb.com/api/v1";
pub const DEFAULT_STATCAST_API_URL: &str = "https://api.statcast.com/v1";

/// Development-only shared secret, mirrored by the token gate.
pub const DEV_TOKEN: &str = "dev-token";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub mlb_api_url: String,
    pub api_token: String,
    pub statcast_api_url: String,
    pub statcast_api_key: Option<String>,
}

impl Config {
    /// Read configuration from the environment, applying defaults.
    pub fn from_env() -> Result<Self> {
        let database_path = match std::env::var(DB_PATH_ENV_VAR) {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_database_path()?,
        };

        Ok(Self {
            database_path,
            mlb_api_url: std::env::var(MLB_API_URL_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_MLB_API_URL.to_string()),
            api_token: std::env::var(API_TOKEN_ENV_VAR).unwrap_or_else(|_| DEV_TOKEN.to_string()),
            statcast_api_url: std::env::var(STATCAST_API_URL_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_STATCAST_API_URL.to_string()),
            statcast_api_key: std::env::var(STATCAST_API_KEY_ENV_VAR).ok(),
        })
    }
}

/// Path: `<cache dir>/mlb-stats/stats.db`
fn default_database_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir().ok_or_else(|| StatsError::Config {
        message: "Could not determine cache directory".to_string(),
    })?;
    Ok(cache_dir.join("mlb-stats").join("stats.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Env mutation is process-wide; only clear vars other tests don't set.
        std::env::remove_var(MLB_API_URL_ENV_VAR);
        std::env::remove_var(API_TOKEN_ENV_VAR);

        let config = Config::from_env().unwrap();
        assert_eq!(config.mlb_api_url, DEFAULT_MLB_API_URL);
        assert_eq!(config.api_token, DEV_TOKEN);
        assert_eq!(config.statcast_api_url, DEFAULT_STATCAST_API_URL);
    }

    #[test]
    fn test_db_path_override() {
        std::env::set_var(DB_PATH_ENV_VAR, "/tmp/override.db");
        let config = Config::from_env().unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/override.db"));
        std::env::remove_var(DB_PATH_ENV_VAR);
    }
}

//! Library-level API contract: the response envelope, the error-to-status
//! mapping, the bearer-token gate, and query-string parsing.
//!
//! These pieces define the external shape of the service without binding
//! the crate to a particular HTTP framework; the CLI commands and any
//! embedding server share them.

use crate::cli::types::{PlayerId, Season, StatType};
use crate::core::Config;
use crate::error::{Result, StatsError};
use crate::query::StatsQuery;
use crate::storage::{StatsDatabase, ThresholdSet, User};
use serde::Serialize;
use std::str::FromStr;

/// Username the shared-secret token resolves to.
pub const ADMIN_USERNAME: &str = "admin";

/// Uniform response envelope: `{"success": true, "data": ...}` on success,
/// `{"success": false, "error": "..."}` on failure.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status code an embedding server should answer with for an error.
pub fn http_status(err: &StatsError) -> u16 {
    match err {
        StatsError::PlayerNotFound { .. } | StatsError::TeamNotFound { .. } => 404,
        StatsError::Validation { .. } => 400,
        StatsError::InvalidToken => 401,
        _ => 500,
    }
}

/// Extract the credential from an `Authorization: Bearer <token>` value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").map(str::trim)
}

/// Shared-secret gate. Accepts exactly the configured token and resolves
/// it to the admin user; anything else is `InvalidToken`.
pub fn verify_token(config: &Config, db: &StatsDatabase, token: Option<&str>) -> Result<User> {
    let token = token.ok_or(StatsError::InvalidToken)?;
    if token != config.api_token {
        return Err(StatsError::InvalidToken);
    }
    db.user_by_username(ADMIN_USERNAME)?
        .ok_or(StatsError::InvalidToken)
}

/// Build a [`StatsQuery`] from decoded query-string pairs.
///
/// Unrecognized parameter names are ignored; a recognized parameter with
/// an unparseable value is a validation error.
pub fn parse_stats_query(stat_type: StatType, pairs: &[(String, String)]) -> Result<StatsQuery> {
    let mut query = StatsQuery {
        stat_type,
        ..Default::default()
    };
    let t = &mut query.thresholds;

    for (key, value) in pairs {
        match key.as_str() {
            "season" => query.season = Some(Season::from_str(value)?),
            "team" => query.team = Some(value.to_uppercase()),
            "player_id" => query.player_id = Some(PlayerId::new(parse_num(key, value)?)),
            "min_games" => t.min_games = Some(parse_num(key, value)?),
            "min_at_bats" => t.min_at_bats = Some(parse_num(key, value)?),
            "min_hits" => t.min_hits = Some(parse_num(key, value)?),
            "min_home_runs" => t.min_home_runs = Some(parse_num(key, value)?),
            "min_innings" => t.min_innings = Some(parse_num(key, value)?),
            "min_strikeouts" => t.min_strikeouts = Some(parse_num(key, value)?),
            _ => {}
        }
    }
    Ok(query)
}

fn parse_num<N: FromStr>(key: &str, value: &str) -> Result<N> {
    value
        .parse()
        .map_err(|_| StatsError::validation(format!("invalid value for {}: {}", key, value)))
}

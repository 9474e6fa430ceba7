//! Error types for the MLB statistics service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse numeric value: {0}")]
    ParseNumber(#[from] std::num::ParseIntError),

    #[error("Malformed stat value {value:?} for field {field}")]
    ParseStat { field: &'static str, value: String },

    #[error("Player not found: {id}")]
    PlayerNotFound { id: i64 },

    #[error("Team not found: {abbreviation}")]
    TeamNotFound { abbreviation: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Invalid token")]
    InvalidToken,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl StatsError {
    /// Shorthand for a 400-style validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        StatsError::Validation {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for StatsError {
    fn from(err: anyhow::Error) -> Self {
        StatsError::Storage {
            message: err.to_string(),
        }
    }
}

//! Type-safe wrappers and enums for MLB statistics data.

use crate::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for MLB player IDs.
///
/// Player ids match the external provider's identifiers when a player is
/// sourced from the MLB API, so they are never allocated locally.
///
/// # Examples
///
/// ```rust
/// use mlb_stats::PlayerId;
///
/// let player_id = PlayerId::new(545361);
/// assert_eq!(player_id.as_i64(), 545361);
/// assert_eq!(player_id.to_string(), "545361");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl PlayerId {
    /// Create a new PlayerId from an i64 value.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for team IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub i64);

impl TeamId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for season years (four-digit annual periods)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse::<u16>().map_err(|_| {
            StatsError::validation(format!("invalid season: {}", s))
        })?))
    }
}

/// Selects which stats table and external grouping a query targets.
///
/// The MLB API calls batting stats "hitting", so the provider group name
/// differs from the local table name.
///
/// # Examples
///
/// ```rust
/// use mlb_stats::StatType;
///
/// assert_eq!(StatType::Batting.group_name(), "hitting");
/// assert_eq!(StatType::Pitching.group_name(), "pitching");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    /// Batting (hitting) statistics
    Batting,
    /// Pitching statistics
    Pitching,
}

impl StatType {
    /// The `group` parameter value the external provider expects.
    pub fn group_name(&self) -> &'static str {
        match self {
            StatType::Batting => "hitting",
            StatType::Pitching => "pitching",
        }
    }

    /// Local stats table for this stat type.
    pub fn table_name(&self) -> &'static str {
        match self {
            StatType::Batting => "batting_stats",
            StatType::Pitching => "pitching_stats",
        }
    }
}

impl Default for StatType {
    fn default() -> Self {
        StatType::Batting
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Batting => write!(f, "batting"),
            StatType::Pitching => write!(f, "pitching"),
        }
    }
}

impl FromStr for StatType {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "batting" | "hitting" => Ok(StatType::Batting),
            "pitching" => Ok(StatType::Pitching),
            _ => Err(StatsError::validation(format!(
                "unknown stat type: {} (expected batting or pitching)",
                s
            ))),
        }
    }
}

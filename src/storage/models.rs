//! Data models for the storage layer

use crate::cli::types::{PlayerId, Season, TeamId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A major-league team. The 3-letter abbreviation is the external-facing
/// identifier used for filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "id")]
    pub team_id: TeamId,
    pub name: String,
    pub abbreviation: String,
}

/// Player row. `player_id` equals the provider identifier when the player
/// was sourced externally; `team_id` is nullable (unaffiliated players).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Option<String>,
    pub team_id: Option<TeamId>,
}

/// External-facing player shape: team resolved to its abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
}

/// Game row, kept as join context only; never written by the sync path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "id")]
    pub game_id: i64,
    pub date: NaiveDate,
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
}

/// Season-aggregate batting line for one (player, season).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingStats {
    pub player_id: PlayerId,
    pub season: Season,
    pub games: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub runs: u32,
    pub rbis: u32,
    pub home_runs: u32,
    pub batting_average: f64,
    pub exit_velocity: Option<f64>,
    pub launch_angle: Option<f64>,
    #[serde(skip_serializing, default)]
    pub created_at: u64,
    #[serde(skip_serializing, default)]
    pub updated_at: u64,
}

impl BattingStats {
    /// Zeroed line for a key; sync fills in whatever the provider sent.
    pub fn empty(player_id: PlayerId, season: Season) -> Self {
        Self {
            player_id,
            season,
            games: 0,
            at_bats: 0,
            hits: 0,
            runs: 0,
            rbis: 0,
            home_runs: 0,
            batting_average: 0.0,
            exit_velocity: None,
            launch_angle: None,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Season-aggregate pitching line for one (player, season).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchingStats {
    pub player_id: PlayerId,
    pub season: Season,
    pub games: u32,
    pub innings_pitched: f64,
    pub hits_allowed: u32,
    pub runs_allowed: u32,
    pub earned_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub era: f64,
    pub velocity: Option<f64>,
    pub spin_rate: Option<f64>,
    #[serde(skip_serializing, default)]
    pub created_at: u64,
    #[serde(skip_serializing, default)]
    pub updated_at: u64,
}

impl PitchingStats {
    pub fn empty(player_id: PlayerId, season: Season) -> Self {
        Self {
            player_id,
            season,
            games: 0,
            innings_pitched: 0.0,
            hits_allowed: 0,
            runs_allowed: 0,
            earned_runs: 0,
            walks: 0,
            strikeouts: 0,
            era: 0.0,
            velocity: None,
            spin_rate: None,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Either kind of stats line, for callers that select the table at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatLine {
    Batting(BattingStats),
    Pitching(PitchingStats),
}

impl StatLine {
    pub fn season(&self) -> Season {
        match self {
            StatLine::Batting(s) => s.season,
            StatLine::Pitching(s) => s.season,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        match self {
            StatLine::Batting(s) => s.player_id,
            StatLine::Pitching(s) => s.player_id,
        }
    }
}

/// One stats query result: the player merged with their stat line, shaped
/// like the API response rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    #[serde(flatten)]
    pub player: PlayerSummary,
    #[serde(flatten)]
    pub stats: StatLine,
}

/// Credential record consumed by the bearer-token gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "id")]
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
}

//! Typed schemas for MLB API payloads.
//!
//! The provider encodes rate stats (`avg`, `era`, `inningsPitched`) as
//! strings like `".312"`, so those fields go through a flexible
//! string-or-number deserializer instead of trusting the shape ad hoc.
//! Anything that fails to parse here is a decode error at the boundary,
//! never a bad row in the database.

use crate::cli::types::PlayerId;
use serde::{de::Error, Deserialize, Deserializer, Serialize};


fn de_opt_f64_flexible<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match Option::<NumOrStr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumOrStr::Num(v)) => Ok(Some(v)),
        Some(NumOrStr::Str(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("malformed numeric stat: {:?}", s))),
    }
}

/// Envelope for `GET /stats`: `{ stats: [ { splits: [ { stat: {...} } ] } ] }`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatsEnvelope {
    #[serde(default)]
    pub stats: Vec<StatGroup>,
}

impl StatsEnvelope {
    /// The first split's stat line, if the provider returned any.
    pub fn first_stat_line(&self) -> Option<&RawStatLine> {
        self.stats
            .first()
            .and_then(|group| group.splits.first())
            .map(|split| &split.stat)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatGroup {
    #[serde(default)]
    pub splits: Vec<StatSplit>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatSplit {
    #[serde(default)]
    pub stat: RawStatLine,
}

/// One season-aggregate stat line as the provider names its fields.
///
/// Counting fields missing from the payload default to zero downstream;
/// advanced fields stay unset when absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawStatLine {
    pub games_played: Option<u32>,
    // Batting
    pub at_bats: Option<u32>,
    pub hits: Option<u32>,
    pub runs: Option<u32>,
    pub rbi: Option<u32>,
    pub home_runs: Option<u32>,
    #[serde(deserialize_with = "de_opt_f64_flexible")]
    pub avg: Option<f64>,
    // Pitching
    #[serde(deserialize_with = "de_opt_f64_flexible")]
    pub innings_pitched: Option<f64>,
    pub earned_runs: Option<u32>,
    pub base_on_balls: Option<u32>,
    pub strike_outs: Option<u32>,
    #[serde(deserialize_with = "de_opt_f64_flexible")]
    pub era: Option<f64>,
    // Advanced (Statcast-derived), only sometimes present
    pub exit_velocity: Option<f64>,
    pub launch_angle: Option<f64>,
    pub velocity: Option<f64>,
    pub spin_rate: Option<f64>,
}

/// Envelope for `GET /search?query=..&type=player`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchEnvelope {
    #[serde(rename = "searchResults", default)]
    pub search_results: Vec<PlayerSearchResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerSearchResult {
    pub id: PlayerId,
    pub name: String,
    #[serde(rename = "currentTeam", default)]
    pub current_team: Option<NamedRef>,
    #[serde(rename = "primaryPosition", default)]
    pub primary_position: Option<PositionRef>,
}

impl PlayerSearchResult {
    pub fn team_name(&self) -> Option<&str> {
        self.current_team.as_ref().map(|t| t.name.as_str())
    }

    pub fn position_code(&self) -> Option<&str> {
        self.primary_position.as_ref().map(|p| p.abbreviation.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PositionRef {
    pub abbreviation: String,
}

/// Envelope for `GET /teams/{teamId}/roster`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RosterEnvelope {
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterEntry {
    pub person: RosterPerson,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterPerson {
    pub id: PlayerId,
    #[serde(alias = "fullName")]
    pub name: String,
}

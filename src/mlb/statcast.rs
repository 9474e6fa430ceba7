//! Secondary Statcast provider.
//!
//! Statcast serves advanced-metric leaderboards (exit velocity, spin rate)
//! behind bearer auth, keyed by season or an explicit date range. It feeds
//! the same local row shapes as the primary provider but is only consulted
//! through explicit commands, never by the query fallback path.

use crate::cli::types::{PlayerId, Season, StatType, TeamId};
use crate::core::config::Config;
use crate::error::{Result, StatsError};
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters for a Statcast leaderboard fetch.
#[derive(Debug, Clone, Default)]
pub struct StatcastQuery {
    pub season: Option<Season>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub team_ids: Vec<TeamId>,
    pub player_ids: Vec<PlayerId>,
}

impl StatcastQuery {
    /// A query must bound its period: either a season or a full date range.
    pub fn validate(&self) -> Result<()> {
        if self.season.is_none() && (self.start_date.is_none() || self.end_date.is_none()) {
            return Err(StatsError::validation(
                "either season or both start_date and end_date are required",
            ));
        }
        Ok(())
    }
}

/// One leaderboard row as Statcast returns it (already snake_case).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StatcastRow {
    pub player_id: i64,
    pub player_name: String,
    pub team: Option<String>,
    pub games: Option<u32>,
    // Batting
    pub at_bats: Option<u32>,
    pub hits: Option<u32>,
    pub runs: Option<u32>,
    pub rbis: Option<u32>,
    pub home_runs: Option<u32>,
    pub batting_average: Option<f64>,
    pub exit_velocity: Option<f64>,
    pub launch_angle: Option<f64>,
    // Pitching
    pub innings_pitched: Option<f64>,
    pub hits_allowed: Option<u32>,
    pub runs_allowed: Option<u32>,
    pub earned_runs: Option<u32>,
    pub walks: Option<u32>,
    pub strikeouts: Option<u32>,
    pub era: Option<f64>,
    pub velocity: Option<f64>,
    pub spin_rate: Option<f64>,
}

/// Bearer-authenticated client for the Statcast API.
#[derive(Debug, Clone)]
pub struct StatcastClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StatcastClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.statcast_api_key.clone().ok_or_else(|| StatsError::Config {
            message: format!(
                "{} must be set to query Statcast",
                crate::core::config::STATCAST_API_KEY_ENV_VAR
            ),
        })?;
        Self::new(config.statcast_api_url.clone(), api_key)
    }

    /// Fetch a batting or pitching leaderboard for the given period.
    pub async fn leaderboard(
        &self,
        stat_type: StatType,
        query: &StatcastQuery,
    ) -> Result<Vec<StatcastRow>> {
        query.validate()?;

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(season) = query.season {
            params.push(("season", season.to_string()));
        }
        if let Some(start) = query.start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = query.end_date {
            params.push(("end_date", end.to_string()));
        }
        if !query.team_ids.is_empty() {
            params.push(("team_ids", join_ids(query.team_ids.iter().map(|t| t.as_i64()))));
        }
        if !query.player_ids.is_empty() {
            params.push((
                "player_ids",
                join_ids(query.player_ids.iter().map(|p| p.as_i64())),
            ));
        }

        let endpoint = match stat_type {
            StatType::Batting => "batting",
            StatType::Pitching => "pitching",
        };
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);

        let rows = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<StatcastRow>>()
            .await?;

        Ok(rows)
    }
}

fn join_ids(ids: impl Iterator<Item = i64>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

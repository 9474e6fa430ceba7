//! HTTP client for the MLB statistics API.

use crate::cli::types::{PlayerId, Season, StatType, TeamId};
use crate::core::config::Config;
use crate::error::Result;
use crate::mlb::types::{PlayerSearchResult, RosterEntry, RosterEnvelope, SearchEnvelope, StatsEnvelope};
use crate::mlb::StatsProvider;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// The upstream API has no SLA; a hung call would otherwise block the
/// triggering request indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the MLB stats API (`https://statsapi.mlb.com/api/v1`).
#[derive(Debug, Clone)]
pub struct MlbClient {
    client: Client,
    base_url: String,
}

impl MlbClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.mlb_api_url.clone())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

#[async_trait]
impl StatsProvider for MlbClient {
    async fn player_stats(
        &self,
        player_id: PlayerId,
        season: Season,
        stat_type: StatType,
    ) -> Result<StatsEnvelope> {
        let params = [
            ("stats", "regularSeason".to_string()),
            ("group", stat_type.group_name().to_string()),
            ("playerId", player_id.to_string()),
            ("season", season.to_string()),
        ];

        let envelope = self
            .client
            .get(self.url("stats"))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<StatsEnvelope>()
            .await?;

        Ok(envelope)
    }

    async fn search_players(&self, query: &str) -> Result<Vec<PlayerSearchResult>> {
        let params = [("query", query), ("type", "player")];

        let envelope = self
            .client
            .get(self.url("search"))
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<SearchEnvelope>()
            .await?;

        Ok(envelope.search_results)
    }

    async fn team_roster(&self, team_id: TeamId) -> Result<Vec<RosterEntry>> {
        let envelope = self
            .client
            .get(self.url(&format!("teams/{}/roster", team_id)))
            .send()
            .await?
            .error_for_status()?
            .json::<RosterEnvelope>()
            .await?;

        Ok(envelope.roster)
    }
}

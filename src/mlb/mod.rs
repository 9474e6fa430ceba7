//! External MLB statistics provider.
//!
//! The [`StatsProvider`] trait is the seam between the query/sync layers and
//! the network: production code talks to the real API through [`MlbClient`],
//! tests inject [`mock::MockProvider`].

pub mod http;
pub mod statcast;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

use crate::cli::types::{PlayerId, Season, StatType, TeamId};
use crate::error::Result;
use async_trait::async_trait;
use types::{PlayerSearchResult, RosterEntry, StatsEnvelope};

pub use http::MlbClient;
pub use statcast::StatcastClient;

/// Read-only access to the third-party statistics API.
///
/// All methods surface transport and decode failures as errors; there are no
/// implicit retries at this layer.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Season-aggregate stats for one player.
    async fn player_stats(
        &self,
        player_id: PlayerId,
        season: Season,
        stat_type: StatType,
    ) -> Result<StatsEnvelope>;

    /// Free-text player search.
    async fn search_players(&self, query: &str) -> Result<Vec<PlayerSearchResult>>;

    /// Current roster for a team.
    async fn team_roster(&self, team_id: TeamId) -> Result<Vec<RosterEntry>>;
}

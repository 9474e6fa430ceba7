//! Canned [`StatsProvider`] implementation for tests.
//!
//! Returns preloaded payloads and counts calls per endpoint so tests can
//! assert things like "the fallback synced exactly once".

use crate::cli::types::{PlayerId, Season, StatType, TeamId};
use crate::error::{Result, StatsError};
use crate::mlb::types::{
    PlayerSearchResult, RawStatLine, RosterEntry, StatGroup, StatSplit, StatsEnvelope,
};
use crate::mlb::StatsProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Wrap a single stat line in the provider's envelope nesting.
pub fn envelope_with_line(line: RawStatLine) -> StatsEnvelope {
    StatsEnvelope {
        stats: vec![StatGroup {
            splits: vec![StatSplit { stat: line }],
        }],
    }
}

#[derive(Default)]
pub struct MockProvider {
    stat_lines: Mutex<HashMap<(i64, u16, StatType), RawStatLine>>,
    search_results: Mutex<Vec<PlayerSearchResult>>,
    rosters: Mutex<HashMap<i64, Vec<RosterEntry>>>,
    fail_all: bool,
    pub player_stats_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub roster_calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every call fails, for exercising swallow paths.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn with_stat_line(
        self,
        player_id: PlayerId,
        season: Season,
        stat_type: StatType,
        line: RawStatLine,
    ) -> Self {
        self.stat_lines
            .lock()
            .unwrap()
            .insert((player_id.as_i64(), season.as_u16(), stat_type), line);
        self
    }

    pub fn with_search_result(self, result: PlayerSearchResult) -> Self {
        self.search_results.lock().unwrap().push(result);
        self
    }

    pub fn with_roster(self, team_id: TeamId, entries: Vec<RosterEntry>) -> Self {
        self.rosters.lock().unwrap().insert(team_id.as_i64(), entries);
        self
    }

    fn transport_error() -> StatsError {
        StatsError::Storage {
            message: "mock transport failure".to_string(),
        }
    }
}

#[async_trait]
impl StatsProvider for MockProvider {
    async fn player_stats(
        &self,
        player_id: PlayerId,
        season: Season,
        stat_type: StatType,
    ) -> Result<StatsEnvelope> {
        self.player_stats_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(Self::transport_error());
        }

        let lines = self.stat_lines.lock().unwrap();
        Ok(lines
            .get(&(player_id.as_i64(), season.as_u16(), stat_type))
            .cloned()
            .map(envelope_with_line)
            .unwrap_or_default())
    }

    async fn search_players(&self, _query: &str) -> Result<Vec<PlayerSearchResult>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(Self::transport_error());
        }
        Ok(self.search_results.lock().unwrap().clone())
    }

    async fn team_roster(&self, team_id: TeamId) -> Result<Vec<RosterEntry>> {
        self.roster_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(Self::transport_error());
        }
        Ok(self
            .rosters
            .lock()
            .unwrap()
            .get(&team_id.as_i64())
            .cloned()
            .unwrap_or_default())
    }
}

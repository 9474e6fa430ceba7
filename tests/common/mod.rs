//! Shared fixtures for integration tests: a canned stats provider and
//! payload builders.

use async_trait::async_trait;
use mlb_stats::{
    mlb::{
        types::{
            NamedRef, PlayerSearchResult, PositionRef, RawStatLine, RosterEntry, RosterPerson,
            StatGroup, StatSplit, StatsEnvelope,
        },
        StatsProvider,
    },
    PlayerId, Result, Season, StatType, TeamId,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::Mutex;

#[derive(Default)]
pub struct TestProvider {
    stat_lines: Mutex<HashMap<(i64, u16, StatType), RawStatLine>>,
    search_results: Mutex<Vec<PlayerSearchResult>>,
    rosters: Mutex<HashMap<i64, Vec<RosterEntry>>>,
    pub player_stats_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub roster_calls: AtomicUsize,
}

impl TestProvider {
    pub fn new() -> Self {
        Self::default()
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
        self.rosters
            .lock()
            .unwrap()
            .insert(team_id.as_i64(), entries);
        self
    }
}

#[async_trait]
impl StatsProvider for TestProvider {
    async fn player_stats(
        &self,
        player_id: PlayerId,
        season: Season,
        stat_type: StatType,
    ) -> Result<StatsEnvelope> {
        self.player_stats_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let lines = self.stat_lines.lock().unwrap();
        Ok(lines
            .get(&(player_id.as_i64(), season.as_u16(), stat_type))
            .cloned()
            .map(|line| StatsEnvelope {
                stats: vec![StatGroup {
                    splits: vec![StatSplit { stat: line }],
                }],
            })
            .unwrap_or_default())
    }

    async fn search_players(&self, _query: &str) -> Result<Vec<PlayerSearchResult>> {
        self.search_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.search_results.lock().unwrap().clone())
    }

    async fn team_roster(&self, team_id: TeamId) -> Result<Vec<RosterEntry>> {
        self.roster_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self
            .rosters
            .lock()
            .unwrap()
            .get(&team_id.as_i64())
            .cloned()
            .unwrap_or_default())
    }
}

pub fn roster_entry(id: i64, name: &str) -> RosterEntry {
    RosterEntry {
        person: RosterPerson {
            id: PlayerId::new(id),
            name: name.to_string(),
        },
    }
}

pub fn search_result(id: i64, name: &str, team: Option<&str>, position: Option<&str>) -> PlayerSearchResult {
    PlayerSearchResult {
        id: PlayerId::new(id),
        name: name.to_string(),
        current_team: team.map(|t| NamedRef {
            name: t.to_string(),
        }),
        primary_position: position.map(|p| PositionRef {
            abbreviation: p.to_string(),
        }),
    }
}

pub fn batting_line(games: u32, at_bats: u32, hits: u32, home_runs: u32, avg: f64) -> RawStatLine {
    RawStatLine {
        games_played: Some(games),
        at_bats: Some(at_bats),
        hits: Some(hits),
        home_runs: Some(home_runs),
        avg: Some(avg),
        ..Default::default()
    }
}

pub fn pitching_line(games: u32, innings: f64, strikeouts: u32, era: f64) -> RawStatLine {
    RawStatLine {
        games_played: Some(games),
        innings_pitched: Some(innings),
        strike_outs: Some(strikeouts),
        era: Some(era),
        ..Default::default()
    }
}

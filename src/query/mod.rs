//! Query Engine: filtered stats lookups with best-effort external backfill.
//!
//! Reads always come from the local store. When a season-scoped query finds
//! nothing, the engine triggers one sync pass and re-runs the query exactly
//! once; a second empty result is final. Sync failures on the fallback path
//! are logged and swallowed, never surfaced to the caller.

use crate::cli::types::{PlayerId, Season, StatType};
use crate::error::{Result, StatsError};
use crate::mlb::StatsProvider;
use crate::storage::{Player, PlayerSummary, StatLine, StatRow, StatsDatabase, ThresholdSet};
use crate::sync::{self, SyncOutcome};
use tracing::{debug, warn};

/// Local search returns at most this many players.
pub const SEARCH_RESULT_LIMIT: u32 = 10;

/// Seed ids synced when a season query is empty and names neither a team
/// nor a player (Trout, Ohtani, Judge).
pub const FALLBACK_PLAYER_IDS: [i64; 3] = [545361, 660271, 592450];

/// One stats lookup: equality filters plus inclusive minimum thresholds,
/// all combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsQuery {
    pub stat_type: StatType,
    pub season: Option<Season>,
    pub team: Option<String>,
    pub player_id: Option<PlayerId>,
    pub thresholds: ThresholdSet,
}

impl StatsQuery {
    /// Canonical string form, used as the lookaside cache key.
    pub fn cache_key(&self) -> String {
        fn opt<T: std::fmt::Display>(v: &Option<T>) -> String {
            v.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
        }

        let t = &self.thresholds;
        format!(
            "{}|season={}|team={}|player={}|mg={}|mab={}|mh={}|mhr={}|mi={}|mso={}",
            self.stat_type,
            opt(&self.season),
            opt(&self.team),
            opt(&self.player_id),
            opt(&t.min_games),
            opt(&t.min_at_bats),
            opt(&t.min_hits),
            opt(&t.min_home_runs),
            opt(&t.min_innings),
            opt(&t.min_strikeouts),
        )
    }
}

/// The engine owns the database handle and the injected provider; stats
/// rows are mutated only here and in the Sync Normalizer it delegates to.
pub struct QueryEngine<P: StatsProvider> {
    db: StatsDatabase,
    provider: P,
}

impl<P: StatsProvider> QueryEngine<P> {
    pub fn new(db: StatsDatabase, provider: P) -> Self {
        Self { db, provider }
    }

    /// Direct storage access, for seeding and explicit syncs.
    pub fn database(&mut self) -> &mut StatsDatabase {
        &mut self.db
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Filtered lookup with the one-shot sync fallback.
    pub async fn lookup_stats(&mut self, query: &StatsQuery) -> Result<Vec<StatRow>> {
        let results = self.run_local(query)?;
        let season = match query.season {
            Some(season) if results.is_empty() => season,
            _ => return Ok(results),
        };
        debug!(key = %query.cache_key(), "empty season query, attempting backfill");

        if !self.backfill_for_query(query, season).await {
            // Sync failed outright; whatever is local (nothing) stands.
            return Ok(results);
        }

        // Non-recursive: one retry, and an empty second pass is final.
        self.run_local(query)
    }

    fn run_local(&self, query: &StatsQuery) -> Result<Vec<StatRow>> {
        // Unknown abbreviations silently match nothing.
        let team_id = match &query.team {
            Some(abbr) => match self.db.team_by_abbreviation(abbr)? {
                Some(team) => Some(team.team_id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let rows = match query.stat_type {
            StatType::Batting => self.db.lookup_batting(
                query.season,
                team_id,
                query.player_id,
                &query.thresholds,
            )?,
            StatType::Pitching => self.db.lookup_pitching(
                query.season,
                team_id,
                query.player_id,
                &query.thresholds,
            )?,
        };
        Ok(rows)
    }

    /// Run the sync pass for an empty query. Returns false when the sync
    /// failed hard enough that a retry is pointless; failures are logged
    /// here and go no further.
    async fn backfill_for_query(&mut self, query: &StatsQuery, season: Season) -> bool {
        if let Some(abbr) = &query.team {
            match sync::sync_team_roster(&mut self.db, &self.provider, abbr, season, query.stat_type)
                .await
            {
                Ok(report) => {
                    debug!(
                        team = %abbr,
                        synced = report.synced,
                        skipped = report.skipped,
                        failed = report.failed,
                        "roster backfill finished"
                    );
                    true
                }
                Err(e) => {
                    warn!(team = %abbr, error = %e, "roster backfill failed");
                    false
                }
            }
        } else if let Some(player_id) = query.player_id {
            self.backfill_player(player_id, season, query.stat_type).await
        } else {
            // No team or player to scope by; sync a few well-known players,
            // each attempt independent.
            let mut any = false;
            for id in FALLBACK_PLAYER_IDS {
                any |= self
                    .backfill_player(PlayerId::new(id), season, query.stat_type)
                    .await;
            }
            any
        }
    }

    async fn backfill_player(
        &mut self,
        player_id: PlayerId,
        season: Season,
        stat_type: StatType,
    ) -> bool {
        match sync::sync_player_season(&mut self.db, &self.provider, player_id, season, stat_type)
            .await
        {
            SyncOutcome::Synced => true,
            SyncOutcome::NoData | SyncOutcome::PlayerMissing => {
                debug!(player_id = player_id.as_i64(), "backfill found nothing to write");
                true
            }
            SyncOutcome::Failed(e) => {
                warn!(player_id = player_id.as_i64(), error = %e, "player backfill failed");
                false
            }
        }
    }

    /// Explicit single-player sync, for the sync commands. Outcomes are
    /// reported to the caller rather than swallowed.
    pub async fn sync_player(
        &mut self,
        player_id: PlayerId,
        season: Season,
        stat_type: StatType,
    ) -> SyncOutcome {
        sync::sync_player_season(&mut self.db, &self.provider, player_id, season, stat_type).await
    }

    /// Explicit roster sync for a team abbreviation.
    pub async fn sync_roster(
        &mut self,
        abbreviation: &str,
        season: Season,
        stat_type: StatType,
    ) -> Result<sync::RosterSyncReport> {
        sync::sync_team_roster(&mut self.db, &self.provider, abbreviation, season, stat_type).await
    }

    /// All stats for one player. NotFound when the player is absent
    /// locally; same one-shot backfill when empty and a season was given.
    pub async fn player_stats(
        &mut self,
        player_id: PlayerId,
        stat_type: StatType,
        season: Option<Season>,
    ) -> Result<(PlayerSummary, Vec<StatLine>)> {
        let summary = self
            .db
            .player_summary(player_id)?
            .ok_or(StatsError::PlayerNotFound {
                id: player_id.as_i64(),
            })?;

        let mut stats = self.stat_lines(player_id, stat_type, season)?;
        if stats.is_empty() {
            if let Some(season) = season {
                if self.backfill_player(player_id, season, stat_type).await {
                    stats = self.stat_lines(player_id, stat_type, Some(season))?;
                }
            }
        }

        Ok((summary, stats))
    }

    fn stat_lines(
        &self,
        player_id: PlayerId,
        stat_type: StatType,
        season: Option<Season>,
    ) -> Result<Vec<StatLine>> {
        let lines = match stat_type {
            StatType::Batting => self
                .db
                .batting_stats_for_player(player_id, season)?
                .into_iter()
                .map(StatLine::Batting)
                .collect(),
            StatType::Pitching => self
                .db
                .pitching_stats_for_player(player_id, season)?
                .into_iter()
                .map(StatLine::Pitching)
                .collect(),
        };
        Ok(lines)
    }

    /// Name search, local first. Zero local matches delegate to the
    /// provider and persist every hit under its provider id; a provider
    /// failure yields an empty list, not an error.
    pub async fn search_players(&mut self, query: &str) -> Result<Vec<PlayerSummary>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let local = self.db.search_players_local(query, SEARCH_RESULT_LIMIT)?;
        if !local.is_empty() {
            return Ok(local);
        }

        let hits = match self.provider.search_players(query).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(query = %query, error = %e, "external player search failed");
                return Ok(Vec::new());
            }
        };

        let mut created = Vec::new();
        for hit in hits {
            // Link to a local team when the provider's team name matches one.
            let team = match hit.team_name() {
                Some(name) => self.db.team_by_name(name)?,
                None => None,
            };

            let player = Player {
                player_id: hit.id,
                name: hit.name.clone(),
                position: hit.position_code().map(str::to_string),
                team_id: team.as_ref().map(|t| t.team_id),
            };
            self.db.upsert_player(&player)?;

            created.push(PlayerSummary {
                id: hit.id,
                name: hit.name,
                team: team.map(|t| t.abbreviation),
                position: player.position,
            });
        }
        Ok(created)
    }
}

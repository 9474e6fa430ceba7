//! Sync Normalizer: maps external provider payloads into local stats rows.
//!
//! The normalizer never creates players as a side effect and never writes a
//! partial row: parsing happens before the single atomic upsert, so a
//! failure anywhere leaves storage untouched. Outcomes are reported through
//! [`SyncOutcome`] instead of swallowed errors; the Query Engine decides
//! what to do with a `Failed`.

use crate::cli::types::{PlayerId, Season, StatType};
use crate::error::{Result, StatsError};
use crate::mlb::types::RawStatLine;
use crate::mlb::StatsProvider;
use crate::storage::{BattingStats, PitchingStats, StatsDatabase};
use tracing::warn;

/// Result of one player-season sync attempt.
#[derive(Debug)]
pub enum SyncOutcome {
    /// A stats row was written (created or overwritten).
    Synced,
    /// The provider had no stat entries for this key; storage untouched.
    NoData,
    /// The player does not exist locally; sync is a no-op, not a creation.
    PlayerMissing,
    /// Network or decode failure; storage untouched.
    Failed(StatsError),
}

/// Outcome counts for a roster-wide sync.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RosterSyncReport {
    pub synced: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Fetch and store one player's season aggregate. Idempotent: re-running
/// with identical provider data overwrites the same row in place.
pub async fn sync_player_season<P: StatsProvider>(
    db: &mut StatsDatabase,
    provider: &P,
    player_id: PlayerId,
    season: Season,
    stat_type: StatType,
) -> SyncOutcome {
    let player = match db.get_player(player_id) {
        Ok(Some(player)) => player,
        Ok(None) => return SyncOutcome::PlayerMissing,
        Err(e) => return SyncOutcome::Failed(e.into()),
    };

    let envelope = match provider.player_stats(player.player_id, season, stat_type).await {
        Ok(envelope) => envelope,
        Err(e) => return SyncOutcome::Failed(e),
    };

    let line = match envelope.first_stat_line() {
        Some(line) => line,
        None => return SyncOutcome::NoData,
    };

    let write = match stat_type {
        StatType::Batting => db.upsert_batting_stats(&normalize_batting(player_id, season, line)),
        StatType::Pitching => {
            db.upsert_pitching_stats(&normalize_pitching(player_id, season, line))
        }
    };

    match write {
        Ok(()) => SyncOutcome::Synced,
        Err(e) => SyncOutcome::Failed(e.into()),
    }
}

/// Sync every member of a team's current roster for one season.
///
/// One member failing never aborts the rest; failures are logged and
/// counted. Errors resolving the team or fetching the roster itself do
/// propagate.
pub async fn sync_team_roster<P: StatsProvider>(
    db: &mut StatsDatabase,
    provider: &P,
    abbreviation: &str,
    season: Season,
    stat_type: StatType,
) -> Result<RosterSyncReport> {
    // The provider team identifier is assumed to mirror the locally stored
    // team id; there is no separate abbreviation-to-provider mapping.
    let team = db
        .team_by_abbreviation(abbreviation)?
        .ok_or_else(|| StatsError::TeamNotFound {
            abbreviation: abbreviation.to_string(),
        })?;

    let roster = provider.team_roster(team.team_id).await?;

    let mut report = RosterSyncReport::default();
    for entry in roster {
        match sync_player_season(db, provider, entry.person.id, season, stat_type).await {
            SyncOutcome::Synced => report.synced += 1,
            SyncOutcome::NoData | SyncOutcome::PlayerMissing => report.skipped += 1,
            SyncOutcome::Failed(e) => {
                warn!(
                    player_id = entry.person.id.as_i64(),
                    player = %entry.person.name,
                    season = season.as_u16(),
                    error = %e,
                    "roster member sync failed; continuing"
                );
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Map provider batting fields onto the local schema. Counting fields
/// missing from the payload become zero; advanced fields stay unset.
pub fn normalize_batting(player_id: PlayerId, season: Season, line: &RawStatLine) -> BattingStats {
    BattingStats {
        player_id,
        season,
        games: line.games_played.unwrap_or(0),
        at_bats: line.at_bats.unwrap_or(0),
        hits: line.hits.unwrap_or(0),
        runs: line.runs.unwrap_or(0),
        rbis: line.rbi.unwrap_or(0),
        home_runs: line.home_runs.unwrap_or(0),
        batting_average: line.avg.unwrap_or(0.0),
        exit_velocity: line.exit_velocity,
        launch_angle: line.launch_angle,
        created_at: 0,
        updated_at: 0,
    }
}

/// Map provider pitching fields onto the local schema.
pub fn normalize_pitching(
    player_id: PlayerId,
    season: Season,
    line: &RawStatLine,
) -> PitchingStats {
    PitchingStats {
        player_id,
        season,
        games: line.games_played.unwrap_or(0),
        innings_pitched: line.innings_pitched.unwrap_or(0.0),
        hits_allowed: line.hits.unwrap_or(0),
        runs_allowed: line.runs.unwrap_or(0),
        earned_runs: line.earned_runs.unwrap_or(0),
        walks: line.base_on_balls.unwrap_or(0),
        strikeouts: line.strike_outs.unwrap_or(0),
        era: line.era.unwrap_or(0.0),
        velocity: line.velocity,
        spin_rate: line.spin_rate,
        created_at: 0,
        updated_at: 0,
    }
}

//! Explicit sync commands: single player or full team roster.
//!
//! Unlike the query engine's opportunistic backfill, these surface sync
//! problems to the operator instead of swallowing them.

use crate::{
    cli::types::{PlayerId, Season, StatType},
    error::StatsError,
    sync::SyncOutcome,
    Result,
};

use super::common::CommandContext;

/// Sync one player's season line from the external provider.
pub async fn handle_sync_player(
    ctx: &mut CommandContext,
    player_id: PlayerId,
    season: Season,
    stat_type: StatType,
) -> Result<()> {
    println!(
        "Syncing {} stats for player {} season {}...",
        stat_type,
        player_id.as_i64(),
        season
    );

    match ctx.engine.sync_player(player_id, season, stat_type).await {
        SyncOutcome::Synced => {
            ctx.cache.clear();
            println!("✓ Stats synced");
            Ok(())
        }
        SyncOutcome::NoData => {
            println!("Provider has no {} data for this player and season", stat_type);
            Ok(())
        }
        SyncOutcome::PlayerMissing => Err(StatsError::PlayerNotFound {
            id: player_id.as_i64(),
        }),
        SyncOutcome::Failed(e) => Err(e),
    }
}

/// Sync season lines for every player on a team's roster.
pub async fn handle_sync_roster(
    ctx: &mut CommandContext,
    team: &str,
    season: Season,
    stat_type: StatType,
) -> Result<()> {
    let abbreviation = team.to_uppercase();
    println!(
        "Syncing {} stats for {} roster, season {}...",
        stat_type, abbreviation, season
    );

    let report = ctx
        .engine
        .sync_roster(&abbreviation, season, stat_type)
        .await?;

    ctx.cache.clear();
    println!(
        "✓ Roster sync complete: {} synced, {} without data, {} failed",
        report.synced, report.skipped, report.failed
    );
    Ok(())
}

//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use mlb_stats::{
    cli::{Commands, GetCmd, MlbStats, SyncCmd},
    commands::{
        common::CommandContext,
        init::handle_init,
        player::{handle_player, PlayerParams},
        search::handle_search,
        statcast::{handle_statcast, StatcastParams},
        stats::{handle_stats, StatsParams},
        sync::{handle_sync_player, handle_sync_roster},
    },
    core::Config,
    Result,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let app = MlbStats::parse();

    match app.command {
        Commands::Get { cmd } => match cmd {
            GetCmd::Stats {
                stat_type,
                season,
                team,
                player_id,
                thresholds,
                json,
            } => {
                let mut ctx = CommandContext::new(app.verbose)?;
                handle_stats(
                    &mut ctx,
                    StatsParams {
                        as_json: json,
                        stat_type,
                        season,
                        team,
                        player_id,
                        min_games: thresholds.min_games,
                        min_at_bats: thresholds.min_at_bats,
                        min_hits: thresholds.min_hits,
                        min_home_runs: thresholds.min_home_runs,
                        min_innings: thresholds.min_innings,
                        min_strikeouts: thresholds.min_strikeouts,
                    },
                )
                .await?
            }

            GetCmd::Player {
                player_id,
                stat_type,
                season,
                json,
            } => {
                let mut ctx = CommandContext::new(app.verbose)?;
                handle_player(
                    &mut ctx,
                    PlayerParams {
                        as_json: json,
                        player_id,
                        stat_type,
                        season,
                    },
                )
                .await?
            }

            GetCmd::Search { query, json } => {
                let mut ctx = CommandContext::new(app.verbose)?;
                handle_search(&mut ctx, &query, json).await?
            }

            GetCmd::Statcast {
                stat_type,
                season,
                start_date,
                end_date,
                team_ids,
                player_ids,
                json,
            } => {
                let config = Config::from_env()?;
                handle_statcast(
                    &config,
                    StatcastParams {
                        as_json: json,
                        stat_type,
                        season,
                        start_date,
                        end_date,
                        team_ids,
                        player_ids,
                    },
                )
                .await?
            }
        },

        Commands::Sync { cmd } => match cmd {
            SyncCmd::Player {
                player_id,
                season,
                stat_type,
            } => {
                let mut ctx = CommandContext::new(app.verbose)?;
                handle_sync_player(&mut ctx, player_id, season, stat_type).await?
            }

            SyncCmd::Roster {
                team,
                season,
                stat_type,
            } => {
                let mut ctx = CommandContext::new(app.verbose)?;
                handle_sync_roster(&mut ctx, &team, season, stat_type).await?
            }
        },

        Commands::Init { seed } => handle_init(seed)?,
    }

    Ok(())
}

//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::{PlayerId, Season, StatType, TeamId};

/// Common threshold arguments shared by stats lookups
#[derive(Debug, Args)]
pub struct ThresholdArgs {
    /// Minimum games played.
    #[clap(long)]
    pub min_games: Option<u32>,

    /// Minimum at-bats (batting only).
    #[clap(long)]
    pub min_at_bats: Option<u32>,

    /// Minimum hits (batting only).
    #[clap(long)]
    pub min_hits: Option<u32>,

    /// Minimum home runs (batting only).
    #[clap(long)]
    pub min_home_runs: Option<u32>,

    /// Minimum innings pitched (pitching only).
    #[clap(long)]
    pub min_innings: Option<f64>,

    /// Minimum strikeouts (pitching only).
    #[clap(long)]
    pub min_strikeouts: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// Query season stat lines with optional filters.
    ///
    /// Filters combine with AND; thresholds are inclusive minimums. A
    /// season-scoped query with no local matches triggers one sync from
    /// the external provider before giving up.
    Stats {
        /// Stat type to query.
        #[clap(long = "type", short = 't', value_enum, default_value_t = StatType::Batting)]
        stat_type: StatType,

        /// Season year (e.g. 2024).
        #[clap(long, short)]
        season: Option<Season>,

        /// Team abbreviation (e.g. LAD).
        #[clap(long)]
        team: Option<String>,

        /// Player identifier.
        #[clap(long, short = 'p')]
        player_id: Option<PlayerId>,

        #[clap(flatten)]
        thresholds: ThresholdArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Show one player and their stat lines.
    Player {
        /// Player identifier.
        #[clap(long, short = 'p')]
        player_id: PlayerId,

        /// Stat type to show.
        #[clap(long = "type", short = 't', value_enum, default_value_t = StatType::Batting)]
        stat_type: StatType,

        /// Limit stat lines to one season.
        #[clap(long, short)]
        season: Option<Season>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Search players by name (local first, then external).
    Search {
        /// Name fragment, case-insensitive.
        query: String,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Fetch a Statcast advanced-metric leaderboard.
    ///
    /// Requires `STATCAST_API_KEY`. The period is either --season or both
    /// --start-date and --end-date.
    Statcast {
        /// Stat type to query.
        #[clap(long = "type", short = 't', value_enum, default_value_t = StatType::Batting)]
        stat_type: StatType,

        /// Season year (e.g. 2024).
        #[clap(long, short)]
        season: Option<Season>,

        /// Period start (YYYY-MM-DD).
        #[clap(long)]
        start_date: Option<chrono::NaiveDate>,

        /// Period end (YYYY-MM-DD).
        #[clap(long)]
        end_date: Option<chrono::NaiveDate>,

        /// Restrict to these team ids (repeatable).
        #[clap(long = "team-id")]
        team_ids: Vec<TeamId>,

        /// Restrict to these player ids (repeatable).
        #[clap(long = "player-id")]
        player_ids: Vec<PlayerId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SyncCmd {
    /// Sync one player's season stats from the external provider.
    Player {
        /// Player identifier.
        #[clap(long, short = 'p')]
        player_id: PlayerId,

        /// Season year (e.g. 2024).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Stat type to sync.
        #[clap(long = "type", short = 't', value_enum, default_value_t = StatType::Batting)]
        stat_type: StatType,
    },

    /// Sync season stats for every player on a team's roster.
    Roster {
        /// Team abbreviation (e.g. LAD).
        #[clap(long)]
        team: String,

        /// Season year (e.g. 2024).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Stat type to sync.
        #[clap(long = "type", short = 't', value_enum, default_value_t = StatType::Batting)]
        stat_type: StatType,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "mlb-stats", about = "MLB statistics query service CLI")]
pub struct MlbStats {
    /// Print connection progress messages.
    #[clap(long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Query local data, backfilling from the MLB API when needed
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },

    /// Explicitly sync data from the MLB API
    Sync {
        #[clap(subcommand)]
        cmd: SyncCmd,
    },

    /// Create the database schema
    Init {
        /// Also insert development seed data (teams and the admin user).
        #[clap(long)]
        seed: bool,
    },
}

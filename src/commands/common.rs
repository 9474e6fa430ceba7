//! Common utilities and helper functions shared across commands.
//!
//! This module contains shared functionality that would otherwise be duplicated
//! across different command implementations.

use crate::{
    core::{Config, ResultCache},
    mlb::http::MlbClient,
    query::QueryEngine,
    storage::{StatRow, StatsDatabase},
    Result,
};

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub config: Config,
    pub engine: QueryEngine<MlbClient>,
    pub cache: ResultCache<Vec<StatRow>>,
}

impl CommandContext {
    /// Initialize common command context with database and stats client
    pub fn new(verbose: bool) -> Result<Self> {
        let config = Config::from_env()?;

        if verbose {
            println!("Connecting to database at {}...", config.database_path.display());
        }
        let db = StatsDatabase::open(&config.database_path)?;
        let client = MlbClient::from_config(&config)?;

        Ok(Self {
            config,
            engine: QueryEngine::new(db, client),
            cache: ResultCache::default(),
        })
    }
}

/// One-line text rendering of a stats row for console output.
pub fn format_stat_row(row: &StatRow) -> String {
    use crate::storage::StatLine;

    let team = row.player.team.as_deref().unwrap_or("FA");
    let position = row.player.position.as_deref().unwrap_or("?");

    match &row.stats {
        StatLine::Batting(b) => format!(
            "{} {} ({}) [{}] {}: {} G, {} AB, {} H, {} HR, {} RBI, {:.3} AVG",
            row.player.id.as_i64(),
            row.player.name,
            position,
            team,
            b.season,
            b.games,
            b.at_bats,
            b.hits,
            b.home_runs,
            b.rbis,
            b.batting_average,
        ),
        StatLine::Pitching(p) => format!(
            "{} {} ({}) [{}] {}: {} G, {:.1} IP, {} SO, {} BB, {:.2} ERA",
            row.player.id.as_i64(),
            row.player.name,
            position,
            team,
            p.season,
            p.games,
            p.innings_pitched,
            p.strikeouts,
            p.walks,
            p.era,
        ),
    }
}

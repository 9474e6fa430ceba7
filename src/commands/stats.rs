//! Filtered season-stats lookup.
//!
//! Builds a [`StatsQuery`] from CLI options, consults the result cache, and
//! runs it through the query engine, which transparently backfills empty
//! season queries from the external provider.

use crate::{
    cli::types::{PlayerId, Season, StatType},
    query::StatsQuery,
    storage::ThresholdSet,
    Result,
};

use super::common::{format_stat_row, CommandContext};

/// Configuration parameters for a stats lookup.
#[derive(Debug, Clone, Default)]
pub struct StatsParams {
    pub as_json: bool,
    pub stat_type: StatType,
    pub season: Option<Season>,
    pub team: Option<String>,
    pub player_id: Option<PlayerId>,
    pub min_games: Option<u32>,
    pub min_at_bats: Option<u32>,
    pub min_hits: Option<u32>,
    pub min_home_runs: Option<u32>,
    pub min_innings: Option<f64>,
    pub min_strikeouts: Option<u32>,
}

impl StatsParams {
    fn into_query(self) -> StatsQuery {
        StatsQuery {
            stat_type: self.stat_type,
            season: self.season,
            // Abbreviations are stored uppercase.
            team: self.team.map(|t| t.to_uppercase()),
            player_id: self.player_id,
            thresholds: ThresholdSet {
                min_games: self.min_games,
                min_at_bats: self.min_at_bats,
                min_hits: self.min_hits,
                min_home_runs: self.min_home_runs,
                min_innings: self.min_innings,
                min_strikeouts: self.min_strikeouts,
            },
        }
    }
}

/// Run a filtered stats query and print the matching rows.
pub async fn handle_stats(ctx: &mut CommandContext, params: StatsParams) -> Result<()> {
    let as_json = params.as_json;
    let query = params.into_query();
    let key = query.cache_key();

    let rows = match ctx.cache.get(&key) {
        Some(rows) => rows,
        None => {
            let rows = ctx.engine.lookup_stats(&query).await?;
            ctx.cache.put(key, rows.clone());
            rows
        }
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No matching {} stats found", query.stat_type);
    } else {
        for row in &rows {
            println!("{}", format_stat_row(row));
        }
        println!("✓ {} matching rows", rows.len());
    }

    Ok(())
}

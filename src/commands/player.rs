//! Single-player detail: summary plus stat lines for one stat type.

use crate::{
    cli::types::{PlayerId, Season, StatType},
    storage::StatLine,
    Result,
};
use serde::Serialize;

use super::common::CommandContext;

#[derive(Debug, Clone)]
pub struct PlayerParams {
    pub as_json: bool,
    pub player_id: PlayerId,
    pub stat_type: StatType,
    pub season: Option<Season>,
}

/// JSON shape for the player detail output.
#[derive(Debug, Serialize)]
struct PlayerDetail {
    #[serde(flatten)]
    player: crate::storage::PlayerSummary,
    stats: Vec<StatLine>,
}

/// Look up one player and their stat lines, backfilling when empty.
pub async fn handle_player(ctx: &mut CommandContext, params: PlayerParams) -> Result<()> {
    let (player, stats) = ctx
        .engine
        .player_stats(params.player_id, params.stat_type, params.season)
        .await?;

    if params.as_json {
        let detail = PlayerDetail { player, stats };
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let team = player.team.as_deref().unwrap_or("FA");
    let position = player.position.as_deref().unwrap_or("?");
    println!("{} {} ({}) [{}]", player.id.as_i64(), player.name, position, team);

    if stats.is_empty() {
        println!("No {} stats recorded", params.stat_type);
        return Ok(());
    }

    for line in &stats {
        match line {
            StatLine::Batting(b) => println!(
                "  {}: {} G, {} AB, {} H, {} R, {} RBI, {} HR, {:.3} AVG",
                b.season, b.games, b.at_bats, b.hits, b.runs, b.rbis, b.home_runs, b.batting_average,
            ),
            StatLine::Pitching(p) => println!(
                "  {}: {} G, {:.1} IP, {} H, {} ER, {} BB, {} SO, {:.2} ERA",
                p.season,
                p.games,
                p.innings_pitched,
                p.hits_allowed,
                p.earned_runs,
                p.walks,
                p.strikeouts,
                p.era,
            ),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::PlayerId;
    use crate::storage::{BattingStats, PlayerSummary};

    #[test]
    fn test_detail_serialization_flattens_player() {
        let detail = PlayerDetail {
            player: PlayerSummary {
                id: PlayerId::new(545361),
                name: "Mike Trout".to_string(),
                team: Some("LAA".to_string()),
                position: Some("CF".to_string()),
            },
            stats: vec![StatLine::Batting(BattingStats::empty(
                PlayerId::new(545361),
                Season::new(2024),
            ))],
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["id"], 545361);
        assert_eq!(value["team"], "LAA");
        assert_eq!(value["stats"][0]["season"], 2024);
    }
}

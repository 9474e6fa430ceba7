//! Statcast leaderboard command (advanced metrics, bearer-keyed).

use crate::{
    cli::types::{PlayerId, Season, StatType, TeamId},
    core::Config,
    mlb::statcast::{StatcastClient, StatcastQuery},
    Result,
};
use chrono::NaiveDate;

#[derive(Debug, Clone, Default)]
pub struct StatcastParams {
    pub as_json: bool,
    pub stat_type: StatType,
    pub season: Option<Season>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub team_ids: Vec<TeamId>,
    pub player_ids: Vec<PlayerId>,
}

/// Fetch and print a Statcast leaderboard.
pub async fn handle_statcast(config: &Config, params: StatcastParams) -> Result<()> {
    let client = StatcastClient::from_config(config)?;
    let query = StatcastQuery {
        season: params.season,
        start_date: params.start_date,
        end_date: params.end_date,
        team_ids: params.team_ids,
        player_ids: params.player_ids,
    };

    let rows = client.leaderboard(params.stat_type, &query).await?;

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No Statcast {} rows for this period", params.stat_type);
        return Ok(());
    }

    for row in &rows {
        let team = row.team.as_deref().unwrap_or("FA");
        match params.stat_type {
            StatType::Batting => println!(
                "{} {} [{}] EV {:.1} LA {:.1}",
                row.player_id,
                row.player_name,
                team,
                row.exit_velocity.unwrap_or(0.0),
                row.launch_angle.unwrap_or(0.0),
            ),
            StatType::Pitching => println!(
                "{} {} [{}] velo {:.1} spin {:.0}",
                row.player_id,
                row.player_name,
                team,
                row.velocity.unwrap_or(0.0),
                row.spin_rate.unwrap_or(0.0),
            ),
        }
    }
    println!("✓ {} rows", rows.len());
    Ok(())
}

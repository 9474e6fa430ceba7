//! Player name search, local-first with external fallback.

use crate::Result;

use super::common::CommandContext;

/// Search players by name and print the matches.
///
/// Local matches win; when none exist the engine consults the external
/// provider and persists whatever it returns, so repeat searches are local.
pub async fn handle_search(ctx: &mut CommandContext, query: &str, as_json: bool) -> Result<()> {
    let players = ctx.engine.search_players(query).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&players)?);
        return Ok(());
    }

    if players.is_empty() {
        println!("No players matching {:?}", query);
        return Ok(());
    }

    for player in &players {
        println!(
            "{} {} ({}) [{}]",
            player.id.as_i64(),
            player.name,
            player.position.as_deref().unwrap_or("?"),
            player.team.as_deref().unwrap_or("FA"),
        );
    }
    Ok(())
}

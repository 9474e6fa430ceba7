//! Basic database query operations

use super::{models::*, schema::StatsDatabase};
use crate::cli::types::{PlayerId, Season, TeamId};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};

/// Minimum thresholds applied to a stats lookup. All bounds are inclusive
/// (`stored value >= minimum`), so a zero threshold keeps zero-valued rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdSet {
    pub min_games: Option<u32>,
    // Batting
    pub min_at_bats: Option<u32>,
    pub min_hits: Option<u32>,
    pub min_home_runs: Option<u32>,
    // Pitching
    pub min_innings: Option<f64>,
    pub min_strikeouts: Option<u32>,
}

fn now_secs() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

impl StatsDatabase {
    // ---- teams ----

    /// Insert a team, or update its name if the abbreviation already exists.
    pub fn upsert_team(&mut self, name: &str, abbreviation: &str) -> Result<Team> {
        let now = now_secs()?;
        self.conn.execute(
            "INSERT INTO teams (name, abbreviation, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(abbreviation) DO UPDATE SET
                 name = excluded.name,
                 updated_at = excluded.updated_at",
            params![name, abbreviation, now, now],
        )?;

        self.team_by_abbreviation(abbreviation)?
            .ok_or_else(|| anyhow::anyhow!("team vanished after upsert: {}", abbreviation))
    }

    pub fn team_by_abbreviation(&self, abbreviation: &str) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, name, abbreviation FROM teams WHERE abbreviation = ?",
                params![abbreviation],
                Self::row_to_team,
            )
            .optional()?;
        Ok(team)
    }

    pub fn team_by_name(&self, name: &str) -> Result<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, name, abbreviation FROM teams WHERE name = ?",
                params![name],
                Self::row_to_team,
            )
            .optional()?;
        Ok(team)
    }

    // ---- players ----

    /// Insert or update a player's basic information
    pub fn upsert_player(&mut self, player: &Player) -> Result<()> {
        let now = now_secs()?;
        self.conn.execute(
            "INSERT INTO players (player_id, name, position, team_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(player_id) DO UPDATE SET
                 name = excluded.name,
                 position = excluded.position,
                 team_id = excluded.team_id,
                 updated_at = excluded.updated_at",
            params![
                player.player_id.as_i64(),
                player.name,
                player.position,
                player.team_id.map(|t| t.as_i64()),
                now,
                now
            ],
        )?;
        Ok(())
    }

    pub fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                "SELECT player_id, name, position, team_id FROM players WHERE player_id = ?",
                params![player_id.as_i64()],
                |row| {
                    Ok(Player {
                        player_id: PlayerId::new(row.get(0)?),
                        name: row.get(1)?,
                        position: row.get(2)?,
                        team_id: row.get::<_, Option<i64>>(3)?.map(TeamId::new),
                    })
                },
            )
            .optional()?;
        Ok(player)
    }

    /// Player with the team resolved to its abbreviation.
    pub fn player_summary(&self, player_id: PlayerId) -> Result<Option<PlayerSummary>> {
        let summary = self
            .conn
            .query_row(
                "SELECT p.player_id, p.name, t.abbreviation, p.position
                 FROM players p
                 LEFT JOIN teams t ON p.team_id = t.team_id
                 WHERE p.player_id = ?",
                params![player_id.as_i64()],
                Self::row_to_player_summary,
            )
            .optional()?;
        Ok(summary)
    }

    /// Case-insensitive substring search on name, capped at `limit` rows.
    pub fn search_players_local(&self, query: &str, limit: u32) -> Result<Vec<PlayerSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.player_id, p.name, t.abbreviation, p.position
             FROM players p
             LEFT JOIN teams t ON p.team_id = t.team_id
             WHERE LOWER(p.name) LIKE LOWER(?)
             ORDER BY p.name
             LIMIT ?",
        )?;

        let pattern = format!("%{}%", query);
        let rows = stmt.query_map(params![pattern, limit], Self::row_to_player_summary)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    pub fn players_by_team(&self, team_id: TeamId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, name, position, team_id FROM players
             WHERE team_id = ? ORDER BY name",
        )?;

        let rows = stmt.query_map(params![team_id.as_i64()], |row| {
            Ok(Player {
                player_id: PlayerId::new(row.get(0)?),
                name: row.get(1)?,
                position: row.get(2)?,
                team_id: row.get::<_, Option<i64>>(3)?.map(TeamId::new),
            })
        })?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    // ---- games ----

    pub fn insert_game(&mut self, game: &Game) -> Result<()> {
        let now = now_secs()?;
        self.conn.execute(
            "INSERT OR REPLACE INTO games
                 (game_id, date, home_team_id, away_team_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                game.game_id,
                game.date.to_string(),
                game.home_team_id.map(|t| t.as_i64()),
                game.away_team_id.map(|t| t.as_i64()),
                now,
                now
            ],
        )?;
        Ok(())
    }

    // ---- users ----

    pub fn upsert_user(&mut self, user: &User) -> Result<()> {
        let now = now_secs()?;
        self.conn.execute(
            "INSERT INTO users (username, email, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(username) DO UPDATE SET
                 email = excluded.email,
                 password_hash = excluded.password_hash,
                 updated_at = excluded.updated_at",
            params![user.username, user.email, user.password_hash, now, now],
        )?;
        Ok(())
    }

    pub fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT user_id, username, email, password_hash FROM users WHERE username = ?",
                params![username],
                |row| {
                    Ok(User {
                        user_id: row.get(0)?,
                        username: row.get(1)?,
                        email: row.get(2)?,
                        password_hash: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    // ---- stats upserts ----

    /// Insert or overwrite the batting line for (player, season).
    ///
    /// Single atomic statement: a racing identical write lands on the same
    /// row instead of duplicating it. `created_at` survives re-syncs.
    pub fn upsert_batting_stats(&mut self, stats: &BattingStats) -> Result<()> {
        let now = now_secs()?;
        self.conn.execute(
            "INSERT INTO batting_stats
                 (player_id, season, games, at_bats, hits, runs, rbis, home_runs,
                  batting_average, exit_velocity, launch_angle, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(player_id, season) DO UPDATE SET
                 games = excluded.games,
                 at_bats = excluded.at_bats,
                 hits = excluded.hits,
                 runs = excluded.runs,
                 rbis = excluded.rbis,
                 home_runs = excluded.home_runs,
                 batting_average = excluded.batting_average,
                 exit_velocity = excluded.exit_velocity,
                 launch_angle = excluded.launch_angle,
                 updated_at = excluded.updated_at",
            params![
                stats.player_id.as_i64(),
                stats.season.as_u16(),
                stats.games,
                stats.at_bats,
                stats.hits,
                stats.runs,
                stats.rbis,
                stats.home_runs,
                stats.batting_average,
                stats.exit_velocity,
                stats.launch_angle,
                now,
                now
            ],
        )?;
        Ok(())
    }

    /// Insert or overwrite the pitching line for (player, season).
    pub fn upsert_pitching_stats(&mut self, stats: &PitchingStats) -> Result<()> {
        let now = now_secs()?;
        self.conn.execute(
            "INSERT INTO pitching_stats
                 (player_id, season, games, innings_pitched, hits_allowed, runs_allowed,
                  earned_runs, walks, strikeouts, era, velocity, spin_rate,
                  created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(player_id, season) DO UPDATE SET
                 games = excluded.games,
                 innings_pitched = excluded.innings_pitched,
                 hits_allowed = excluded.hits_allowed,
                 runs_allowed = excluded.runs_allowed,
                 earned_runs = excluded.earned_runs,
                 walks = excluded.walks,
                 strikeouts = excluded.strikeouts,
                 era = excluded.era,
                 velocity = excluded.velocity,
                 spin_rate = excluded.spin_rate,
                 updated_at = excluded.updated_at",
            params![
                stats.player_id.as_i64(),
                stats.season.as_u16(),
                stats.games,
                stats.innings_pitched,
                stats.hits_allowed,
                stats.runs_allowed,
                stats.earned_runs,
                stats.walks,
                stats.strikeouts,
                stats.era,
                stats.velocity,
                stats.spin_rate,
                now,
                now
            ],
        )?;
        Ok(())
    }

    // ---- stats reads ----

    pub fn get_batting_stats(
        &self,
        player_id: PlayerId,
        season: Season,
    ) -> Result<Option<BattingStats>> {
        let stats = self
            .conn
            .query_row(
                "SELECT player_id, season, games, at_bats, hits, runs, rbis, home_runs,
                        batting_average, exit_velocity, launch_angle, created_at, updated_at
                 FROM batting_stats
                 WHERE player_id = ? AND season = ?",
                params![player_id.as_i64(), season.as_u16()],
                Self::row_to_batting,
            )
            .optional()?;
        Ok(stats)
    }

    pub fn get_pitching_stats(
        &self,
        player_id: PlayerId,
        season: Season,
    ) -> Result<Option<PitchingStats>> {
        let stats = self
            .conn
            .query_row(
                "SELECT player_id, season, games, innings_pitched, hits_allowed, runs_allowed,
                        earned_runs, walks, strikeouts, era, velocity, spin_rate,
                        created_at, updated_at
                 FROM pitching_stats
                 WHERE player_id = ? AND season = ?",
                params![player_id.as_i64(), season.as_u16()],
                Self::row_to_pitching,
            )
            .optional()?;
        Ok(stats)
    }

    /// All batting lines for a player, optionally limited to one season.
    pub fn batting_stats_for_player(
        &self,
        player_id: PlayerId,
        season: Option<Season>,
    ) -> Result<Vec<BattingStats>> {
        let mut query = String::from(
            "SELECT player_id, season, games, at_bats, hits, runs, rbis, home_runs,
                    batting_average, exit_velocity, launch_angle, created_at, updated_at
             FROM batting_stats
             WHERE player_id = ?",
        );
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(player_id.as_i64())];

        if let Some(season) = season {
            query.push_str(" AND season = ?");
            sql_params.push(Box::new(season.as_u16()));
        }
        query.push_str(" ORDER BY season");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(sql_params.iter().map(|p| p.as_ref())),
            Self::row_to_batting,
        )?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    }

    /// All pitching lines for a player, optionally limited to one season.
    pub fn pitching_stats_for_player(
        &self,
        player_id: PlayerId,
        season: Option<Season>,
    ) -> Result<Vec<PitchingStats>> {
        let mut query = String::from(
            "SELECT player_id, season, games, innings_pitched, hits_allowed, runs_allowed,
                    earned_runs, walks, strikeouts, era, velocity, spin_rate,
                    created_at, updated_at
             FROM pitching_stats
             WHERE player_id = ?",
        );
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(player_id.as_i64())];

        if let Some(season) = season {
            query.push_str(" AND season = ?");
            sql_params.push(Box::new(season.as_u16()));
        }
        query.push_str(" ORDER BY season");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(sql_params.iter().map(|p| p.as_ref())),
            Self::row_to_pitching,
        )?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    }

    // ---- filtered lookups ----

    /// Batting lookup with optional equality filters and inclusive minimum
    /// thresholds, all combined with AND.
    pub fn lookup_batting(
        &self,
        season: Option<Season>,
        team_id: Option<TeamId>,
        player_id: Option<PlayerId>,
        thresholds: &ThresholdSet,
    ) -> Result<Vec<StatRow>> {
        let mut query = String::from(
            "SELECT p.player_id, p.name, t.abbreviation, p.position,
                    b.player_id, b.season, b.games, b.at_bats, b.hits, b.runs, b.rbis,
                    b.home_runs, b.batting_average, b.exit_velocity, b.launch_angle,
                    b.created_at, b.updated_at
             FROM players p
             JOIN batting_stats b ON p.player_id = b.player_id
             LEFT JOIN teams t ON p.team_id = t.team_id
             WHERE 1 = 1",
        );
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(season) = season {
            query.push_str(" AND b.season = ?");
            sql_params.push(Box::new(season.as_u16()));
        }
        if let Some(team_id) = team_id {
            query.push_str(" AND p.team_id = ?");
            sql_params.push(Box::new(team_id.as_i64()));
        }
        if let Some(player_id) = player_id {
            query.push_str(" AND p.player_id = ?");
            sql_params.push(Box::new(player_id.as_i64()));
        }
        if let Some(min_games) = thresholds.min_games {
            query.push_str(" AND b.games >= ?");
            sql_params.push(Box::new(min_games));
        }
        if let Some(min_at_bats) = thresholds.min_at_bats {
            query.push_str(" AND b.at_bats >= ?");
            sql_params.push(Box::new(min_at_bats));
        }
        if let Some(min_hits) = thresholds.min_hits {
            query.push_str(" AND b.hits >= ?");
            sql_params.push(Box::new(min_hits));
        }
        if let Some(min_home_runs) = thresholds.min_home_runs {
            query.push_str(" AND b.home_runs >= ?");
            sql_params.push(Box::new(min_home_runs));
        }
        query.push_str(" ORDER BY p.name");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(sql_params.iter().map(|p| p.as_ref())),
            |row| {
                let player = Self::row_to_player_summary(row)?;
                let stats = Self::row_to_batting_at(row, 4)?;
                Ok(StatRow {
                    player,
                    stats: StatLine::Batting(stats),
                })
            },
        )?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// Pitching lookup, same filter semantics as [`Self::lookup_batting`].
    pub fn lookup_pitching(
        &self,
        season: Option<Season>,
        team_id: Option<TeamId>,
        player_id: Option<PlayerId>,
        thresholds: &ThresholdSet,
    ) -> Result<Vec<StatRow>> {
        let mut query = String::from(
            "SELECT p.player_id, p.name, t.abbreviation, p.position,
                    s.player_id, s.season, s.games, s.innings_pitched, s.hits_allowed,
                    s.runs_allowed, s.earned_runs, s.walks, s.strikeouts, s.era,
                    s.velocity, s.spin_rate, s.created_at, s.updated_at
             FROM players p
             JOIN pitching_stats s ON p.player_id = s.player_id
             LEFT JOIN teams t ON p.team_id = t.team_id
             WHERE 1 = 1",
        );
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(season) = season {
            query.push_str(" AND s.season = ?");
            sql_params.push(Box::new(season.as_u16()));
        }
        if let Some(team_id) = team_id {
            query.push_str(" AND p.team_id = ?");
            sql_params.push(Box::new(team_id.as_i64()));
        }
        if let Some(player_id) = player_id {
            query.push_str(" AND p.player_id = ?");
            sql_params.push(Box::new(player_id.as_i64()));
        }
        if let Some(min_games) = thresholds.min_games {
            query.push_str(" AND s.games >= ?");
            sql_params.push(Box::new(min_games));
        }
        if let Some(min_innings) = thresholds.min_innings {
            query.push_str(" AND s.innings_pitched >= ?");
            sql_params.push(Box::new(min_innings));
        }
        if let Some(min_strikeouts) = thresholds.min_strikeouts {
            query.push_str(" AND s.strikeouts >= ?");
            sql_params.push(Box::new(min_strikeouts));
        }
        query.push_str(" ORDER BY p.name");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(sql_params.iter().map(|p| p.as_ref())),
            |row| {
                let player = Self::row_to_player_summary(row)?;
                let stats = Self::row_to_pitching_at(row, 4)?;
                Ok(StatRow {
                    player,
                    stats: StatLine::Pitching(stats),
                })
            },
        )?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    // ---- row helpers ----

    fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
        Ok(Team {
            team_id: TeamId::new(row.get(0)?),
            name: row.get(1)?,
            abbreviation: row.get(2)?,
        })
    }

    fn row_to_player_summary(row: &Row) -> rusqlite::Result<PlayerSummary> {
        Ok(PlayerSummary {
            id: PlayerId::new(row.get(0)?),
            name: row.get(1)?,
            team: row.get(2)?,
            position: row.get(3)?,
        })
    }

    fn row_to_batting(row: &Row) -> rusqlite::Result<BattingStats> {
        Self::row_to_batting_at(row, 0)
    }

    fn row_to_batting_at(row: &Row, base: usize) -> rusqlite::Result<BattingStats> {
        Ok(BattingStats {
            player_id: PlayerId::new(row.get(base)?),
            season: Season::new(row.get(base + 1)?),
            games: row.get(base + 2)?,
            at_bats: row.get(base + 3)?,
            hits: row.get(base + 4)?,
            runs: row.get(base + 5)?,
            rbis: row.get(base + 6)?,
            home_runs: row.get(base + 7)?,
            batting_average: row.get(base + 8)?,
            exit_velocity: row.get(base + 9)?,
            launch_angle: row.get(base + 10)?,
            created_at: row.get(base + 11)?,
            updated_at: row.get(base + 12)?,
        })
    }

    fn row_to_pitching(row: &Row) -> rusqlite::Result<PitchingStats> {
        Self::row_to_pitching_at(row, 0)
    }

    fn row_to_pitching_at(row: &Row, base: usize) -> rusqlite::Result<PitchingStats> {
        Ok(PitchingStats {
            player_id: PlayerId::new(row.get(base)?),
            season: Season::new(row.get(base + 1)?),
            games: row.get(base + 2)?,
            innings_pitched: row.get(base + 3)?,
            hits_allowed: row.get(base + 4)?,
            runs_allowed: row.get(base + 5)?,
            earned_runs: row.get(base + 6)?,
            walks: row.get(base + 7)?,
            strikeouts: row.get(base + 8)?,
            era: row.get(base + 9)?,
            velocity: row.get(base + 10)?,
            spin_rate: row.get(base + 11)?,
            created_at: row.get(base + 12)?,
            updated_at: row.get(base + 13)?,
        })
    }
}

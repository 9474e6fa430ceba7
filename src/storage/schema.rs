//! Database schema and connection management

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// Database connection manager for the local stats store.
///
/// Stats tables are keyed by (player_id, season): the composite primary key
/// plus `ON CONFLICT` upserts is what enforces the one-row-per-season
/// invariant, including when two requests race to sync the same key.
pub struct StatsDatabase {
    pub(crate) conn: Connection,
}

impl StatsDatabase {
    /// Open (creating if necessary) the database at `path` and ensure the
    /// schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute("PRAGMA foreign_keys = ON", [])?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                team_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                abbreviation TEXT NOT NULL UNIQUE,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        // player_id comes from the external provider when sourced externally
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                position TEXT,
                team_id INTEGER REFERENCES teams(team_id),
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        // Join context only; the sync path never writes games
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS games (
                game_id INTEGER PRIMARY KEY,
                date TEXT NOT NULL,
                home_team_id INTEGER REFERENCES teams(team_id),
                away_team_id INTEGER REFERENCES teams(team_id),
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS batting_stats (
                player_id INTEGER NOT NULL REFERENCES players(player_id),
                season INTEGER NOT NULL,
                games INTEGER NOT NULL DEFAULT 0,
                at_bats INTEGER NOT NULL DEFAULT 0,
                hits INTEGER NOT NULL DEFAULT 0,
                runs INTEGER NOT NULL DEFAULT 0,
                rbis INTEGER NOT NULL DEFAULT 0,
                home_runs INTEGER NOT NULL DEFAULT 0,
                batting_average REAL NOT NULL DEFAULT 0,
                exit_velocity REAL,
                launch_angle REAL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (player_id, season)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS pitching_stats (
                player_id INTEGER NOT NULL REFERENCES players(player_id),
                season INTEGER NOT NULL,
                games INTEGER NOT NULL DEFAULT 0,
                innings_pitched REAL NOT NULL DEFAULT 0,
                hits_allowed INTEGER NOT NULL DEFAULT 0,
                runs_allowed INTEGER NOT NULL DEFAULT 0,
                earned_runs INTEGER NOT NULL DEFAULT 0,
                walks INTEGER NOT NULL DEFAULT 0,
                strikeouts INTEGER NOT NULL DEFAULT 0,
                era REAL NOT NULL DEFAULT 0,
                velocity REAL,
                spin_rate REAL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (player_id, season)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        // Indexes for the filtered lookups
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_batting_season ON batting_stats(season)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_pitching_season ON pitching_stats(season)",
            [],
        )?;
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id)",
            [],
        )?;

        Ok(())
    }
}

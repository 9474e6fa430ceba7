//! MLB Statistics Query Service
//!
//! A Rust library and CLI for querying baseball season statistics, backed by
//! a local SQLite store that backfills opportunistically from the MLB stats
//! API.
//!
//! ## Features
//!
//! - **Filtered Queries**: Season stat lookups by team, player, and inclusive
//!   minimum thresholds (games, at-bats, home runs, innings, strikeouts)
//! - **Opportunistic Backfill**: Empty season queries trigger one external
//!   sync before giving up, so cold databases warm themselves
//! - **Explicit Sync**: Player and full-roster sync commands with per-player
//!   outcome reporting
//! - **Player Search**: Local-first name search that persists external hits
//! - **Statcast**: Advanced-metric leaderboards from a secondary provider
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mlb_stats::{
//!     mlb::http::MlbClient,
//!     query::{QueryEngine, StatsQuery},
//!     storage::StatsDatabase,
//!     Season, StatType,
//! };
//!
//! # async fn example() -> mlb_stats::Result<()> {
//! let db = StatsDatabase::open("stats.db")?;
//! let client = MlbClient::new("https://statsapi.mlb.com/api/v1")?;
//! let mut engine = QueryEngine::new(db, client);
//!
//! let query = StatsQuery {
//!     stat_type: StatType::Batting,
//!     season: Some(Season::new(2024)),
//!     team: Some("LAD".to_string()),
//!     ..Default::default()
//! };
//! let rows = engine.lookup_stats(&query).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! All knobs are environment variables with development defaults:
//! ```bash
//! export MLB_STATS_DB=/var/lib/mlb-stats/stats.db
//! export MLB_STATS_API_URL=https://statsapi.mlb.com/api/v1
//! export MLB_STATS_API_TOKEN=dev-token
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod mlb;
pub mod query;
pub mod storage;
pub mod sync;

// Re-export commonly used types
pub use cli::types::{PlayerId, Season, StatType, TeamId};
pub use error::{Result, StatsError};
pub use storage::{StatLine, StatRow, StatsDatabase};

//! Database initialization and optional development seed data.

use crate::{
    api::ADMIN_USERNAME,
    core::Config,
    storage::{StatsDatabase, User},
    Result,
};

/// Development seed: a few well-known franchises.
const SEED_TEAMS: [(&str, &str); 3] = [
    ("New York Yankees", "NYY"),
    ("Boston Red Sox", "BOS"),
    ("Los Angeles Dodgers", "LAD"),
];

/// Create the database schema, optionally seeding development fixtures.
///
/// Seeding is idempotent: teams upsert by abbreviation and the admin user
/// is only created when absent.
pub fn handle_init(seed: bool) -> Result<()> {
    let config = Config::from_env()?;
    println!("Initializing database at {}...", config.database_path.display());
    let mut db = StatsDatabase::open(&config.database_path)?;

    if seed {
        for (name, abbreviation) in SEED_TEAMS {
            db.upsert_team(name, abbreviation)?;
        }
        println!("✓ Seeded {} teams", SEED_TEAMS.len());

        if db.user_by_username(ADMIN_USERNAME)?.is_none() {
            db.upsert_user(&User {
                user_id: 0,
                username: ADMIN_USERNAME.to_string(),
                email: "admin@example.com".to_string(),
                password_hash: None,
            })?;
            println!("✓ Created {} user", ADMIN_USERNAME);
        }
    }

    println!("✓ Database initialized successfully");
    Ok(())
}

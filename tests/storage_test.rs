//! Integration tests for storage functionality

use mlb_stats::{storage::*, PlayerId, Season, TeamId};

fn create_test_db() -> StatsDatabase {
    StatsDatabase::open_in_memory().unwrap()
}

fn create_test_db_with_player() -> StatsDatabase {
    let mut db = create_test_db();
    let player = Player {
        player_id: PlayerId::new(545361),
        name: "Mike Trout".to_string(),
        position: Some("CF".to_string()),
        team_id: None,
    };
    db.upsert_player(&player).unwrap();
    db
}

fn batting(player_id: i64, season: u16, home_runs: u32) -> BattingStats {
    let mut stats = BattingStats::empty(PlayerId::new(player_id), Season::new(season));
    stats.games = 100;
    stats.at_bats = 400;
    stats.hits = 120;
    stats.home_runs = home_runs;
    stats.batting_average = 0.300;
    stats
}

#[test]
fn test_database_creation_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("stats.db");

    // Parent directories are created on demand.
    let _db = StatsDatabase::open(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_team_upsert_is_keyed_by_abbreviation() {
    let mut db = create_test_db();

    let first = db.upsert_team("Los Angeles Dodgers", "LAD").unwrap();
    let second = db.upsert_team("LA Dodgers", "LAD").unwrap();

    assert_eq!(first.team_id, second.team_id);
    let stored = db.team_by_abbreviation("LAD").unwrap().unwrap();
    assert_eq!(stored.name, "LA Dodgers");
}

#[test]
fn test_stats_upsert_keeps_one_row_per_player_season() {
    let mut db = create_test_db_with_player();

    db.upsert_batting_stats(&batting(545361, 2024, 5)).unwrap();
    db.upsert_batting_stats(&batting(545361, 2024, 10)).unwrap();

    let lines = db
        .batting_stats_for_player(PlayerId::new(545361), Some(Season::new(2024)))
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].home_runs, 10);
}

#[test]
fn test_stats_for_different_seasons_are_separate_rows() {
    let mut db = create_test_db_with_player();

    db.upsert_batting_stats(&batting(545361, 2023, 18)).unwrap();
    db.upsert_batting_stats(&batting(545361, 2024, 10)).unwrap();

    let lines = db
        .batting_stats_for_player(PlayerId::new(545361), None)
        .unwrap();
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_lookup_resolves_team_abbreviation() {
    let mut db = create_test_db();
    let team = db.upsert_team("Los Angeles Angels", "LAA").unwrap();
    db.upsert_player(&Player {
        player_id: PlayerId::new(545361),
        name: "Mike Trout".to_string(),
        position: Some("CF".to_string()),
        team_id: Some(team.team_id),
    })
    .unwrap();
    db.upsert_batting_stats(&batting(545361, 2024, 10)).unwrap();

    let rows = db
        .lookup_batting(
            Some(Season::new(2024)),
            Some(team.team_id),
            None,
            &ThresholdSet::default(),
        )
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].player.team, Some("LAA".to_string()));
}

#[test]
fn test_thresholds_are_inclusive() {
    let mut db = create_test_db_with_player();
    db.upsert_batting_stats(&batting(545361, 2024, 10)).unwrap();

    let thresholds = ThresholdSet {
        min_home_runs: Some(10),
        ..Default::default()
    };
    let rows = db
        .lookup_batting(Some(Season::new(2024)), None, None, &thresholds)
        .unwrap();
    assert_eq!(rows.len(), 1, "a row exactly at the threshold must match");

    let thresholds = ThresholdSet {
        min_home_runs: Some(11),
        ..Default::default()
    };
    let rows = db
        .lookup_batting(Some(Season::new(2024)), None, None, &thresholds)
        .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_zero_threshold_keeps_zero_valued_rows() {
    let mut db = create_test_db_with_player();
    db.upsert_batting_stats(&batting(545361, 2024, 0)).unwrap();

    let thresholds = ThresholdSet {
        min_home_runs: Some(0),
        ..Default::default()
    };
    let rows = db
        .lookup_batting(Some(Season::new(2024)), None, None, &thresholds)
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_pitching_roundtrip_and_lookup() {
    let mut db = create_test_db();
    db.upsert_player(&Player {
        player_id: PlayerId::new(434378),
        name: "Justin Verlander".to_string(),
        position: Some("P".to_string()),
        team_id: None,
    })
    .unwrap();

    let mut stats = PitchingStats::empty(PlayerId::new(434378), Season::new(2024));
    stats.games = 30;
    stats.innings_pitched = 180.1;
    stats.strikeouts = 190;
    stats.era = 3.22;
    db.upsert_pitching_stats(&stats).unwrap();

    let thresholds = ThresholdSet {
        min_innings: Some(150.0),
        min_strikeouts: Some(150),
        ..Default::default()
    };
    let rows = db
        .lookup_pitching(Some(Season::new(2024)), None, None, &thresholds)
        .unwrap();
    assert_eq!(rows.len(), 1);
    match &rows[0].stats {
        StatLine::Pitching(p) => {
            assert_eq!(p.strikeouts, 190);
            assert!((p.era - 3.22).abs() < f64::EPSILON);
        }
        _ => panic!("expected a pitching line"),
    }
}

#[test]
fn test_local_search_is_case_insensitive_and_capped() {
    let mut db = create_test_db();
    for i in 0..15 {
        db.upsert_player(&Player {
            player_id: PlayerId::new(1000 + i),
            name: format!("Smith {}", i),
            position: None,
            team_id: None,
        })
        .unwrap();
    }

    let hits = db.search_players_local("smith", 10).unwrap();
    assert_eq!(hits.len(), 10);
}

#[test]
fn test_player_summary_serialization_shape() {
    let mut db = create_test_db();
    let team = db.upsert_team("Los Angeles Angels", "LAA").unwrap();
    db.upsert_player(&Player {
        player_id: PlayerId::new(545361),
        name: "Mike Trout".to_string(),
        position: Some("CF".to_string()),
        team_id: Some(team.team_id),
    })
    .unwrap();

    let summary = db.player_summary(PlayerId::new(545361)).unwrap().unwrap();
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["id"], 545361);
    assert_eq!(value["name"], "Mike Trout");
    assert_eq!(value["team"], "LAA");
    assert_eq!(value["position"], "CF");

    // And it round-trips.
    let back: PlayerSummary = serde_json::from_value(value).unwrap();
    assert_eq!(back, summary);
}

#[test]
fn test_games_table_roundtrip() {
    let mut db = create_test_db();
    let home = db.upsert_team("New York Yankees", "NYY").unwrap();
    let away = db.upsert_team("Boston Red Sox", "BOS").unwrap();

    let game = Game {
        game_id: 1,
        date: chrono::NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
        home_team_id: Some(home.team_id),
        away_team_id: Some(away.team_id),
    };
    db.insert_game(&game).unwrap();
}

#[test]
fn test_players_by_team() {
    let mut db = create_test_db();
    let team = db.upsert_team("Los Angeles Dodgers", "LAD").unwrap();
    let other = db.upsert_team("New York Yankees", "NYY").unwrap();

    for (id, name, team_id) in [
        (660271, "Shohei Ohtani", Some(team.team_id)),
        (605141, "Mookie Betts", Some(team.team_id)),
        (592450, "Aaron Judge", Some(other.team_id)),
    ] {
        db.upsert_player(&Player {
            player_id: PlayerId::new(id),
            name: name.to_string(),
            position: None,
            team_id,
        })
        .unwrap();
    }

    let members = db.players_by_team(team.team_id).unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|p| p.team_id == Some(team.team_id)));
    assert!(!members
        .iter()
        .any(|p| p.player_id == PlayerId::new(592450)));
}

#[test]
fn test_unknown_team_id_in_lookup_matches_nothing() {
    let mut db = create_test_db_with_player();
    db.upsert_batting_stats(&batting(545361, 2024, 10)).unwrap();

    let rows = db
        .lookup_batting(
            Some(Season::new(2024)),
            Some(TeamId::new(999)),
            None,
            &ThresholdSet::default(),
        )
        .unwrap();
    assert!(rows.is_empty());
}

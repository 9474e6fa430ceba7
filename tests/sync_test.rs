//! Integration tests for the sync path: normalization, outcomes, and
//! roster isolation.

mod common;

use common::{batting_line, pitching_line, roster_entry, TestProvider};
use mlb_stats::{
    mlb::types::RawStatLine,
    storage::{Player, StatsDatabase},
    sync::{sync_player_season, sync_team_roster, SyncOutcome},
    PlayerId, Season, StatType,
};
use std::sync::atomic::Ordering;

fn db_with_player(id: i64, name: &str) -> StatsDatabase {
    let mut db = StatsDatabase::open_in_memory().unwrap();
    db.upsert_player(&Player {
        player_id: PlayerId::new(id),
        name: name.to_string(),
        position: None,
        team_id: None,
    })
    .unwrap();
    db
}

#[tokio::test]
async fn test_sync_writes_normalized_batting_line() {
    let season = Season::new(2024);
    let provider = TestProvider::new().with_stat_line(
        PlayerId::new(545361),
        season,
        StatType::Batting,
        batting_line(29, 111, 29, 10, 0.261),
    );
    let mut db = db_with_player(545361, "Mike Trout");

    let outcome =
        sync_player_season(&mut db, &provider, PlayerId::new(545361), season, StatType::Batting)
            .await;
    assert!(matches!(outcome, SyncOutcome::Synced));

    let lines = db
        .batting_stats_for_player(PlayerId::new(545361), Some(season))
        .unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].hits, 29);
    assert!((lines[0].batting_average - 0.261).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_missing_counting_fields_default_to_zero() {
    let season = Season::new(2024);
    // Only home runs present; everything else absent from the payload.
    let line = RawStatLine {
        home_runs: Some(3),
        ..Default::default()
    };
    let provider =
        TestProvider::new().with_stat_line(PlayerId::new(545361), season, StatType::Batting, line);
    let mut db = db_with_player(545361, "Mike Trout");

    sync_player_season(&mut db, &provider, PlayerId::new(545361), season, StatType::Batting).await;

    let lines = db
        .batting_stats_for_player(PlayerId::new(545361), Some(season))
        .unwrap();
    assert_eq!(lines[0].home_runs, 3);
    assert_eq!(lines[0].rbis, 0);
    assert_eq!(lines[0].at_bats, 0);
    assert!((lines[0].batting_average - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_sync_for_unknown_player_is_a_noop() {
    let provider = TestProvider::new();
    let mut db = StatsDatabase::open_in_memory().unwrap();

    let outcome = sync_player_season(
        &mut db,
        &provider,
        PlayerId::new(42),
        Season::new(2024),
        StatType::Batting,
    )
    .await;

    assert!(matches!(outcome, SyncOutcome::PlayerMissing));
    assert_eq!(
        provider.player_stats_calls.load(Ordering::SeqCst),
        0,
        "no provider call for a locally unknown player"
    );
}

#[tokio::test]
async fn test_sync_with_empty_envelope_reports_no_data() {
    let provider = TestProvider::new();
    let mut db = db_with_player(545361, "Mike Trout");

    let outcome = sync_player_season(
        &mut db,
        &provider,
        PlayerId::new(545361),
        Season::new(2024),
        StatType::Batting,
    )
    .await;

    assert!(matches!(outcome, SyncOutcome::NoData));
    let lines = db
        .batting_stats_for_player(PlayerId::new(545361), None)
        .unwrap();
    assert!(lines.is_empty(), "NoData must not write a zeroed row");
}

#[tokio::test]
async fn test_repeated_sync_updates_in_place() {
    let season = Season::new(2024);
    let provider = TestProvider::new().with_stat_line(
        PlayerId::new(545361),
        season,
        StatType::Batting,
        batting_line(29, 111, 29, 10, 0.261),
    );
    let mut db = db_with_player(545361, "Mike Trout");

    for _ in 0..3 {
        let outcome = sync_player_season(
            &mut db,
            &provider,
            PlayerId::new(545361),
            season,
            StatType::Batting,
        )
        .await;
        assert!(matches!(outcome, SyncOutcome::Synced));
    }

    let lines = db
        .batting_stats_for_player(PlayerId::new(545361), Some(season))
        .unwrap();
    assert_eq!(lines.len(), 1, "repeat syncs must never duplicate rows");
}

#[tokio::test]
async fn test_roster_sync_counts_and_isolation() {
    let season = Season::new(2024);
    let mut db = StatsDatabase::open_in_memory().unwrap();
    let team = db.upsert_team("Los Angeles Dodgers", "LAD").unwrap();

    // Two pitchers known locally; the roster also lists a callup the local
    // database has never seen, which must be skipped rather than created.
    for (id, name) in [(477132, "Clayton Kershaw"), (669257, "Walker Buehler")] {
        db.upsert_player(&Player {
            player_id: PlayerId::new(id),
            name: name.to_string(),
            position: Some("P".to_string()),
            team_id: Some(team.team_id),
        })
        .unwrap();
    }

    let provider = TestProvider::new()
        .with_roster(
            team.team_id,
            vec![
                roster_entry(477132, "Clayton Kershaw"),
                roster_entry(669257, "Walker Buehler"),
                roster_entry(808967, "Prospect Arm"),
            ],
        )
        .with_stat_line(PlayerId::new(477132), season, StatType::Pitching, pitching_line(22, 126.0, 137, 2.46))
        .with_stat_line(PlayerId::new(669257), season, StatType::Pitching, pitching_line(16, 75.1, 64, 5.38));

    let report = sync_team_roster(&mut db, &provider, "LAD", season, StatType::Pitching)
        .await
        .unwrap();

    assert_eq!(report.synced, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);

    // The unknown callup was not created as a player.
    let members = db.players_by_team(team.team_id).unwrap();
    assert_eq!(members.len(), 2);

    assert_eq!(
        db.pitching_stats_for_player(PlayerId::new(477132), Some(season))
            .unwrap()
            .len(),
        1
    );
    assert!(db
        .pitching_stats_for_player(PlayerId::new(808967), Some(season))
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_roster_sync_unknown_team_errors() {
    let provider = TestProvider::new();
    let mut db = StatsDatabase::open_in_memory().unwrap();

    let result =
        sync_team_roster(&mut db, &provider, "XYZ", Season::new(2024), StatType::Pitching).await;
    assert!(result.is_err());
    assert_eq!(provider.roster_calls.load(Ordering::SeqCst), 0);
}

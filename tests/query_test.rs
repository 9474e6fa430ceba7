//! End-to-end query engine tests against a canned provider.

mod common;

use common::{batting_line, roster_entry, search_result, TestProvider};
use mlb_stats::{
    query::{QueryEngine, StatsQuery},
    storage::{Player, StatLine, StatsDatabase, ThresholdSet},
    PlayerId, Season, StatType,
};
use std::sync::atomic::Ordering;

fn engine_with(provider: TestProvider) -> QueryEngine<TestProvider> {
    QueryEngine::new(StatsDatabase::open_in_memory().unwrap(), provider)
}

/// Stats-less team query: one roster sync fills every known player's
/// season line, and the retried query returns them all.
#[tokio::test]
async fn test_team_query_backfills_whole_roster() {
    let season = Season::new(2024);
    let provider = TestProvider::new()
        .with_stat_line(PlayerId::new(660271), season, StatType::Batting, batting_line(159, 636, 197, 54, 0.310))
        .with_stat_line(PlayerId::new(605141), season, StatType::Batting, batting_line(116, 465, 137, 19, 0.295));

    let mut db = StatsDatabase::open_in_memory().unwrap();
    let team = db.upsert_team("Los Angeles Dodgers", "LAD").unwrap();
    for (id, name) in [(660271, "Shohei Ohtani"), (605141, "Mookie Betts")] {
        db.upsert_player(&Player {
            player_id: PlayerId::new(id),
            name: name.to_string(),
            position: None,
            team_id: Some(team.team_id),
        })
        .unwrap();
    }

    let provider = provider.with_roster(
        team.team_id,
        vec![
            roster_entry(660271, "Shohei Ohtani"),
            roster_entry(605141, "Mookie Betts"),
        ],
    );
    let mut engine = QueryEngine::new(db, provider);

    let query = StatsQuery {
        stat_type: StatType::Batting,
        season: Some(season),
        team: Some("LAD".to_string()),
        ..Default::default()
    };

    let rows = engine.lookup_stats(&query).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.player.team == Some("LAD".to_string())));
    assert_eq!(engine.provider().roster_calls.load(Ordering::SeqCst), 1);
}

/// A second empty result after the sync pass is final; only one provider
/// call is made per player.
#[tokio::test]
async fn test_empty_query_retries_exactly_once() {
    let mut engine = engine_with(TestProvider::new());
    engine
        .database()
        .upsert_player(&Player {
            player_id: PlayerId::new(545361),
            name: "Mike Trout".to_string(),
            position: Some("CF".to_string()),
            team_id: None,
        })
        .unwrap();

    let query = StatsQuery {
        stat_type: StatType::Batting,
        season: Some(Season::new(2024)),
        player_id: Some(PlayerId::new(545361)),
        ..Default::default()
    };

    let rows = engine.lookup_stats(&query).await.unwrap();
    assert!(rows.is_empty());

    // Run it again: still exactly one provider call per execution, never
    // a recursive cascade.
    let rows = engine.lookup_stats(&query).await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(engine_calls(&engine), 2);
}

#[tokio::test]
async fn test_unknown_team_abbreviation_is_silently_empty() {
    let mut engine = engine_with(TestProvider::new());
    let query = StatsQuery {
        stat_type: StatType::Batting,
        season: Some(Season::new(2024)),
        team: Some("XYZ".to_string()),
        ..Default::default()
    };

    let rows = engine.lookup_stats(&query).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_thresholds_filter_backfilled_rows() {
    let season = Season::new(2024);
    let provider = TestProvider::new().with_stat_line(
        PlayerId::new(545361),
        season,
        StatType::Batting,
        batting_line(29, 111, 29, 10, 0.261),
    );
    let mut engine = engine_with(provider);
    engine
        .database()
        .upsert_player(&Player {
            player_id: PlayerId::new(545361),
            name: "Mike Trout".to_string(),
            position: Some("CF".to_string()),
            team_id: None,
        })
        .unwrap();

    let query = StatsQuery {
        stat_type: StatType::Batting,
        season: Some(season),
        player_id: Some(PlayerId::new(545361)),
        thresholds: ThresholdSet {
            min_home_runs: Some(20),
            ..Default::default()
        },
        ..Default::default()
    };

    // Backfill writes the row, but it fails the threshold.
    let rows = engine.lookup_stats(&query).await.unwrap();
    assert!(rows.is_empty());

    let query = StatsQuery {
        thresholds: ThresholdSet {
            min_home_runs: Some(10),
            ..Default::default()
        },
        ..query
    };
    let rows = engine.lookup_stats(&query).await.unwrap();
    assert_eq!(rows.len(), 1);
    match &rows[0].stats {
        StatLine::Batting(b) => assert_eq!(b.home_runs, 10),
        _ => panic!("expected a batting line"),
    }
}

/// External search persists the hit under the provider's id, so the next
/// search is answered locally.
#[tokio::test]
async fn test_search_persists_external_hits() {
    let provider = TestProvider::new().with_search_result(search_result(
        545361,
        "Mike Trout",
        Some("Los Angeles Angels"),
        Some("CF"),
    ));
    let mut engine = engine_with(provider);
    engine
        .database()
        .upsert_team("Los Angeles Angels", "LAA")
        .unwrap();

    let hits = engine.search_players("trout").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, PlayerId::new(545361));
    assert_eq!(hits[0].team, Some("LAA".to_string()));

    let hits = engine.search_players("trout").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(
        engine_search_calls(&engine),
        1,
        "second search must be local"
    );
}

// Accessor helpers: the engine owns the provider, so counters are read
// through small shims.
fn engine_calls(engine: &QueryEngine<TestProvider>) -> usize {
    engine.provider().player_stats_calls.load(Ordering::SeqCst)
}

fn engine_search_calls(engine: &QueryEngine<TestProvider>) -> usize {
    engine.provider().search_calls.load(Ordering::SeqCst)
}

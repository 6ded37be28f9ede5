//! Store round-trip tests against an in-memory database.

mod support;

use boxscore_core::{
    engine::{GameStatRows, GameStatsEngine},
    store::{StatTable, StatsStore, SyncRunSummary},
    types::Split,
};
use chrono::{TimeZone, Utc};
use support::{feed, running_event, scores, PlayBuilder, GAME};

const PITCHER: i64 = 500_100;

fn store() -> StatsStore {
    let store = StatsStore::in_memory().expect("open");
    store.migrate().expect("migrate");
    store
}

/// Single, two-run homer, then a steal of second.
fn game_rows(first_hit: &str) -> GameStatRows {
    let plays = vec![
        PlayBuilder::at_bat(1, PITCHER).event(first_hit, "Hit").pitches(0, 1).build(),
        PlayBuilder::at_bat(2, PITCHER)
            .event("home_run", "Home Run")
            .rbi(2)
            .men_on("Men_On")
            .pitches(1, 1)
            .runner(scores(1, Some("1B"), Some(PITCHER), true))
            .runner(scores(2, None, Some(PITCHER), true))
            .build(),
        PlayBuilder::at_bat(3, PITCHER)
            .event("single", "Single")
            .runner(running_event(3, "1B", Some("2B"), "stolen_base_2b"))
            .build(),
    ];
    GameStatsEngine::new().aggregate(GAME, &feed(plays))
}

#[test]
fn rows_read_back_as_written() {
    let store = store();
    let rows = game_rows("single");
    let written = store.upsert_game_rows(&rows).expect("upsert");
    assert_eq!(written, rows.len());

    for row in &rows.batting {
        let stored = store.batting_row(GAME, row.player_id, row.split).expect("query");
        assert_eq!(stored.as_ref(), Some(row));
    }
    for row in &rows.pitching {
        let stored = store.pitching_row(GAME, row.player_id, row.split).expect("query");
        assert_eq!(stored.as_ref(), Some(row));
    }
    let steal = store.baserunning_row(GAME, 3).expect("query").expect("row for runner 3");
    assert_eq!((steal.sb, steal.caught_stealing), (1, 0));
}

#[test]
fn upserting_twice_does_not_duplicate_rows() {
    let store = store();
    let rows = game_rows("single");
    store.upsert_game_rows(&rows).expect("first upsert");
    store.upsert_game_rows(&rows).expect("second upsert");

    assert_eq!(store.row_count(StatTable::Batting).expect("count"), rows.batting.len() as i64);
    assert_eq!(store.row_count(StatTable::Pitching).expect("count"), rows.pitching.len() as i64);
    assert_eq!(store.row_count(StatTable::Baserunning).expect("count"), 1);

    let batter = store.batting_row(GAME, 2, Split::VsRhp).expect("query").expect("row");
    assert_eq!((batter.hr, batter.rbi, batter.r), (1, 2, 1));
}

#[test]
fn reingesting_a_corrected_game_replaces_values() {
    let store = store();
    store.upsert_game_rows(&game_rows("single")).expect("upsert");
    store.upsert_game_rows(&game_rows("double")).expect("re-upsert");

    let batter = store.batting_row(GAME, 1, Split::VsRhp).expect("query").expect("row");
    assert_eq!((batter.h, batter.doubles, batter.tb), (1, 1, 2));

    let pitcher = store.pitching_row(GAME, PITCHER, Split::VsRhb).expect("query").expect("row");
    assert_eq!(pitcher.doubles, 1);
}

#[test]
fn batch_upsert_keeps_games_apart() {
    let store = store();
    let first = game_rows("single");
    let mut second = game_rows("single");
    second.game_id = GAME + 1;
    for row in &mut second.batting {
        row.game_id = GAME + 1;
    }
    for row in &mut second.pitching {
        row.game_id = GAME + 1;
    }
    for row in &mut second.baserunning {
        row.game_id = GAME + 1;
    }

    let written = store.upsert_batch(&[first.clone(), second]).expect("batch");
    assert_eq!(written, first.len() * 2);
    for game in [GAME, GAME + 1] {
        let count = store.row_count_for_game(StatTable::Batting, game).expect("count");
        assert_eq!(count, first.batting.len() as i64);
    }
}

#[test]
fn missing_rows_read_as_none() {
    let store = store();
    assert!(store.batting_row(GAME, 1, Split::Risp).expect("query").is_none());
    assert!(store.baserunning_row(GAME, 1).expect("query").is_none());
}

#[test]
fn sync_run_summary_appears_once_finished() {
    let store = store();
    let started = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
    store.insert_sync_run("run-1", started).expect("insert");
    assert_eq!(store.sync_run_summary("run-1").expect("query"), None);

    let summary = SyncRunSummary { games_ok: 14, games_failed: 1, games_skipped: 2 };
    let finished = Utc.with_ymd_and_hms(2024, 4, 1, 12, 5, 0).unwrap();
    store.finish_sync_run("run-1", finished, summary).expect("finish");
    assert_eq!(store.sync_run_summary("run-1").expect("query"), Some(summary));
}

//! Pitching aggregator tests.
//!
//! Tests cover: batter-faced lines, outs and innings, pitch tallies,
//! pitching changes with inherited runners, run attribution to the
//! responsible pitcher, and the activity filter on emitted lines.

mod support;

use boxscore_core::{
    aggregator::StatAggregator,
    pitching::{innings_from_outs, PitchingAggregator, PitchingRow},
    types::Split,
};
use serde_json::json;
use support::{feed, moves, put_out, scores, PlayBuilder, GAME};

fn rows(plays: Vec<serde_json::Value>) -> Vec<PitchingRow> {
    PitchingAggregator::new().build_rows(GAME, &feed(plays))
}

fn find(rows: &[PitchingRow], pitcher: i64, split: Split) -> Option<&PitchingRow> {
    rows.iter().find(|r| r.player_id == pitcher && r.split == split)
}

fn line(rows: &[PitchingRow], pitcher: i64, split: Split) -> &PitchingRow {
    find(rows, pitcher, split)
        .unwrap_or_else(|| panic!("no pitching line for pitcher {pitcher} split {split}"))
}

const STARTER: i64 = 605_400;
const RELIEVER: i64 = 621_111;

#[test]
fn batters_faced_are_split_by_bat_side() {
    let rows = rows(vec![
        PlayBuilder::at_bat(1, STARTER)
            .bats("L")
            .event("strikeout", "Strikeout")
            .out()
            .pitches(1, 3)
            .runner(put_out(1, None))
            .build(),
        PlayBuilder::at_bat(2, STARTER)
            .event("double", "Double")
            .pitches(2, 1)
            .runner(moves(2, None, Some("2B")))
            .build(),
        PlayBuilder::at_bat(3, STARTER)
            .event("walk", "Walk")
            .pitches(4, 0)
            .runner(moves(3, None, Some("1B")))
            .runner(moves(2, Some("2B"), Some("2B")))
            .build(),
    ]);

    let lhb = line(&rows, STARTER, Split::VsLhb);
    assert_eq!((lhb.batters_faced, lhb.k, lhb.ab, lhb.outs_pitched), (1, 1, 1, 1));
    assert_eq!((lhb.pitches_thrown, lhb.balls_thrown, lhb.strikes_thrown), (4, 1, 3));

    let rhb = line(&rows, STARTER, Split::VsRhb);
    assert_eq!((rhb.batters_faced, rhb.h, rhb.doubles, rhb.bb, rhb.ab), (2, 1, 1, 1, 1));
    assert_eq!((rhb.pitches_thrown, rhb.balls_thrown, rhb.strikes_thrown), (7, 6, 1));

    // The walk started with a runner on second.
    let risp = line(&rows, STARTER, Split::Risp);
    assert_eq!((risp.batters_faced, risp.bb, risp.pitches_thrown), (1, 1, 4));
}

#[test]
fn unknown_bat_side_counts_as_right_handed() {
    let rows = rows(vec![PlayBuilder::at_bat(1, STARTER)
        .bats("")
        .throws("")
        .event("single", "Single")
        .build()]);

    assert_eq!(rows.len(), 1);
    assert_eq!(line(&rows, STARTER, Split::VsRhb).h, 1);
}

#[test]
fn outs_fall_back_to_the_batter() {
    let rows = rows(vec![
        // Batter out, no runner movement recorded.
        PlayBuilder::at_bat(1, STARTER).event("field_out", "Flyout").out().build(),
        // Double play: two out-flagged movements.
        PlayBuilder::at_bat(2, STARTER)
            .event("grounded_into_double_play", "Grounded Into DP")
            .out()
            .runner(put_out(2, None))
            .runner(put_out(9, Some("1B")))
            .build(),
        PlayBuilder::at_bat(3, STARTER)
            .event("field_out", "Groundout")
            .out()
            .runner(put_out(3, None))
            .build(),
        PlayBuilder::at_bat(4, STARTER)
            .event("field_out", "Pop Out")
            .out()
            .runner(put_out(4, None))
            .build(),
    ]);

    let l = line(&rows, STARTER, Split::VsRhb);
    assert_eq!(l.outs_pitched, 5);
    assert_eq!(l.ip, innings_from_outs(5));
}

#[test]
fn innings_use_box_score_notation() {
    assert_eq!(innings_from_outs(0), 0.0);
    assert_eq!(innings_from_outs(3), 1.0);
    assert!((innings_from_outs(7) - 2.1).abs() < 1e-9);
    assert!((innings_from_outs(20) - 6.2).abs() < 1e-9);
}

#[test]
fn intentional_walks_and_home_runs_use_substrings() {
    let rows = rows(vec![
        PlayBuilder::at_bat(1, STARTER).event("intent_walk", "Intent Walk").build(),
        PlayBuilder::at_bat(2, STARTER)
            .event("home_run", "Home Run")
            .runner(scores(2, None, Some(STARTER), true))
            .build(),
        PlayBuilder::at_bat(3, STARTER).event("sac_bunt", "Sac Bunt").out().build(),
    ]);

    let l = line(&rows, STARTER, Split::VsRhb);
    assert_eq!((l.bb, l.intentional_walks), (1, 1));
    assert_eq!((l.h, l.hr), (1, 1));
    assert_eq!(l.ab, 1, "walks and sacrifices are not at-bats");
    assert_eq!((l.r, l.er), (1, 1));
}

#[test]
fn non_batter_plays_only_add_pitch_counts() {
    let rows = rows(vec![PlayBuilder::at_bat(1, STARTER)
        .bats("L")
        .result_type("action")
        .event("wild_pitch", "Wild Pitch")
        .play_event(json!({ "isPitch": true, "details": { "isBall": true, "eventType": "wild_pitch" } }))
        .play_event(json!({ "type": "action", "details": { "eventType": "balk" } }))
        .runner(moves(7, Some("1B"), Some("2B")))
        .build()]);

    let l = line(&rows, STARTER, Split::VsLhb);
    assert_eq!(l.batters_faced, 0);
    assert_eq!((l.pitches_thrown, l.balls_thrown, l.strikes_thrown), (1, 1, 0));
    assert_eq!((l.wild_pitches, l.balks), (1, 1));
    assert_eq!((l.outs_pitched, l.ab), (0, 0));
}

#[test]
fn reliever_inherits_runners_and_outgoing_pitcher_keeps_the_run() {
    let rows = rows(vec![
        PlayBuilder::at_bat(1, STARTER)
            .bats("L")
            .event("single", "Single")
            .runner(moves(1, None, Some("1B")))
            .build(),
        PlayBuilder::at_bat(2, STARTER)
            .event("walk", "Walk")
            .runner(moves(2, None, Some("1B")))
            .runner(moves(1, Some("1B"), Some("2B")))
            .build(),
        // Pitching change: two runners on.
        PlayBuilder::at_bat(3, RELIEVER)
            .bats("L")
            .event("single", "Single")
            .runner(scores(1, Some("2B"), Some(STARTER), true))
            .runner(moves(2, Some("1B"), Some("3B")))
            .runner(moves(3, None, Some("1B")))
            .build(),
    ]);

    let relief = line(&rows, RELIEVER, Split::VsLhb);
    assert_eq!(relief.inherited_runners, 2);
    assert_eq!(relief.inherited_runners_scored, 1);
    assert_eq!((relief.r, relief.er), (0, 0));
    assert_eq!((relief.batters_faced, relief.h), (1, 1));

    let relief_risp = line(&rows, RELIEVER, Split::Risp);
    assert_eq!(relief_risp.batters_faced, 1);
    assert_eq!(relief_risp.inherited_runners, 0);

    // Runner 1 reached against the starter as a left-handed batter.
    let starter = line(&rows, STARTER, Split::VsLhb);
    assert_eq!((starter.r, starter.er, starter.batters_faced), (1, 1, 1));
    assert_eq!(starter.inherited_runners_scored, 0);
    assert_eq!(line(&rows, STARTER, Split::VsRhb).bb, 1);
}

#[test]
fn inherited_runner_total_matches_on_base_state_at_each_change() {
    let rows = rows(vec![
        PlayBuilder::at_bat(1, STARTER)
            .event("single", "Single")
            .runner(moves(1, None, Some("1B")))
            .build(),
        // Change with one on.
        PlayBuilder::at_bat(2, RELIEVER)
            .event("field_out", "Flyout")
            .out()
            .runner(put_out(2, None))
            .runner(moves(1, Some("1B"), Some("1B")))
            .build(),
        // Change with one on, batter bats left.
        PlayBuilder::at_bat(3, 700_001)
            .bats("L")
            .event("strikeout", "Strikeout")
            .out()
            .runner(put_out(3, None))
            .build(),
        // Change with the bases empty: nothing charged.
        PlayBuilder::at_bat(4, 700_002).event("single", "Single").build(),
    ]);

    let total: i64 = rows.iter().map(|r| r.inherited_runners).sum();
    assert_eq!(total, 2);
    assert_eq!(line(&rows, RELIEVER, Split::VsRhb).inherited_runners, 1);
    assert_eq!(line(&rows, 700_001, Split::VsLhb).inherited_runners, 1);
    assert_eq!(line(&rows, 700_002, Split::VsRhb).inherited_runners, 0);
}

#[test]
fn run_without_responsible_pitcher_goes_to_the_pitcher_on_the_mound() {
    let rows = rows(vec![PlayBuilder::at_bat(5, STARTER)
        .bats("L")
        .event("double", "Double")
        .runner(scores(88, Some("2B"), None, false))
        .runner(moves(5, None, Some("2B")))
        .build()]);

    // Runner 88 never batted in this feed: default split.
    let l = line(&rows, STARTER, Split::VsRhb);
    assert_eq!((l.r, l.er, l.inherited_runners_scored), (1, 0, 0));
    assert_eq!(l.batters_faced, 0);
    assert_eq!(line(&rows, STARTER, Split::VsLhb).batters_faced, 1);
}

#[test]
fn lines_without_activity_are_not_emitted() {
    let rows = rows(vec![
        PlayBuilder::at_bat(1, STARTER).event("single", "Single").build(),
        // A pitcher appearing on a play with no pitches, no batter faced, no runs.
        PlayBuilder::at_bat(2, RELIEVER).result_type("action").build(),
    ]);

    assert!(find(&rows, RELIEVER, Split::VsRhb).is_none(), "idle line emitted: {rows:?}");
    assert_eq!(rows.len(), 1);
}

#[test]
fn plays_without_a_pitcher_contribute_nothing() {
    let rows = rows(vec![
        PlayBuilder::at_bat(1, STARTER)
            .without_pitcher()
            .event("home_run", "Home Run")
            .pitches(1, 1)
            .runner(scores(1, None, Some(STARTER), true))
            .build(),
    ]);
    assert!(rows.is_empty(), "expected no lines, got {rows:?}");
}

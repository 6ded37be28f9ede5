//! Pitching aggregator: the pitcher-side box score.
//!
//! Builds one line per (game, pitcher, split), where the split is the
//! batter's side (unknown sides count as right-handed) plus the RISP
//! overlay. On top of per-play counting it tracks, within one game:
//!   - the pitcher on the mound, to detect pitching changes,
//!   - the runners left on base after each play, charged as inherited
//!     runners to an entering reliever,
//!   - the split each batter was put on base under, so that a run the
//!     runner later scores lands on the matching split of the pitcher the
//!     feed holds responsible.
//!
//! Processing order per play (fixed):
//!   1. resolve the pitcher (skip the play without one)
//!   2. pitching-change check
//!   3. batter-faced stats, or pitch counts only
//!   4. run attribution
//!   5. on-base state for the next play

use crate::{
    aggregator::StatAggregator,
    feed::{GameFeed, Play},
    normalizer::{
        batter_hand_split, counts_as_at_bat, is_at_bat_result, is_risp_start, is_strikeout,
        is_walk, PitchTally,
    },
    types::{GameId, LineKey, PlayerId, Split},
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Split charged for a scoring runner whose plate appearance was never seen.
const UNKNOWN_RUNNER_SPLIT: Split = Split::VsRhb;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PitchLine {
    pub outs_pitched:             i64,
    pub ab:                       i64,
    pub pitches_thrown:           i64,
    pub h:                        i64,
    pub doubles:                  i64,
    pub triples:                  i64,
    pub hr:                       i64,
    pub bb:                       i64,
    pub k:                        i64,
    pub intentional_walks:        i64,
    pub r:                        i64,
    pub er:                       i64,
    pub batters_faced:            i64,
    pub balls_thrown:             i64,
    pub strikes_thrown:           i64,
    pub balks:                    i64,
    pub wild_pitches:             i64,
    pub inherited_runners:        i64,
    pub inherited_runners_scored: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchingRow {
    pub game_id:                  GameId,
    pub player_id:                PlayerId,
    pub split:                    Split,
    pub outs_pitched:             i64,
    pub ip:                       f64,
    pub ab:                       i64,
    pub pitches_thrown:           i64,
    pub h:                        i64,
    pub doubles:                  i64,
    pub triples:                  i64,
    pub hr:                       i64,
    pub bb:                       i64,
    pub k:                        i64,
    pub intentional_walks:        i64,
    pub r:                        i64,
    pub er:                       i64,
    pub batters_faced:            i64,
    pub balls_thrown:             i64,
    pub strikes_thrown:           i64,
    pub balks:                    i64,
    pub wild_pitches:             i64,
    pub inherited_runners:        i64,
    pub inherited_runners_scored: i64,
}

/// Innings pitched in box-score notation: 7 outs -> 2.1.
pub fn innings_from_outs(outs: i64) -> f64 {
    (outs / 3) as f64 + 0.1 * (outs % 3) as f64
}

impl PitchLine {
    /// Lines that were only touched lazily carry nothing worth emitting.
    pub fn has_activity(&self) -> bool {
        self.batters_faced > 0
            || self.outs_pitched > 0
            || self.pitches_thrown > 0
            || self.r > 0
            || self.er > 0
            || self.inherited_runners > 0
            || self.inherited_runners_scored > 0
    }

    pub fn to_row(&self, key: LineKey) -> PitchingRow {
        PitchingRow {
            game_id:                  key.game_id,
            player_id:                key.player_id,
            split:                    key.split,
            outs_pitched:             self.outs_pitched,
            ip:                       innings_from_outs(self.outs_pitched),
            ab:                       self.ab,
            pitches_thrown:           self.pitches_thrown,
            h:                        self.h,
            doubles:                  self.doubles,
            triples:                  self.triples,
            hr:                       self.hr,
            bb:                       self.bb,
            k:                        self.k,
            intentional_walks:        self.intentional_walks,
            r:                        self.r,
            er:                       self.er,
            batters_faced:            self.batters_faced,
            balls_thrown:             self.balls_thrown,
            strikes_thrown:           self.strikes_thrown,
            balks:                    self.balks,
            wild_pitches:             self.wild_pitches,
            inherited_runners:        self.inherited_runners,
            inherited_runners_scored: self.inherited_runners_scored,
        }
    }

    fn add_tally(&mut self, tally: PitchTally) {
        self.pitches_thrown += tally.pitches;
        self.balls_thrown += tally.balls;
        self.strikes_thrown += tally.strikes;
        self.balks += tally.balks;
        self.wild_pitches += tally.wild_pitches;
    }

    /// Apply one batter faced to this line.
    fn apply_batter_faced(&mut self, play: &Play) {
        self.batters_faced += 1;
        self.add_tally(PitchTally::from_play(play));
        self.outs_pitched += outs_on_play(play);

        let et = play.event_type();
        if is_walk(&et) {
            self.bb += 1;
            if et.contains("intent") {
                self.intentional_walks += 1;
            }
        }
        if is_strikeout(&et) {
            self.k += 1;
        }

        match et.as_str() {
            "single" => self.h += 1,
            "double" => {
                self.h += 1;
                self.doubles += 1;
            }
            "triple" => {
                self.h += 1;
                self.triples += 1;
            }
            _ if et.contains("home_run") => {
                self.h += 1;
                self.hr += 1;
            }
            _ => {}
        }

        if counts_as_at_bat(&et) {
            self.ab += 1;
        }
    }
}

/// Out-flagged runner movements; a play marked out with none recorded
/// is the batter alone.
fn outs_on_play(play: &Play) -> i64 {
    let outs = play.runners.iter().filter(|r| r.is_out()).count() as i64;
    if outs == 0 && play.is_out() {
        1
    } else {
        outs
    }
}

/// A completed at-bat with both participants known. Unlike a batting
/// plate appearance, the event-type exclusion list is not consulted.
fn is_batter_faced(play: &Play) -> bool {
    is_at_bat_result(play)
        && play.is_complete()
        && play.pitcher_id().is_some()
        && play.batter_id().is_some()
}

/// Cross-play state; lives for exactly one build_rows() call.
#[derive(Debug, Default)]
struct GameState {
    current_pitcher: Option<PlayerId>,
    /// Split each batter was last put on base under.
    runner_splits:   HashMap<PlayerId, Split>,
    /// Runners on base entering the next play.
    on_base:         BTreeSet<PlayerId>,
}

#[derive(Debug, Default)]
pub struct PitchingAggregator {
    lines: BTreeMap<LineKey, PitchLine>,
    state: GameState,
}

impl PitchingAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, key: LineKey) -> &mut PitchLine {
        self.lines.entry(key).or_default()
    }

    /// Adopt `pitcher_id` as the pitcher on the mound. A reliever is
    /// charged with the runners currently on base.
    fn track_pitching_change(&mut self, game_id: GameId, pitcher_id: PlayerId, play: &Play) {
        match self.state.current_pitcher {
            None => self.state.current_pitcher = Some(pitcher_id),
            Some(current) if current != pitcher_id => {
                let inherited = self.state.on_base.len() as i64;
                if inherited > 0 {
                    // Best guess: the split of the first batter the reliever faces.
                    let split = batter_hand_split(play);
                    self.line(LineKey::new(game_id, pitcher_id, split)).inherited_runners +=
                        inherited;
                }
                log::debug!(
                    "game={game_id} pitching change {current} -> {pitcher_id}, \
                     inherited={inherited}"
                );
                self.state.current_pitcher = Some(pitcher_id);
            }
            Some(_) => {}
        }
    }

    fn process_batter_faced(&mut self, game_id: GameId, pitcher_id: PlayerId, play: &Play) {
        let Some(batter_id) = play.batter_id() else {
            return;
        };
        let split = batter_hand_split(play);
        self.state.runner_splits.insert(batter_id, split);

        self.line(LineKey::new(game_id, pitcher_id, split)).apply_batter_faced(play);
        if is_risp_start(play) {
            self.line(LineKey::new(game_id, pitcher_id, Split::Risp))
                .apply_batter_faced(play);
        }
    }

    fn process_pitches_only(&mut self, game_id: GameId, pitcher_id: PlayerId, play: &Play) {
        let split = batter_hand_split(play);
        self.line(LineKey::new(game_id, pitcher_id, split))
            .add_tally(PitchTally::from_play(play));
    }

    /// Charge every run scored on the play to the pitcher the feed holds
    /// responsible, falling back to the pitcher on the mound.
    fn attribute_runs(&mut self, game_id: GameId, current_pitcher: PlayerId, play: &Play) {
        for runner in play.runners.iter().filter(|r| r.is_scoring()) {
            let Some(runner_id) = runner.runner_id() else {
                log::warn!("game={game_id}: scoring runner without an id, run skipped");
                continue;
            };
            let responsible = runner.responsible_pitcher_id().unwrap_or(current_pitcher);
            let split = self
                .state
                .runner_splits
                .get(&runner_id)
                .copied()
                .unwrap_or(UNKNOWN_RUNNER_SPLIT);

            let line = self.line(LineKey::new(game_id, responsible, split));
            line.r += 1;
            if runner.is_earned() {
                line.er += 1;
            }

            if responsible != current_pitcher {
                let current_split = batter_hand_split(play);
                self.line(LineKey::new(game_id, current_pitcher, current_split))
                    .inherited_runners_scored += 1;
            }
        }
    }

    fn update_on_base(&mut self, play: &Play) {
        self.state.on_base = play
            .runners
            .iter()
            .filter(|r| !r.is_out())
            .filter(|r| r.end_base().is_some_and(|b| b.is_occupiable()))
            .filter_map(|r| r.runner_id())
            .collect();
    }
}

impl StatAggregator for PitchingAggregator {
    type Row = PitchingRow;

    fn name(&self) -> &'static str {
        "pitching"
    }

    fn build_rows(&mut self, game_id: GameId, feed: &GameFeed) -> Vec<PitchingRow> {
        self.lines.clear();
        self.state = GameState::default();

        for play in &feed.all_plays {
            let Some(pitcher_id) = play.pitcher_id() else {
                continue;
            };

            self.track_pitching_change(game_id, pitcher_id, play);

            if is_batter_faced(play) {
                self.process_batter_faced(game_id, pitcher_id, play);
            } else {
                self.process_pitches_only(game_id, pitcher_id, play);
            }

            self.attribute_runs(game_id, pitcher_id, play);
            self.update_on_base(play);
        }

        let rows: Vec<PitchingRow> = self
            .lines
            .iter()
            .filter(|(_, line)| line.has_activity())
            .map(|(key, line)| line.to_row(*key))
            .collect();

        log::debug!(
            "game={game_id} {}: {} lines, {} emitted",
            self.name(),
            self.lines.len(),
            rows.len()
        );
        rows
    }
}

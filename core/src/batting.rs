//! Batting aggregator.
//!
//! Builds one line per (game, batter, split) from completed plate
//! appearances. The split is the pitcher's throwing hand; plays with an
//! unknown hand are dropped entirely. Plays that start with a runner in
//! scoring position are counted a second time under the RISP overlay.

use crate::{
    aggregator::StatAggregator,
    feed::{GameFeed, Play},
    normalizer::{
        counts_as_at_bat, is_plate_appearance, is_risp_start, is_sac_bunt, is_sac_fly,
        is_strikeout, pitcher_hand_split, stranded_bases,
    },
    types::{GameId, LineKey, PlayerId, Split},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Running batting totals for one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatLine {
    pub pa:                i64,
    pub r:                 i64,
    pub h:                 i64,
    pub doubles:           i64,
    pub triples:           i64,
    pub hr:                i64,
    pub hbp:               i64,
    pub tb:                i64,
    pub rbi:               i64,
    pub so:                i64,
    pub bb:                i64,
    pub intentional_walks: i64,
    pub ab:                i64,
    pub fly_outs:          i64,
    pub ground_outs:       i64,
    pub air_outs:          i64,
    pub gidp:              i64,
    pub gitp:              i64,
    pub lob:               i64,
    pub sac_bunts:         i64,
    pub sac_flies:         i64,
    pub pop_outs:          i64,
    pub line_outs:         i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattingRow {
    pub game_id:           GameId,
    pub player_id:         PlayerId,
    pub split:             Split,
    pub pa:                i64,
    pub r:                 i64,
    pub h:                 i64,
    pub doubles:           i64,
    pub triples:           i64,
    pub hr:                i64,
    pub hbp:               i64,
    pub tb:                i64,
    pub rbi:               i64,
    pub so:                i64,
    pub bb:                i64,
    pub intentional_walks: i64,
    pub ab:                i64,
    #[serde(rename = "flyOuts")]
    pub fly_outs:          i64,
    #[serde(rename = "groundOuts")]
    pub ground_outs:       i64,
    #[serde(rename = "airOuts")]
    pub air_outs:          i64,
    pub gidp:              i64,
    pub gitp:              i64,
    pub lob:               i64,
    pub sac_bunts:         i64,
    pub sac_flies:         i64,
    pub pop_outs:          i64,
    pub line_outs:         i64,
}

impl BatLine {
    pub fn to_row(&self, key: LineKey) -> BattingRow {
        BattingRow {
            game_id:           key.game_id,
            player_id:         key.player_id,
            split:             key.split,
            pa:                self.pa,
            r:                 self.r,
            h:                 self.h,
            doubles:           self.doubles,
            triples:           self.triples,
            hr:                self.hr,
            hbp:               self.hbp,
            tb:                self.tb,
            rbi:               self.rbi,
            so:                self.so,
            bb:                self.bb,
            intentional_walks: self.intentional_walks,
            ab:                self.ab,
            fly_outs:          self.fly_outs,
            ground_outs:       self.ground_outs,
            air_outs:          self.air_outs,
            gidp:              self.gidp,
            gitp:              self.gitp,
            lob:               self.lob,
            sac_bunts:         self.sac_bunts,
            sac_flies:         self.sac_flies,
            pop_outs:          self.pop_outs,
            line_outs:         self.line_outs,
        }
    }

    /// Apply one plate appearance to this line.
    fn apply_plate_appearance(&mut self, batter_id: PlayerId, play: &Play) {
        let et = play.event_type();
        let label = play.event_label();

        self.pa += 1;
        self.rbi += play.rbi();

        match et.as_str() {
            "walk" | "base_on_balls" => self.bb += 1,
            "intent_walk" | "intentional_walk" => {
                self.bb += 1;
                self.intentional_walks += 1;
            }
            "hit_by_pitch" => self.hbp += 1,
            "single" => {
                self.h += 1;
                self.tb += 1;
            }
            "double" => {
                self.h += 1;
                self.doubles += 1;
                self.tb += 2;
            }
            "triple" => {
                self.h += 1;
                self.triples += 1;
                self.tb += 3;
            }
            "home_run" | "homerun" => {
                self.h += 1;
                self.hr += 1;
                self.tb += 4;
            }
            _ => {}
        }

        if is_strikeout(&et) {
            self.so += 1;
        }
        if et.contains("double_play") {
            self.gidp += 1;
        }
        if et.contains("triple_play") {
            self.gitp += 1;
        }

        // Matched against the provider's display text, not the event code.
        if label.contains("Flyout") || label.contains("Sac Fly") {
            self.fly_outs += 1;
            self.air_outs += 1;
        } else if label.contains("Lineout") || label.contains("Line Out") {
            self.line_outs += 1;
            self.air_outs += 1;
        } else if label.contains("Pop Out") {
            self.pop_outs += 1;
            self.air_outs += 1;
        } else if label.contains("Groundout")
            || label.contains("Forceout")
            || label.contains("Grounded Into")
        {
            self.ground_outs += 1;
        }

        if is_sac_fly(&et) {
            self.sac_flies += 1;
        } else if is_sac_bunt(&et) {
            self.sac_bunts += 1;
        }

        if counts_as_at_bat(&et) {
            self.ab += 1;
        }

        if play.is_out() || et.contains("fielders_choice") || et.contains("force_out") {
            self.lob += stranded_bases(play, batter_id) as i64;
        }
    }
}

#[derive(Debug, Default)]
pub struct BattingAggregator {
    lines: BTreeMap<LineKey, BatLine>,
}

impl BattingAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, key: LineKey) -> &mut BatLine {
        self.lines.entry(key).or_default()
    }

    /// Credit a run to every runner who scored on the play, under `split`.
    fn apply_scoring(&mut self, game_id: GameId, split: Split, play: &Play) {
        for runner in play.runners.iter().filter(|r| r.is_scoring()) {
            if let Some(runner_id) = runner.runner_id() {
                self.line(LineKey::new(game_id, runner_id, split)).r += 1;
            }
        }
    }
}

impl StatAggregator for BattingAggregator {
    type Row = BattingRow;

    fn name(&self) -> &'static str {
        "batting"
    }

    fn build_rows(&mut self, game_id: GameId, feed: &GameFeed) -> Vec<BattingRow> {
        self.lines.clear();

        for play in &feed.all_plays {
            if !is_plate_appearance(play) {
                continue;
            }
            let Some(batter_id) = play.batter_id() else {
                continue;
            };
            let Some(split) = pitcher_hand_split(play) else {
                log::debug!(
                    "game={game_id} batter={batter_id}: unknown pitch hand {:?}, play skipped",
                    play.matchup.pitch_hand.code
                );
                continue;
            };
            let risp = is_risp_start(play);

            self.line(LineKey::new(game_id, batter_id, split))
                .apply_plate_appearance(batter_id, play);
            if risp {
                self.line(LineKey::new(game_id, batter_id, Split::Risp))
                    .apply_plate_appearance(batter_id, play);
            }

            self.apply_scoring(game_id, split, play);
            if risp {
                self.apply_scoring(game_id, Split::Risp, play);
            }
        }

        log::debug!("game={game_id} {}: {} lines", self.name(), self.lines.len());

        self.lines
            .iter()
            .map(|(key, line)| line.to_row(*key))
            .collect()
    }
}

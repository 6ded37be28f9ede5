//! Stateless event classification shared by every aggregator.

use crate::{
    feed::{Base, Play},
    types::{PlayerId, Split},
};

/// `result.eventType` codes that arrive with `type == "atBat"` but are
/// base-running or miscellaneous events, not plate appearances.
pub const NON_PA_EVENT_TYPES: [&str; 18] = [
    "caught_stealing_2b",
    "caught_stealing_3b",
    "caught_stealing_home",
    "pickoff_1b",
    "pickoff_2b",
    "pickoff_3b",
    "pickoff_caught_stealing_2b",
    "pickoff_caught_stealing_3b",
    "pickoff_caught_stealing_home",
    "stolen_base_2b",
    "stolen_base_3b",
    "stolen_base_home",
    "wild_pitch",
    "passed_ball",
    "balk",
    "other_advance",
    "runner_double_play",
    "pickoff_error_1b",
];

const AT_BAT_RESULT: &str = "atbat";

pub fn is_at_bat_result(play: &Play) -> bool {
    play.result_type() == AT_BAT_RESULT
}

/// A completed at-bat between a known batter and pitcher whose event
/// type is not a base-running code.
pub fn is_plate_appearance(play: &Play) -> bool {
    if !is_at_bat_result(play) || !play.is_complete() {
        return false;
    }
    if play.batter_id().is_none() || play.pitcher_id().is_none() {
        return false;
    }
    !NON_PA_EVENT_TYPES.contains(&play.event_type().as_str())
}

/// Batting-side split. `None` means the play must be skipped.
pub fn pitcher_hand_split(play: &Play) -> Option<Split> {
    match play.pitch_hand_code().as_str() {
        "L" => Some(Split::VsLhp),
        "R" => Some(Split::VsRhp),
        _ => None,
    }
}

/// Pitching-side split. Unknown bat side counts as right-handed.
pub fn batter_hand_split(play: &Play) -> Split {
    match play.bat_side_code().as_str() {
        "L" => Split::VsLhb,
        _ => Split::VsRhb,
    }
}

/// True when a runner started the play on second or third, or the
/// matchup declares a "risp"/"loaded" on-base state.
pub fn is_risp_start(play: &Play) -> bool {
    let runner_in_scoring_position = play
        .runners
        .iter()
        .filter_map(|r| r.start_base())
        .any(|b| b.is_scoring_position());
    if runner_in_scoring_position {
        return true;
    }
    matches!(play.men_on_base().as_str(), "risp" | "loaded")
}

/// Pitch counts for one play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PitchTally {
    pub pitches:      i64,
    pub balls:        i64,
    pub strikes:      i64,
    pub balks:        i64,
    pub wild_pitches: i64,
}

impl PitchTally {
    pub fn from_play(play: &Play) -> Self {
        let mut tally = Self::default();
        for event in &play.play_events {
            if event.is_pitch() {
                tally.pitches += 1;
                if event.details.is_ball {
                    tally.balls += 1;
                } else {
                    tally.strikes += 1;
                }
            }
            let et = event.event_type();
            if et.contains("wild_pitch") {
                tally.wild_pitches += 1;
            } else if et.contains("balk") {
                tally.balks += 1;
            }
        }
        tally
    }
}

// ── Event-type predicates ──────────────────────────────────────────
// All take the trimmed, lowercased `result.eventType`.

pub fn is_walk(et: &str) -> bool {
    matches!(et, "walk" | "base_on_balls" | "intent_walk" | "intentional_walk")
}

pub fn is_hit_by_pitch(et: &str) -> bool {
    et == "hit_by_pitch"
}

pub fn is_sac_fly(et: &str) -> bool {
    et.contains("sac_fly") || et.contains("sacrifice_fly")
}

pub fn is_sac_bunt(et: &str) -> bool {
    et.contains("sac_bunt") || et.contains("sacrifice_bunt")
}

pub fn is_catcher_interference(et: &str) -> bool {
    et.contains("catcher_interf")
}

pub fn is_strikeout(et: &str) -> bool {
    et.contains("strikeout")
}

/// At-bat eligibility, shared by the batting and pitching lines.
pub fn counts_as_at_bat(et: &str) -> bool {
    !(is_walk(et)
        || is_hit_by_pitch(et)
        || is_sac_fly(et)
        || is_sac_bunt(et)
        || is_catcher_interference(et))
}

/// Distinct bases (1B/2B/3B) left occupied by runners other than
/// `batter_id` who were neither put out nor scored on the play.
pub fn stranded_bases(play: &Play, batter_id: PlayerId) -> usize {
    let mut bases: Vec<Base> = play
        .runners
        .iter()
        .filter(|r| r.runner_id() != Some(batter_id))
        .filter(|r| !r.is_out() && !r.is_scoring())
        .filter_map(|r| r.end_base())
        .filter(Base::is_occupiable)
        .collect();
    bases.sort();
    bases.dedup();
    bases.len()
}

//! The per-game stats engine.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Batting aggregator
//!   2. Pitching aggregator
//!   3. Baserunning aggregator
//!
//! RULES:
//!   - Each aggregator reads only the feed it is handed.
//!   - No aggregator calls another aggregator's functions directly.
//!   - One engine per worker thread. Engines are cheap to build.

use crate::{
    aggregator::StatAggregator,
    baserunning::{BaserunningAggregator, BaserunningRow},
    batting::{BattingAggregator, BattingRow},
    feed::GameFeed,
    pitching::{PitchingAggregator, PitchingRow},
    types::{GameId, PlayerId},
};
use std::collections::HashSet;

/// Every row produced for one game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameStatRows {
    pub game_id:     GameId,
    pub batting:     Vec<BattingRow>,
    pub pitching:    Vec<PitchingRow>,
    pub baserunning: Vec<BaserunningRow>,
}

impl GameStatRows {
    pub fn len(&self) -> usize {
        self.batting.len() + self.pitching.len() + self.baserunning.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop rows for players outside `known`.
    pub fn retain_players(&mut self, known: &HashSet<PlayerId>) {
        let before = self.len();
        self.batting.retain(|r| known.contains(&r.player_id));
        self.pitching.retain(|r| known.contains(&r.player_id));
        self.baserunning.retain(|r| known.contains(&r.player_id));
        let dropped = before - self.len();
        if dropped > 0 {
            log::debug!("game={} dropped {dropped} rows for unknown players", self.game_id);
        }
    }
}

#[derive(Debug, Default)]
pub struct GameStatsEngine {
    batting:     BattingAggregator,
    pitching:    PitchingAggregator,
    baserunning: BaserunningAggregator,
}

impl GameStatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every aggregator, in order, over one game's feed.
    pub fn aggregate(&mut self, game_id: GameId, feed: &GameFeed) -> GameStatRows {
        let rows = GameStatRows {
            game_id,
            batting:     self.batting.build_rows(game_id, feed),
            pitching:    self.pitching.build_rows(game_id, feed),
            baserunning: self.baserunning.build_rows(game_id, feed),
        };
        log::debug!(
            "game={game_id} plays={} batting={} pitching={} baserunning={}",
            feed.all_plays.len(),
            rows.batting.len(),
            rows.pitching.len(),
            rows.baserunning.len()
        );
        rows
    }
}

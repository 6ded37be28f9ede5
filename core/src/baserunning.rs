//! Baserunning aggregator: stolen bases and caught stealing per runner.

use crate::{
    aggregator::StatAggregator,
    feed::GameFeed,
    types::{GameId, PlayerId, PlayerKey},
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaserunningLine {
    pub sb:              i64,
    pub caught_stealing: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaserunningRow {
    pub game_id:         GameId,
    pub player_id:       PlayerId,
    pub sb:              i64,
    pub caught_stealing: i64,
}

impl BaserunningLine {
    pub fn is_empty(&self) -> bool {
        self.sb == 0 && self.caught_stealing == 0
    }

    pub fn to_row(&self, key: PlayerKey) -> BaserunningRow {
        BaserunningRow {
            game_id:         key.game_id,
            player_id:       key.player_id,
            sb:              self.sb,
            caught_stealing: self.caught_stealing,
        }
    }
}

#[derive(Debug, Default)]
pub struct BaserunningAggregator {
    lines: BTreeMap<PlayerKey, BaserunningLine>,
}

impl BaserunningAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatAggregator for BaserunningAggregator {
    type Row = BaserunningRow;

    fn name(&self) -> &'static str {
        "baserunning"
    }

    fn build_rows(&mut self, game_id: GameId, feed: &GameFeed) -> Vec<BaserunningRow> {
        self.lines.clear();

        for runner in feed.all_plays.iter().flat_map(|p| p.runners.iter()) {
            let Some(runner_id) = runner.runner_id() else {
                continue;
            };
            let et = runner.event_type();
            let key = PlayerKey::new(game_id, runner_id);
            if et.contains("stolen_base") {
                self.lines.entry(key).or_default().sb += 1;
            } else if et.contains("caught_stealing") {
                self.lines.entry(key).or_default().caught_stealing += 1;
            }
        }

        self.lines
            .iter()
            .filter(|(_, line)| !line.is_empty())
            .map(|(key, line)| line.to_row(*key))
            .collect()
    }
}

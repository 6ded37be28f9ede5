//! Aggregator trait.
//!
//! RULE: Every stat family implements StatAggregator.
//! An aggregator keeps no state between calls: build_rows() starts by
//! clearing its accumulators and rebuilds them from the given feed only.
//! One instance must never be driven by two threads at once.

use crate::{feed::GameFeed, types::GameId};

/// The contract every stat family must fulfill.
pub trait StatAggregator {
    /// Flat output record, keyed by (game, player[, split]).
    type Row;

    /// Unique stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Reduce one game's full play list into rows, sorted by key.
    fn build_rows(&mut self, game_id: GameId, feed: &GameFeed) -> Vec<Self::Row>;
}

//! Play-by-play box-score aggregation.
//!
//! Turns one game's provider event feed into split-scoped batting,
//! pitching and baserunning counting lines, and upserts them into SQLite.

pub mod aggregator;
pub mod baserunning;
pub mod batting;
pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod normalizer;
pub mod pitching;
pub mod store;
pub mod types;

use crate::{
    error::{StatsError, StatsResult},
    types::PlayerId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Settings for a box-score sync run, read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Worker threads aggregating games concurrently.
    pub max_workers: usize,
    /// Games aggregated and committed per batch.
    pub game_batch_size: usize,
    /// SQLite database the rows are upserted into.
    pub db_path: String,
    /// JSON array of player ids. When set, rows for other players are dropped.
    pub known_players_path: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_workers: 6,
            game_batch_size: 100,
            db_path: "boxscore.db".into(),
            known_players_path: None,
        }
    }
}

impl SyncConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: &str) -> StatsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SyncConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StatsResult<()> {
        if self.max_workers == 0 {
            return Err(StatsError::Config { reason: "max_workers must be at least 1".into() });
        }
        if self.game_batch_size == 0 {
            return Err(StatsError::Config {
                reason: "game_batch_size must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Read a JSON array of player ids.
pub fn load_known_players(path: &str) -> StatsResult<HashSet<PlayerId>> {
    let content = std::fs::read_to_string(path)?;
    let ids: Vec<PlayerId> = serde_json::from_str(&content)?;
    Ok(ids.into_iter().collect())
}

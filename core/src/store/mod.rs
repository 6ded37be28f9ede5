//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Every write is an upsert keyed by (game_id, player_id[, split]), so
//! re-ingesting a game replaces its rows instead of adding to them.

mod baserunning;
mod batting;
mod pitching;
mod sync_run;

use crate::{engine::GameStatRows, error::StatsResult, types::Split};
use rusqlite::{params, Connection};

pub use sync_run::SyncRunSummary;

pub struct StatsStore {
    conn: Connection,
}

impl StatsStore {
    pub fn open(path: &str) -> StatsResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> StatsResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> StatsResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_game_stats.sql"))?;
        Ok(())
    }

    /// Upsert every row of one game in a single transaction.
    pub fn upsert_game_rows(&self, rows: &GameStatRows) -> StatsResult<usize> {
        self.upsert_batch(std::slice::from_ref(rows))
    }

    /// Upsert a batch of games in a single transaction.
    pub fn upsert_batch(&self, games: &[GameStatRows]) -> StatsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut written = 0;
        for rows in games {
            self.upsert_batting_rows(&rows.batting)?;
            self.upsert_pitching_rows(&rows.pitching)?;
            self.upsert_baserunning_rows(&rows.baserunning)?;
            written += rows.len();
        }
        tx.commit()?;
        log::debug!("upserted {written} rows across {} games", games.len());
        Ok(written)
    }

    // ── Test / summary helpers ────────────────────────────────────────

    pub fn row_count(&self, table: StatTable) -> StatsResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn row_count_for_game(&self, table: StatTable, game_id: i64) -> StatsResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE game_id = ?1", table.name());
        let count: i64 = self.conn.query_row(&sql, params![game_id], |row| row.get(0))?;
        Ok(count)
    }
}

/// The three stat tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTable {
    Batting,
    Pitching,
    Baserunning,
}

impl StatTable {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Batting     => "game_batting_stats",
            Self::Pitching    => "game_pitching_stats",
            Self::Baserunning => "game_baserunning_stats",
        }
    }
}

fn split_column(idx: usize, raw: String) -> rusqlite::Result<Split> {
    raw.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            e.into(),
        )
    })
}

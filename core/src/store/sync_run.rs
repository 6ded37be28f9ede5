//! Store methods for the sync-run ledger.

use crate::error::StatsResult;
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::StatsStore;

/// Per-run game outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncRunSummary {
    pub games_ok:      i64,
    pub games_failed:  i64,
    pub games_skipped: i64,
}

impl StatsStore {
    pub fn insert_sync_run(&self, run_id: &str, started_at: DateTime<Utc>) -> StatsResult<()> {
        self.conn.execute(
            "INSERT INTO sync_run (run_id, started_at) VALUES (?1, ?2)",
            params![run_id, started_at.to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn finish_sync_run(
        &self,
        run_id:      &str,
        finished_at: DateTime<Utc>,
        summary:     SyncRunSummary,
    ) -> StatsResult<()> {
        self.conn.execute(
            "UPDATE sync_run
             SET finished_at = ?2, games_ok = ?3, games_failed = ?4, games_skipped = ?5
             WHERE run_id = ?1",
            params![
                run_id,
                finished_at.to_rfc3339(),
                summary.games_ok,
                summary.games_failed,
                summary.games_skipped,
            ],
        )?;
        Ok(())
    }

    /// Outcome counts of a finished run; `None` while it is still open.
    pub fn sync_run_summary(&self, run_id: &str) -> StatsResult<Option<SyncRunSummary>> {
        let row = self.conn.query_row(
            "SELECT games_ok, games_failed, games_skipped FROM sync_run
             WHERE run_id = ?1 AND finished_at IS NOT NULL",
            params![run_id],
            |row| {
                Ok(SyncRunSummary {
                    games_ok:      row.get(0)?,
                    games_failed:  row.get(1)?,
                    games_skipped: row.get(2)?,
                })
            },
        ).optional()?;
        Ok(row)
    }
}

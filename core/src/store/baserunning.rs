//! Store methods for baserunning lines.

use crate::{baserunning::BaserunningRow, error::StatsResult};
use rusqlite::{params, OptionalExtension};

use super::StatsStore;

impl StatsStore {
    pub fn upsert_baserunning_rows(&self, rows: &[BaserunningRow]) -> StatsResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO game_baserunning_stats (game_id, player_id, sb, caught_stealing)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (game_id, player_id) DO UPDATE SET
                 sb = excluded.sb, caught_stealing = excluded.caught_stealing",
        )?;
        for r in rows {
            stmt.execute(params![r.game_id, r.player_id, r.sb, r.caught_stealing])?;
        }
        Ok(())
    }

    pub fn baserunning_row(
        &self,
        game_id:   i64,
        player_id: i64,
    ) -> StatsResult<Option<BaserunningRow>> {
        let row = self.conn.query_row(
            "SELECT game_id, player_id, sb, caught_stealing
             FROM game_baserunning_stats WHERE game_id = ?1 AND player_id = ?2",
            params![game_id, player_id],
            |row| {
                Ok(BaserunningRow {
                    game_id:         row.get(0)?,
                    player_id:       row.get(1)?,
                    sb:              row.get(2)?,
                    caught_stealing: row.get(3)?,
                })
            },
        ).optional()?;
        Ok(row)
    }
}

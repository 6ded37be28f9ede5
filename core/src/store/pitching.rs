//! Store methods for pitching lines.

use crate::{error::StatsResult, pitching::PitchingRow, types::Split};
use rusqlite::{params, OptionalExtension};

use super::{split_column, StatsStore};

impl StatsStore {
    pub fn upsert_pitching_rows(&self, rows: &[PitchingRow]) -> StatsResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO game_pitching_stats (
                 game_id, player_id, split, outs_pitched, ip, ab, pitches_thrown, h,
                 doubles, triples, hr, bb, k, intentional_walks, r, er, batters_faced,
                 balls_thrown, strikes_thrown, balks, wild_pitches, inherited_runners,
                 inherited_runners_scored)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                     ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)
             ON CONFLICT (game_id, player_id, split) DO UPDATE SET
                 outs_pitched = excluded.outs_pitched, ip = excluded.ip,
                 ab = excluded.ab, pitches_thrown = excluded.pitches_thrown,
                 h = excluded.h, doubles = excluded.doubles,
                 triples = excluded.triples, hr = excluded.hr, bb = excluded.bb,
                 k = excluded.k, intentional_walks = excluded.intentional_walks,
                 r = excluded.r, er = excluded.er,
                 batters_faced = excluded.batters_faced,
                 balls_thrown = excluded.balls_thrown,
                 strikes_thrown = excluded.strikes_thrown, balks = excluded.balks,
                 wild_pitches = excluded.wild_pitches,
                 inherited_runners = excluded.inherited_runners,
                 inherited_runners_scored = excluded.inherited_runners_scored",
        )?;
        for r in rows {
            stmt.execute(params![
                r.game_id, r.player_id, r.split.as_str(), r.outs_pitched, r.ip, r.ab,
                r.pitches_thrown, r.h, r.doubles, r.triples, r.hr, r.bb, r.k,
                r.intentional_walks, r.r, r.er, r.batters_faced, r.balls_thrown,
                r.strikes_thrown, r.balks, r.wild_pitches, r.inherited_runners,
                r.inherited_runners_scored,
            ])?;
        }
        Ok(())
    }

    pub fn pitching_row(
        &self,
        game_id:   i64,
        player_id: i64,
        split:     Split,
    ) -> StatsResult<Option<PitchingRow>> {
        let row = self.conn.query_row(
            "SELECT game_id, player_id, split, outs_pitched, ip, ab, pitches_thrown, h,
                    doubles, triples, hr, bb, k, intentional_walks, r, er, batters_faced,
                    balls_thrown, strikes_thrown, balks, wild_pitches, inherited_runners,
                    inherited_runners_scored
             FROM game_pitching_stats
             WHERE game_id = ?1 AND player_id = ?2 AND split = ?3",
            params![game_id, player_id, split.as_str()],
            |row| {
                Ok(PitchingRow {
                    game_id:                  row.get(0)?,
                    player_id:                row.get(1)?,
                    split:                    split_column(2, row.get(2)?)?,
                    outs_pitched:             row.get(3)?,
                    ip:                       row.get(4)?,
                    ab:                       row.get(5)?,
                    pitches_thrown:           row.get(6)?,
                    h:                        row.get(7)?,
                    doubles:                  row.get(8)?,
                    triples:                  row.get(9)?,
                    hr:                       row.get(10)?,
                    bb:                       row.get(11)?,
                    k:                        row.get(12)?,
                    intentional_walks:        row.get(13)?,
                    r:                        row.get(14)?,
                    er:                       row.get(15)?,
                    batters_faced:            row.get(16)?,
                    balls_thrown:             row.get(17)?,
                    strikes_thrown:           row.get(18)?,
                    balks:                    row.get(19)?,
                    wild_pitches:             row.get(20)?,
                    inherited_runners:        row.get(21)?,
                    inherited_runners_scored: row.get(22)?,
                })
            },
        ).optional()?;
        Ok(row)
    }
}

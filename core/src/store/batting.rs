//! Store methods for batting lines.

use crate::{batting::BattingRow, error::StatsResult, types::Split};
use rusqlite::{params, OptionalExtension};

use super::{split_column, StatsStore};

impl StatsStore {
    pub fn upsert_batting_rows(&self, rows: &[BattingRow]) -> StatsResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO game_batting_stats (
                 game_id, player_id, split, pa, r, h, doubles, triples, hr, hbp, tb,
                 rbi, so, bb, intentional_walks, ab, fly_outs, ground_outs, air_outs,
                 gidp, gitp, lob, sac_bunts, sac_flies, pop_outs, line_outs)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                     ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26)
             ON CONFLICT (game_id, player_id, split) DO UPDATE SET
                 pa = excluded.pa, r = excluded.r, h = excluded.h,
                 doubles = excluded.doubles, triples = excluded.triples,
                 hr = excluded.hr, hbp = excluded.hbp, tb = excluded.tb,
                 rbi = excluded.rbi, so = excluded.so, bb = excluded.bb,
                 intentional_walks = excluded.intentional_walks, ab = excluded.ab,
                 fly_outs = excluded.fly_outs, ground_outs = excluded.ground_outs,
                 air_outs = excluded.air_outs, gidp = excluded.gidp,
                 gitp = excluded.gitp, lob = excluded.lob,
                 sac_bunts = excluded.sac_bunts, sac_flies = excluded.sac_flies,
                 pop_outs = excluded.pop_outs, line_outs = excluded.line_outs",
        )?;
        for r in rows {
            stmt.execute(params![
                r.game_id, r.player_id, r.split.as_str(), r.pa, r.r, r.h, r.doubles,
                r.triples, r.hr, r.hbp, r.tb, r.rbi, r.so, r.bb, r.intentional_walks,
                r.ab, r.fly_outs, r.ground_outs, r.air_outs, r.gidp, r.gitp, r.lob,
                r.sac_bunts, r.sac_flies, r.pop_outs, r.line_outs,
            ])?;
        }
        Ok(())
    }

    pub fn batting_row(
        &self,
        game_id:   i64,
        player_id: i64,
        split:     Split,
    ) -> StatsResult<Option<BattingRow>> {
        let row = self.conn.query_row(
            "SELECT game_id, player_id, split, pa, r, h, doubles, triples, hr, hbp, tb,
                    rbi, so, bb, intentional_walks, ab, fly_outs, ground_outs, air_outs,
                    gidp, gitp, lob, sac_bunts, sac_flies, pop_outs, line_outs
             FROM game_batting_stats
             WHERE game_id = ?1 AND player_id = ?2 AND split = ?3",
            params![game_id, player_id, split.as_str()],
            |row| {
                Ok(BattingRow {
                    game_id:           row.get(0)?,
                    player_id:         row.get(1)?,
                    split:             split_column(2, row.get(2)?)?,
                    pa:                row.get(3)?,
                    r:                 row.get(4)?,
                    h:                 row.get(5)?,
                    doubles:           row.get(6)?,
                    triples:           row.get(7)?,
                    hr:                row.get(8)?,
                    hbp:               row.get(9)?,
                    tb:                row.get(10)?,
                    rbi:               row.get(11)?,
                    so:                row.get(12)?,
                    bb:                row.get(13)?,
                    intentional_walks: row.get(14)?,
                    ab:                row.get(15)?,
                    fly_outs:          row.get(16)?,
                    ground_outs:       row.get(17)?,
                    air_outs:          row.get(18)?,
                    gidp:              row.get(19)?,
                    gitp:              row.get(20)?,
                    lob:               row.get(21)?,
                    sac_bunts:         row.get(22)?,
                    sac_flies:         row.get(23)?,
                    pop_outs:          row.get(24)?,
                    line_outs:         row.get(25)?,
                })
            },
        ).optional()?;
        Ok(row)
    }
}

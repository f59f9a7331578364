//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `agent_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// Writes scene output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id       INTEGER NOT NULL,
                 unit_id        INTEGER NOT NULL,
                 owner          INTEGER NOT NULL,
                 tick           INTEGER NOT NULL,
                 x              REAL    NOT NULL,
                 z              REAL    NOT NULL,
                 health         REAL    NOT NULL,
                 current_action TEXT    NOT NULL,
                 queued_actions INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick        INTEGER PRIMARY KEY,
                 elapsed_ms  INTEGER NOT NULL,
                 updated     INTEGER NOT NULL,
                 completed   INTEGER NOT NULL,
                 evaluated   INTEGER NOT NULL,
                 switched    INTEGER NOT NULL,
                 reaped      INTEGER NOT NULL,
                 live_agents INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_agent_rows(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (agent_id, unit_id, owner, tick, x, z, health, current_action, queued_actions) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.unit_id,
                    row.owner,
                    row.tick,
                    row.x,
                    row.z,
                    row.health,
                    row.current_action,
                    row.queued_actions,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_row(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, elapsed_ms, updated, completed, evaluated, switched, reaped, live_agents) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.tick,
                row.elapsed_ms,
                row.updated,
                row.completed,
                row.evaluated,
                row.switched,
                row.reaped,
                row.live_agents,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

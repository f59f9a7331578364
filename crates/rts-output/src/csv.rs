//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

pub(crate) const SNAPSHOT_HEADER: [&str; 9] = [
    "agent_id", "unit_id", "owner", "tick", "x", "z", "health", "current_action", "queued_actions",
];

pub(crate) const SUMMARY_HEADER: [&str; 8] = [
    "tick", "elapsed_ms", "updated", "completed", "evaluated", "switched", "reaped", "live_agents",
];

/// Writes scene output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agent_rows(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.unit_id.to_string(),
                row.owner.to_string(),
                row.tick.to_string(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.z),
                format!("{:.3}", row.health),
                row.current_action.clone(),
                row.queued_actions.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_row(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.updated.to_string(),
            row.completed.to_string(),
            row.evaluated.to_string(),
            row.switched.to_string(),
            row.reaped.to_string(),
            row.live_agents.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}

//! Backend seam for scene output.

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// A sink for agent snapshots and per-tick counters.
///
/// Implemented by [`CsvWriter`][crate::CsvWriter] and, with the `sqlite`
/// feature, `SqliteWriter`.  The observer never propagates failures; it keeps
/// the first one for [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Append one snapshot batch (one row per live agent).
    fn write_agent_rows(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_tick_row(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush everything.  A second call does nothing.
    fn finish(&mut self) -> OutputResult<()>;
}

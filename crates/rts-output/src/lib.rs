//! `rts-output` — scene output writers for the rts-ai workspace.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                               |
//! |-----------|---------|---------------------------------------------|
//! | *(none)*  | CSV     | `agent_snapshots.csv`, `tick_summaries.csv` |
//! | `sqlite`  | SQLite  | `output.db`                                 |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `rts_sim::SimObserver`.  Snapshot rows are the display
//! surface's view of each agent: current action, queue length, position and
//! health.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rts_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &scene.config);
//! scene.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{SimOutputObserver, snapshot_rows};
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use rts_agent::AgentStore;
use rts_core::{SimConfig, Tick};
use rts_sim::{SimObserver, TickStats};
use rts_world::{Combat, SceneObjects, World};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `scene.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:           W,
    tick_duration_ms: u32,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for game-time
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self { writer, tick_duration_ms: config.tick_duration_ms, last_error: None }
    }

    /// Take the stored write error (if any) after `scene.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

/// One row per live agent, in id order.
pub fn snapshot_rows(tick: Tick, agents: &AgentStore, world: &World) -> Vec<AgentSnapshotRow> {
    agents
        .iter()
        .map(|agent| {
            let unit = agent.unit();
            let position = world.position(unit).unwrap_or_default();
            let snapshot = agent.snapshot();
            AgentSnapshotRow {
                agent_id:       agent.id().0,
                unit_id:        unit.0,
                owner:          agent.owner().0,
                tick:           tick.0,
                x:              position.x,
                z:              position.z,
                health:         world.health_ratio(unit).unwrap_or(-1.0),
                current_action: snapshot.current.map(|id| id.to_string()).unwrap_or_default(),
                queued_actions: snapshot.queued.len() as u32,
            }
        })
        .collect()
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, stats: &TickStats) {
        let row = TickSummaryRow {
            tick:        stats.tick.0,
            elapsed_ms:  stats.tick.0 * u64::from(self.tick_duration_ms),
            updated:     stats.updated as u64,
            completed:   stats.completed as u64,
            evaluated:   stats.evaluated as u64,
            switched:    stats.switched as u64,
            reaped:      stats.reaped as u64,
            live_agents: stats.live as u64,
        };
        let result = self.writer.write_tick_row(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, world: &World) {
        let rows = snapshot_rows(tick, agents, world);
        if !rows.is_empty() {
            let result = self.writer.write_agent_rows(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

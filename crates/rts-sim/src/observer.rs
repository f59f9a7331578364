//! Scene observer trait for progress reporting and data collection.

use rts_agent::AgentStore;
use rts_core::Tick;
use rts_world::World;

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick:      Tick,
    /// Agents whose current action received `update`.
    pub updated:   usize,
    /// Current actions that reported completion and were exited.
    pub completed: usize,
    /// Agents scored by the evaluation pass or idle re-evaluation.
    pub evaluated: usize,
    /// Evaluations that switched the agent to a different action.
    pub switched:  usize,
    /// Agents removed because their unit died.
    pub reaped:    usize,
    /// Live agents at the end of the tick.
    pub live:      usize,
}

/// Callbacks invoked by [`Scene::run`][crate::Scene::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, stats: &TickStats) {
///         if stats.tick.0 % self.interval == 0 {
///             println!("{}: {} switches", stats.tick, stats.switched);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with that tick's counters.
    fn on_tick_end(&mut self, _stats: &TickStats) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to agents and world.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _world: &World) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per fixed
//! simulation step.  The mapping to game time is held in `SimClock`:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! Every multi-tick behaviour (attack cooldowns, build timers, re-poll
//! intervals) is stored as an absolute deadline `Tick` and compared against
//! the current tick on each update.  Using integer ticks keeps those
//! comparisons exact; durations authored in seconds are converted once, with
//! [`SimClock::ticks_for_secs`] rounding up so a timer never fires early.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and game-time durations.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Milliseconds of game time one tick represents.  Default: 50 (20 Hz).
    pub tick_duration_ms: u32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed game milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// Length of one tick in seconds, for per-tick integration (movement).
    #[inline]
    pub fn tick_secs(&self) -> f32 {
        self.tick_duration_ms as f32 / 1_000.0
    }

    /// How many ticks span `ms` milliseconds? (rounds up)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ticks_for_ms(self.tick_duration_ms, ms)
    }

    /// How many ticks span `secs` seconds? Negative and NaN inputs count as 0.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        ticks_for_secs(self.tick_duration_ms, secs)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed_ms();
        write!(f, "{} ({}m{:02}.{:03}s)", self.current_tick, ms / 60_000, (ms / 1_000) % 60, ms % 1_000)
    }
}

/// Free-function form of [`SimClock::ticks_for_ms`] for callers that only
/// carry the tick length.
#[inline]
pub fn ticks_for_ms(tick_duration_ms: u32, ms: u64) -> u64 {
    ms.div_ceil(tick_duration_ms.max(1) as u64)
}

/// Free-function form of [`SimClock::ticks_for_secs`].
#[inline]
pub fn ticks_for_secs(tick_duration_ms: u32, secs: f32) -> u64 {
    let ms = (secs * 1_000.0).ceil();
    if ms.is_nan() || ms <= 0.0 {
        return 0;
    }
    ticks_for_ms(tick_duration_ms, ms as u64)
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the scene builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Milliseconds per fixed tick.  Must be non-zero.
    pub tick_duration_ms: u32,

    /// Total ticks `Scene::run` simulates.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces the same scene.
    pub seed: u64,

    /// Emit an agent snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms:      50,
            total_ticks:           1_200,
            seed:                  0,
            output_interval_ticks: 20,
        }
    }
}

impl SimConfig {
    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }
}

//! Amortised utility evaluation across all agents in a scene.
//!
//! # Rotation
//!
//! Scoring every action of every agent is O(agents × actions), so the
//! manager only evaluates part of the registry per pass.  A cursor moves
//! through the registry by
//!
//!   increment = floor(total × percentage / 100)      (0 is forced to total)
//!
//! per pass and is clamped to `total`.  Once the cursor has reached the end,
//! the next pass starts again from 0.
//!
//! With [`Window::Prefix`] a pass evaluates every index `< cursor`, so early
//! registrants are scored more often than late ones.  [`Window::Sliding`]
//! evaluates only `[previous cursor, cursor)`, giving each agent one
//! evaluation per full rotation.

use std::ops::Range;

use rts_core::{AgentId, Tick};

// ── Configuration ─────────────────────────────────────────────────────────────

/// When evaluation passes run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Cadence {
    /// Every registered agent, every tick.  No rotation.
    EveryTick,
    /// One rotating pass every `interval_ticks` ticks.
    Timed { interval_ticks: u64 },
    /// Only after [`AiManager::request_evaluation`].
    Manual,
}

/// Which registry slice a rotating pass evaluates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Window {
    /// Indices `< cursor`.
    #[default]
    Prefix,
    /// Indices `[previous cursor, cursor)`.
    Sliding,
}

/// AI scheduling parameters.  Usually embedded in the application's JSON
/// config next to [`SimConfig`][rts_core::SimConfig].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    pub cadence:    Cadence,
    /// Share of the registry the cursor advances per pass, in percent.
    pub percentage: f32,
    pub window:     Window,
    /// Evaluate agents that went idle during a tick before the tick ends.
    pub reevaluate_idle: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            cadence:         Cadence::Timed { interval_ticks: 5 },
            percentage:      25.0,
            window:          Window::Prefix,
            reevaluate_idle: true,
        }
    }
}

impl AiConfig {
    /// Description of the first invalid field, if any.
    pub fn validate(&self) -> Result<(), String> {
        if !self.percentage.is_finite() || !(0.0..=100.0).contains(&self.percentage) {
            return Err(format!("percentage must be within 0..=100, got {}", self.percentage));
        }
        if let Cadence::Timed { interval_ticks: 0 } = self.cadence {
            return Err("timed cadence needs interval_ticks > 0".into());
        }
        Ok(())
    }
}

// ── AiManager ─────────────────────────────────────────────────────────────────

/// Owns the scene's agent registry and decides which agents are evaluated
/// on which tick.
///
/// The registry holds ids only; agents themselves live in the
/// [`AgentStore`][rts_agent::AgentStore].  Despawned agents are deregistered
/// by the scene, and every id is still checked for liveness before use.
#[derive(Debug)]
pub struct AiManager {
    config:    AiConfig,
    registry:  Vec<AgentId>,
    cursor:    usize,
    last_pass: Option<Tick>,
    requested: bool,
    in_pass:   bool,
    passes:    u64,
}

impl AiManager {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            registry:  Vec::new(),
            cursor:    0,
            last_pass: None,
            requested: false,
            in_pass:   false,
            passes:    0,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    // ── Registry ──────────────────────────────────────────────────────────

    /// Append `agent`.  Returns `false` if it was already registered.
    pub fn register(&mut self, agent: AgentId) -> bool {
        if self.registry.contains(&agent) {
            return false;
        }
        self.registry.push(agent);
        true
    }

    /// Remove `agent`, keeping the cursor on the same successor.
    pub fn deregister(&mut self, agent: AgentId) -> bool {
        let Some(index) = self.registry.iter().position(|&a| a == agent) else {
            return false;
        };
        self.registry.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        true
    }

    /// Registered agents in insertion order.
    pub fn registered(&self) -> &[AgentId] {
        &self.registry
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.registry.contains(&agent)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Completed evaluation passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    // ── Cadence ───────────────────────────────────────────────────────────

    /// Force a pass on the next tick regardless of cadence.
    pub fn request_evaluation(&mut self) {
        self.requested = true;
    }

    pub fn is_due(&self, now: Tick) -> bool {
        if self.requested {
            return true;
        }
        match self.config.cadence {
            Cadence::EveryTick => true,
            Cadence::Timed { interval_ticks } => {
                self.last_pass.is_none_or(|last| now.since(last) >= interval_ticks)
            }
            Cadence::Manual => false,
        }
    }

    /// Cursor step for a registry of `total` agents.
    ///
    /// Rounds down, so small shares can yield 0, which then falls back to
    /// `total` (3 agents at 1 % evaluate all 3 in one pass).
    pub fn increment(&self, total: usize) -> usize {
        let step = (total as f64 * f64::from(self.config.percentage) / 100.0).floor() as usize;
        if step == 0 { total } else { step }
    }

    /// Advance the cursor one pass and return the index range to evaluate.
    pub fn next_window(&mut self) -> Range<usize> {
        let total = self.registry.len();
        if self.cursor >= total {
            self.cursor = 0;
        }
        let start = self.cursor;
        self.cursor = (self.cursor + self.increment(total)).min(total);
        match self.config.window {
            Window::Prefix => 0..self.cursor,
            Window::Sliding => start..self.cursor,
        }
    }

    /// Start an evaluation pass if one is due, returning the agents to
    /// evaluate.  `None` while another pass is still open.
    pub fn begin_pass(&mut self, now: Tick) -> Option<Vec<AgentId>> {
        if self.in_pass {
            tracing::warn!(%now, "evaluation pass already in progress");
            return None;
        }
        if !self.is_due(now) {
            return None;
        }
        self.in_pass = true;
        self.requested = false;
        self.last_pass = Some(now);

        let window = match self.config.cadence {
            Cadence::EveryTick => 0..self.registry.len(),
            Cadence::Timed { .. } | Cadence::Manual => self.next_window(),
        };
        tracing::debug!(%now, start = window.start, end = window.end, total = self.registry.len(), "evaluation pass");
        Some(self.registry[window].to_vec())
    }

    /// Close the pass opened by [`begin_pass`][Self::begin_pass].
    pub fn end_pass(&mut self) {
        if self.in_pass {
            self.in_pass = false;
            self.passes += 1;
        }
    }

    pub fn in_pass(&self) -> bool {
        self.in_pass
    }
}

//! Per-object components: health, resource piles and nav agents.

use rts_core::{ObjectId, Point, ResourceKind, Signal};

// ── Health ────────────────────────────────────────────────────────────────────

/// Hit points plus a fire-once death notification.
#[derive(Debug)]
pub struct Health {
    current:  u32,
    max:      u32,
    on_death: Signal<ObjectId>,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max, on_death: Signal::new() }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Current health as a fraction of max in `[0, 1]`.
    pub fn ratio(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    /// Subtract `amount`.  Returns `true` only on the hit that kills.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.current = self.current.saturating_sub(amount);
        self.is_dead()
    }

    pub fn on_death(&self) -> &Signal<ObjectId> {
        &self.on_death
    }
}

// ── ResourcePile ──────────────────────────────────────────────────────────────

/// A finite stock of one resource kind that workers withdraw from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePile {
    pub kind:   ResourceKind,
    pub amount: u32,
}

impl ResourcePile {
    pub fn new(kind: ResourceKind, amount: u32) -> Self {
        Self { kind, amount }
    }

    /// Remove `min(requested, amount)` and return the withdrawn quantity.
    pub fn withdraw(&mut self, requested: u32) -> u32 {
        let taken = requested.min(self.amount);
        self.amount -= taken;
        taken
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

// ── NavAgent ──────────────────────────────────────────────────────────────────

/// Straight-line stand-in for a navigation-mesh agent.
///
/// A new destination is "pending" until the next world step, mirroring the
/// asynchronous path computation of a real navigator.  Movement stops once
/// the remaining distance is within `stopping_distance`.
#[derive(Clone, Debug, PartialEq)]
pub struct NavAgent {
    /// Ground speed in world units per second.
    pub speed:             f32,
    pub stopping_distance: f32,
    destination:           Option<Point>,
    pending:               bool,
}

impl NavAgent {
    pub fn new(speed: f32) -> Self {
        Self { speed, stopping_distance: 0.0, destination: None, pending: false }
    }

    pub fn set_destination(&mut self, point: Point) {
        self.destination = Some(point);
        self.pending = true;
    }

    pub fn reset_path(&mut self) {
        self.destination = None;
        self.pending = false;
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    pub fn is_path_pending(&self) -> bool {
        self.pending
    }

    /// Planar distance from `from` to the destination; 0 without one.
    pub fn remaining_distance(&self, from: Point) -> f32 {
        self.destination.map_or(0.0, |d| from.planar_distance(d))
    }

    /// Resolve a pending path and advance `from` by one step of `dt_secs`.
    pub fn step(&mut self, from: Point, dt_secs: f32) -> Point {
        self.pending = false;
        let Some(dest) = self.destination else {
            return from;
        };
        let remaining = from.planar_distance(dest) - self.stopping_distance;
        if remaining <= 0.0 {
            return from;
        }
        from.step_toward(dest, (self.speed * dt_secs).min(remaining))
    }
}

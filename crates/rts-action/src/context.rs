//! Per-call state handed to every [`Action`][crate::Action] method.

use rts_core::time::ticks_for_secs;
use rts_core::{ObjectId, PlayerId, Point, Tick};
use rts_world::Host;

/// Who is acting, when, and through which collaborators.
///
/// Built by the scene once per agent call and dropped straight after, so the
/// `&mut dyn Host` borrow never outlives a single agent's update or
/// transition.
pub struct ActionContext<'a> {
    /// Current simulation tick.
    pub now: Tick,

    /// Milliseconds of game time one tick represents.
    pub tick_duration_ms: u32,

    /// The unit body the acting agent drives.
    pub unit: ObjectId,

    /// The player owning `unit`.
    pub owner: PlayerId,

    /// Movement, combat, economy, spawn and scene services.
    pub host: &'a mut dyn Host,
}

impl<'a> ActionContext<'a> {
    #[inline]
    pub fn new(
        now:              Tick,
        tick_duration_ms: u32,
        unit:             ObjectId,
        owner:            PlayerId,
        host:             &'a mut dyn Host,
    ) -> Self {
        Self { now, tick_duration_ms, unit, owner, host }
    }

    /// Current position of the acting unit, `None` once it is gone.
    #[inline]
    pub fn unit_position(&self) -> Option<Point> {
        self.host.position(self.unit)
    }

    /// Planar distance from the acting unit to `object`.
    pub fn distance_to(&self, object: ObjectId) -> Option<f32> {
        let from = self.unit_position()?;
        Some(from.planar_distance(self.host.position(object)?))
    }

    /// Absolute tick `secs` of game time from now (rounded up).
    #[inline]
    pub fn deadline(&self, secs: f32) -> Tick {
        self.now + ticks_for_secs(self.tick_duration_ms, secs)
    }

    /// Like [`deadline`][Self::deadline] but never earlier than the next
    /// tick, for repeating cooldowns.
    #[inline]
    pub fn cooldown(&self, secs: f32) -> Tick {
        self.now + ticks_for_secs(self.tick_duration_ms, secs).max(1)
    }

    /// `true` once `deadline` has been reached.
    #[inline]
    pub fn reached(&self, deadline: Tick) -> bool {
        self.now >= deadline
    }
}

//! The `Action` trait — one capability a unit can attempt.

use std::fmt;
use std::sync::Arc;

use rts_core::{Layer, ObjectId, Point};

use crate::ActionContext;

// ── ActionId ──────────────────────────────────────────────────────────────────

/// Name an action is registered and commanded under (`"move"`, `"attack"`).
///
/// Cheap to clone; every instance of one template shares the same string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ActionId(Arc<str>);

impl ActionId {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for ActionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ── ActionInfo ────────────────────────────────────────────────────────────────

/// Display metadata shared by every instance of an action template.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionInfo {
    pub id:          ActionId,
    pub icon:        String,
    pub description: String,
    /// Offered when the player designates a target without picking an
    /// action explicitly ("smart" right-click).
    pub smart:       bool,
}

impl ActionInfo {
    pub fn new(name: &str) -> Self {
        Self {
            id:          ActionId::new(name),
            icon:        String::new(),
            description: String::new(),
            smart:       false,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_owned();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    pub fn smart(mut self, smart: bool) -> Self {
        self.smart = smart;
        self
    }
}

// ── UtilityWeights ────────────────────────────────────────────────────────────

/// Score scale for an action.
///
/// * `command` — score of a bound, unfinished action.  Keeps a player's
///   order in place against autonomous alternatives.
/// * `autonomous` — upper bound for self-initiated use.  Actions that can
///   pick their own target scale it by proximity; 0 disables autonomy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UtilityWeights {
    pub command:    f32,
    pub autonomous: f32,
}

impl UtilityWeights {
    pub const fn new(command: f32, autonomous: f32) -> Self {
        Self { command, autonomous }
    }

    /// Only ever runs when ordered.
    pub const fn commanded() -> Self {
        Self::new(1.0, 0.0)
    }

    /// `autonomous * (1 - distance / radius)`, 0 outside the radius.
    pub fn proximity(&self, distance: f32, radius: f32) -> f32 {
        if radius <= 0.0 || distance > radius {
            return 0.0;
        }
        self.autonomous * (1.0 - distance / radius)
    }
}

impl Default for UtilityWeights {
    fn default() -> Self {
        Self::commanded()
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

/// A unit of AI behaviour with an evaluate / enter / execute / update /
/// exit / cancel lifecycle.
///
/// # Lifecycle
///
/// ```text
///            set_variables ─► (bound)
/// evaluate ─► enter ─► execute ─► update* ─► exit
///                                    └─────► cancel
/// ```
///
/// * [`enter`][Self::enter] resets per-run state (paths, timers).
/// * [`execute`][Self::execute] commits the immediate effect (issue the
///   move order) and reports whether that worked.
/// * [`update`][Self::update] runs once per tick while current.  Multi-tick
///   behaviour is stored as absolute deadlines compared against
///   [`ActionContext::now`]; nothing blocks.
/// * [`exit`][Self::exit] runs when superseded and, unless overridden,
///   forwards to [`cancel`][Self::cancel].
/// * `cancel` releases everything the action holds (reserved payment, death
///   listeners, placement indicators).  It must be idempotent.
///
/// # Targets
///
/// [`set_variables`][Self::set_variables] validates and binds a designation.
/// On rejection it must leave the instance exactly as it was: composites
/// validate every part before committing any.
///
/// # Instances
///
/// Templates live in an [`ActionLibrary`][crate::ActionLibrary].  Each agent
/// holds its own instances, and every command binds a brand-new one from
/// [`instantiate`][Self::instantiate], which copies configuration only.
pub trait Action: fmt::Debug {
    fn info(&self) -> &ActionInfo;

    #[inline]
    fn id(&self) -> &ActionId {
        &self.info().id
    }

    /// Utility score; higher is more desirable and 0 means not applicable.
    fn evaluate(&self, ctx: &ActionContext<'_>) -> f32;

    /// `true` when the goal holds or the bound target became invalid.
    fn has_completed(&self, ctx: &ActionContext<'_>) -> bool;

    fn enter(&mut self, ctx: &mut ActionContext<'_>);

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> bool;

    fn update(&mut self, ctx: &mut ActionContext<'_>);

    fn exit(&mut self, ctx: &mut ActionContext<'_>) {
        self.cancel(ctx);
    }

    fn cancel(&mut self, ctx: &mut ActionContext<'_>);

    /// Validate and bind a designated target object and/or point lying on
    /// `layer`.  Returns `false`, changing nothing, if the designation does
    /// not suit this action.
    fn set_variables(
        &mut self,
        ctx:    &ActionContext<'_>,
        target: Option<ObjectId>,
        point:  Option<Point>,
        layer:  Layer,
    ) -> bool;

    /// `true` while a valid target is bound.
    fn valid_target(&self) -> bool;

    /// A fresh, unbound instance with this action's configuration.
    fn instantiate(&self) -> Box<dyn Action>;
}

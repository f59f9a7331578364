//! Per-unit AI runtime.

use std::collections::VecDeque;

use rts_action::{Action, ActionContext, ActionId};
use rts_core::{AgentId, Layer, ObjectId, PlayerId, Point, Tick};
use rts_world::Host;

// ── Requests ──────────────────────────────────────────────────────────────────

/// "Do `action` on this target", as produced by the command surface.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionRequest {
    pub action: ActionId,
    pub target: Option<ObjectId>,
    pub point:  Option<Point>,
    pub layer:  Layer,
    /// Append behind the current action instead of replacing it.
    pub queue:  bool,
}

impl ActionRequest {
    pub fn new(action: impl Into<ActionId>) -> Self {
        Self { action: action.into(), target: None, point: None, layer: Layer::GROUND, queue: false }
    }

    pub fn at(mut self, point: Point) -> Self {
        self.point = Some(point);
        self
    }

    pub fn on(mut self, target: ObjectId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn queued(mut self, queue: bool) -> Self {
        self.queue = queue;
        self
    }
}

/// What [`Agent::add_action`] did with a request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// Became the current action.
    Started,
    /// Appended to the queue.
    Queued,
    /// Unknown action or invalid target; nothing changed.
    Rejected,
}

/// What [`Agent::advance_if_completed`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// No current action, or it has not completed.
    Running,
    /// The current action completed and the next queued one started.
    Dequeued,
    /// The current action completed and nothing was queued.
    Idle,
}

/// Read-only view for the display surface.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub agent:   AgentId,
    pub unit:    ObjectId,
    pub current: Option<ActionId>,
    pub queued:  Vec<ActionId>,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

enum Current {
    /// One of the agent's own possible instances, picked by evaluation.
    Possible(usize),
    /// A commanded instance, owned outright.
    Commanded(Box<dyn Action>),
}

/// Holds the unit's possible actions, at most one current action, and a
/// FIFO of queued commands.
///
/// Every switch exits the old action before the new one is entered and
/// executed.
pub struct Agent {
    id:          AgentId,
    unit:        ObjectId,
    owner:       PlayerId,
    possible:    Vec<Box<dyn Action>>,
    current:     Option<Current>,
    queue:       VecDeque<Box<dyn Action>>,
    transitions: u64,
}

impl Agent {
    pub fn new(id: AgentId, unit: ObjectId, owner: PlayerId, possible: Vec<Box<dyn Action>>) -> Self {
        Self {
            id,
            unit,
            owner,
            possible,
            current: None,
            queue: VecDeque::new(),
            transitions: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn unit(&self) -> ObjectId {
        self.unit
    }

    #[inline]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Context for calling into this agent's actions.
    pub fn context<'a>(&self, now: Tick, tick_duration_ms: u32, host: &'a mut dyn Host) -> ActionContext<'a> {
        ActionContext::new(now, tick_duration_ms, self.unit, self.owner, host)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn possible_actions(&self) -> impl Iterator<Item = &dyn Action> + '_ {
        self.possible.iter().map(|a| a.as_ref())
    }

    pub fn current(&self) -> Option<&dyn Action> {
        match self.current.as_ref()? {
            Current::Possible(i) => Some(&**self.possible.get(*i)?),
            Current::Commanded(a) => Some(&**a),
        }
    }

    pub fn current_id(&self) -> Option<&ActionId> {
        self.current().map(|a| a.id())
    }

    /// `true` if the current action was commanded rather than self-selected.
    pub fn is_commanded(&self) -> bool {
        matches!(self.current, Some(Current::Commanded(_)))
    }

    pub fn queued(&self) -> impl Iterator<Item = &dyn Action> + '_ {
        self.queue.iter().map(|a| a.as_ref())
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Number of action switches so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            agent:   self.id,
            unit:    self.unit,
            current: self.current_id().cloned(),
            queued:  self.queue.iter().map(|a| a.id().clone()).collect(),
        }
    }

    fn current_mut(&mut self) -> Option<&mut dyn Action> {
        match self.current.as_mut()? {
            Current::Possible(i) => Some(&mut **self.possible.get_mut(*i)?),
            Current::Commanded(a) => Some(&mut **a),
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Exit the current action (if any), then enter and execute `next`.
    fn switch_to(&mut self, ctx: &mut ActionContext<'_>, next: Current) {
        if let Some(old) = self.current_mut() {
            old.exit(ctx);
        }
        self.current = Some(next);
        self.transitions += 1;
        if let Some(new) = self.current_mut() {
            new.enter(ctx);
            if !new.execute(ctx) {
                tracing::debug!(unit = %ctx.unit, action = %new.id(), "execute had no effect");
            }
        }
    }

    /// Bind a fresh instance of the named possible action to the request's
    /// target.  A rejected request leaves current and queued state untouched.
    ///
    /// A non-queued request replaces the current action and discards the
    /// queue.  A queued request on an idle agent starts immediately.
    pub fn add_action(&mut self, ctx: &mut ActionContext<'_>, request: &ActionRequest) -> AddOutcome {
        let Some(template) = self.possible.iter().find(|a| *a.id() == request.action) else {
            tracing::warn!(agent = %self.id, action = %request.action, "agent has no such action");
            return AddOutcome::Rejected;
        };
        let mut instance = template.instantiate();
        if !instance.set_variables(ctx, request.target, request.point, request.layer) {
            tracing::debug!(agent = %self.id, action = %request.action, "target rejected");
            return AddOutcome::Rejected;
        }

        if request.queue && self.current.is_some() {
            self.queue.push_back(instance);
            return AddOutcome::Queued;
        }
        self.queue.clear();
        self.switch_to(ctx, Current::Commanded(instance));
        tracing::debug!(agent = %self.id, action = %request.action, "command started");
        AddOutcome::Started
    }

    /// Per-tick progression of the current action.
    pub fn update_action(&mut self, ctx: &mut ActionContext<'_>) {
        if let Some(action) = self.current_mut() {
            action.update(ctx);
        }
    }

    /// If the current action has completed: exit it and start the next
    /// queued command, or go idle.
    pub fn advance_if_completed(&mut self, ctx: &mut ActionContext<'_>) -> Completion {
        if !self.current().is_some_and(|a| a.has_completed(ctx)) {
            return Completion::Running;
        }
        if let Some(done) = self.current_mut() {
            done.exit(ctx);
        }
        self.current = None;

        match self.queue.pop_front() {
            Some(next) => {
                self.switch_to(ctx, Current::Commanded(next));
                Completion::Dequeued
            }
            None => {
                tracing::debug!(agent = %self.id, "idle");
                Completion::Idle
            }
        }
    }

    /// Score every possible action and switch to the strict best.
    ///
    /// Scores are compared with `>`, so among equal maxima the first possible
    /// action wins.  A non-positive maximum selects nothing, and selecting
    /// the current possible action again is a no-op.
    ///
    /// A commanded current action is only displaced by a score above its own
    /// (floored at 0); self-selected actions carry no such bar.  Returns the
    /// newly selected action's id.
    pub fn evaluate_actions(&mut self, ctx: &mut ActionContext<'_>) -> Option<ActionId> {
        let floor = match &self.current {
            Some(Current::Commanded(a)) => a.evaluate(ctx).max(0.0),
            _ => 0.0,
        };

        let mut best: Option<usize> = None;
        let mut best_score = floor;
        for (i, action) in self.possible.iter().enumerate() {
            let score = action.evaluate(ctx);
            if score > best_score {
                best_score = score;
                best = Some(i);
            }
        }

        let index = best?;
        if matches!(self.current, Some(Current::Possible(j)) if j == index) {
            return None;
        }
        let id = self.possible[index].id().clone();
        tracing::debug!(agent = %self.id, action = %id, score = best_score, floor, "selected");
        self.switch_to(ctx, Current::Possible(index));
        Some(id)
    }

    /// Cancel the current action and drop every queued one.
    pub fn clear_all_actions(&mut self, ctx: &mut ActionContext<'_>) {
        if let Some(action) = self.current_mut() {
            action.cancel(ctx);
        }
        if self.current.take().is_some() {
            self.transitions += 1;
        }
        self.queue.clear();
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("unit", &self.unit)
            .field("owner", &self.owner)
            .field("current", &self.current_id())
            .field("queued", &self.queue.len())
            .finish()
    }
}

//! Chase a hostile object and damage it on a cooldown.

use std::cell::Cell;
use std::rc::Rc;

use rts_core::{Layer, ObjectId, Point, Subscription, Tick};
use rts_world::is_hostile;

use crate::{Action, ActionContext, ActionInfo, MoveToTarget, MoveToTargetParams, UtilityWeights};

#[derive(Clone, Debug, PartialEq)]
pub struct DirectedAttackParams {
    pub damage:            u32,
    pub attack_range:      f32,
    pub attack_delay_secs: f32,
    /// Radius searched for a victim when the attack starts without one.
    pub aggro_radius:      f32,
    pub follow:            MoveToTargetParams,
    pub weights:           UtilityWeights,
}

impl Default for DirectedAttackParams {
    fn default() -> Self {
        Self {
            damage:            10,
            attack_range:      2.0,
            attack_delay_secs: 1.0,
            aggro_radius:      12.0,
            follow:            MoveToTargetParams::default(),
            weights:           UtilityWeights::new(1.0, 0.8),
        }
    }
}

/// Wraps [`MoveToTarget`]; deals damage whenever the cooldown has elapsed
/// and the target is within range.
///
/// The target's death is observed through a fire-once subscription.  Once
/// it fires the target counts as lost: no further damage is applied and the
/// action reports completion.
#[derive(Debug)]
pub struct DirectedAttack {
    info:        ActionInfo,
    params:      DirectedAttackParams,
    chase:       MoveToTarget,
    target:      Option<ObjectId>,
    target_dead: Rc<Cell<bool>>,
    on_death:    Subscription,
    next_attack: Tick,
}

impl DirectedAttack {
    pub fn new(info: ActionInfo, params: DirectedAttackParams) -> Self {
        let chase = MoveToTarget::new(info.clone(), params.follow.clone());
        Self {
            info,
            params,
            chase,
            target:      None,
            target_dead: Rc::new(Cell::new(false)),
            on_death:    Subscription::detached(),
            next_attack: Tick::ZERO,
        }
    }

    pub fn params(&self) -> &DirectedAttackParams {
        &self.params
    }

    /// The bound victim, `None` once it died.
    pub fn target(&self) -> Option<ObjectId> {
        self.target.filter(|_| !self.target_dead.get())
    }

    /// `true` while the death listener is attached.
    pub fn is_watching(&self) -> bool {
        self.on_death.is_active()
    }

    fn acceptable(ctx: &ActionContext<'_>, target: ObjectId) -> bool {
        ctx.host.has_health(target)
            && ctx.host.owner(target).is_some_and(|o| is_hostile(ctx.owner, o))
    }

    fn nearest_victim(&self, ctx: &ActionContext<'_>) -> Option<(ObjectId, f32)> {
        let from = ctx.unit_position()?;
        ctx.host.nearest_hostile(from, ctx.owner, self.params.aggro_radius)
    }

    fn lose_target(&mut self) {
        self.on_death.unsubscribe();
        self.target = None;
    }
}

impl Action for DirectedAttack {
    fn info(&self) -> &ActionInfo {
        &self.info
    }

    fn evaluate(&self, ctx: &ActionContext<'_>) -> f32 {
        if self.valid_target() {
            return if self.has_completed(ctx) { 0.0 } else { self.params.weights.command };
        }
        if self.params.weights.autonomous <= 0.0 {
            return 0.0;
        }
        self.nearest_victim(ctx)
            .map_or(0.0, |(_, d)| self.params.weights.proximity(d, self.params.aggro_radius))
    }

    fn has_completed(&self, ctx: &ActionContext<'_>) -> bool {
        let Some(target) = self.target() else {
            return true;
        };
        !ctx.host.is_alive(target) || self.chase.has_completed(ctx)
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_>) {
        if self.target.is_none() && self.params.weights.autonomous > 0.0 {
            if let Some((victim, _)) = self.nearest_victim(ctx) {
                self.set_variables(ctx, Some(victim), None, Layer::GROUND);
            }
        }
        self.chase.enter(ctx);
        self.next_attack = ctx.now;

        self.on_death.unsubscribe();
        self.target_dead = Rc::new(Cell::new(false));
        if let Some(target) = self.target {
            let dead = Rc::clone(&self.target_dead);
            match ctx.host.subscribe_death(target, Box::new(move |_| dead.set(true))) {
                Some(sub) => self.on_death = sub,
                None => tracing::warn!(%target, "attack target has no death notification"),
            }
        }
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        self.target().is_some() && self.chase.execute(ctx)
    }

    fn update(&mut self, ctx: &mut ActionContext<'_>) {
        let Some(target) = self.target() else {
            if self.target.is_some() {
                tracing::debug!(unit = %ctx.unit, "attack target died");
                self.lose_target();
                self.chase.cancel(ctx);
            }
            return;
        };
        if !ctx.host.is_alive(target) {
            self.lose_target();
            self.chase.cancel(ctx);
            return;
        }

        self.chase.update(ctx);
        if ctx.reached(self.next_attack) && self.chase.in_range(ctx, self.params.attack_range) {
            ctx.host.apply_damage(target, self.params.damage);
            self.next_attack = ctx.cooldown(self.params.attack_delay_secs);
            tracing::debug!(unit = %ctx.unit, %target, damage = self.params.damage, "attack");
        }
    }

    fn cancel(&mut self, ctx: &mut ActionContext<'_>) {
        self.lose_target();
        self.chase.cancel(ctx);
    }

    fn set_variables(
        &mut self,
        ctx:    &ActionContext<'_>,
        target: Option<ObjectId>,
        point:  Option<Point>,
        layer:  Layer,
    ) -> bool {
        let Some(victim) = target else {
            return false;
        };
        if !Self::acceptable(ctx, victim) {
            return false;
        }
        // The chase validates and commits only on success.
        if !self.chase.set_variables(ctx, target, point, layer) {
            return false;
        }
        self.on_death.unsubscribe();
        self.target_dead.set(false);
        self.target = Some(victim);
        true
    }

    fn valid_target(&self) -> bool {
        self.target().is_some()
    }

    fn instantiate(&self) -> Box<dyn Action> {
        Box::new(Self::new(self.info.clone(), self.params.clone()))
    }
}

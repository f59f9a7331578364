//! Harvest a resource pile into the owner's ledger.

use rts_core::{Layer, ObjectId, Point, Tick};

use crate::{Action, ActionContext, ActionInfo, MoveToTarget, MoveToTargetParams, UtilityWeights};

#[derive(Clone, Debug, PartialEq)]
pub struct CollectResourceParams {
    /// Requested per collection; the pile yields `min(amount, available)`.
    pub amount:              u32,
    pub collect_secs:        f32,
    pub collect_range:       f32,
    /// Radius searched for a pile when collection starts without one.
    pub search_radius:       f32,
    pub complete_when_empty: bool,
    pub follow:              MoveToTargetParams,
    pub weights:             UtilityWeights,
}

impl Default for CollectResourceParams {
    fn default() -> Self {
        Self {
            amount:              5,
            collect_secs:        1.0,
            collect_range:       2.0,
            search_radius:       15.0,
            complete_when_empty: true,
            follow:              MoveToTargetParams::default(),
            weights:             UtilityWeights::new(1.0, 0.4),
        }
    }
}

/// Wraps [`MoveToTarget`] onto an object carrying a resource pile.
#[derive(Debug)]
pub struct CollectResource {
    info:         ActionInfo,
    params:       CollectResourceParams,
    chase:        MoveToTarget,
    target:       Option<ObjectId>,
    next_collect: Tick,
    collected:    u32,
}

impl CollectResource {
    pub fn new(info: ActionInfo, params: CollectResourceParams) -> Self {
        let chase = MoveToTarget::new(info.clone(), params.follow.clone());
        Self { info, params, chase, target: None, next_collect: Tick::ZERO, collected: 0 }
    }

    pub fn params(&self) -> &CollectResourceParams {
        &self.params
    }

    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    /// Total withdrawn by this instance.
    pub fn collected(&self) -> u32 {
        self.collected
    }

    fn nearest_pile(&self, ctx: &ActionContext<'_>) -> Option<(ObjectId, f32)> {
        let from = ctx.unit_position()?;
        ctx.host.nearest_pile(from, self.params.search_radius)
    }
}

impl Action for CollectResource {
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
        self.nearest_pile(ctx)
            .map_or(0.0, |(_, d)| self.params.weights.proximity(d, self.params.search_radius))
    }

    fn has_completed(&self, ctx: &ActionContext<'_>) -> bool {
        let Some(target) = self.target else {
            return true;
        };
        let Some(pile) = ctx.host.pile(target) else {
            return true;
        };
        (self.params.complete_when_empty && pile.is_empty()) || self.chase.has_completed(ctx)
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_>) {
        if self.target.is_none() && self.params.weights.autonomous > 0.0 {
            if let Some((pile, _)) = self.nearest_pile(ctx) {
                self.set_variables(ctx, Some(pile), None, Layer::GROUND);
            }
        }
        self.chase.enter(ctx);
        self.next_collect = ctx.now;
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        self.target.is_some() && self.chase.execute(ctx)
    }

    fn update(&mut self, ctx: &mut ActionContext<'_>) {
        let Some(target) = self.target else {
            return;
        };
        if !ctx.host.is_alive(target) {
            self.target = None;
            self.chase.cancel(ctx);
            return;
        }

        self.chase.update(ctx);
        if !ctx.reached(self.next_collect) || !self.chase.in_range(ctx, self.params.collect_range) {
            return;
        }
        self.next_collect = ctx.cooldown(self.params.collect_secs);
        if let Some((kind, taken)) = ctx.host.withdraw(target, self.params.amount) {
            if taken > 0 {
                ctx.host.credit(ctx.owner, kind, taken);
                self.collected += taken;
                tracing::debug!(unit = %ctx.unit, pile = %target, taken, "collected");
            }
        }
    }

    fn cancel(&mut self, ctx: &mut ActionContext<'_>) {
        self.chase.cancel(ctx);
        self.target = None;
    }

    fn set_variables(
        &mut self,
        ctx:    &ActionContext<'_>,
        target: Option<ObjectId>,
        point:  Option<Point>,
        layer:  Layer,
    ) -> bool {
        let Some(pile) = target else {
            return false;
        };
        if ctx.host.pile(pile).is_none() {
            return false;
        }
        if !self.chase.set_variables(ctx, target, point, layer) {
            return false;
        }
        self.target = Some(pile);
        true
    }

    fn valid_target(&self) -> bool {
        self.target.is_some()
    }

    fn instantiate(&self) -> Box<dyn Action> {
        Box::new(Self::new(self.info.clone(), self.params.clone()))
    }
}

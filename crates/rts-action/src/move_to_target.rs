//! Follow a (possibly moving) scene object.

use rts_core::{Layer, LayerMask, ObjectId, Point, Tick};

use crate::{Action, ActionContext, ActionInfo, MoveToPoint, MoveToPointParams, UtilityWeights};

#[derive(Clone, Debug, PartialEq)]
pub struct MoveToTargetParams {
    /// Seconds between re-aiming the navigator at the target.
    pub repoll_secs:         f32,
    /// Give up once the target is farther than this.
    pub max_follow_distance: f32,
    pub stopping_distance:   f32,
    pub weights:             UtilityWeights,
}

impl Default for MoveToTargetParams {
    fn default() -> Self {
        Self {
            repoll_secs:         0.5,
            max_follow_distance: 50.0,
            stopping_distance:   1.5,
            weights:             UtilityWeights::commanded(),
        }
    }
}

/// Wraps [`MoveToPoint`] and re-aims it at the target's current position on
/// a fixed interval rather than every tick.
#[derive(Debug)]
pub struct MoveToTarget {
    info:        ActionInfo,
    params:      MoveToTargetParams,
    mover:       MoveToPoint,
    target:      Option<ObjectId>,
    next_repoll: Tick,
}

impl MoveToTarget {
    pub fn new(info: ActionInfo, params: MoveToTargetParams) -> Self {
        let mover = MoveToPoint::new(
            info.clone(),
            MoveToPointParams {
                stopping_distance: params.stopping_distance,
                allowed_layers:    LayerMask::ALL,
                weights:           params.weights,
            },
        );
        Self { info, params, mover, target: None, next_repoll: Tick::ZERO }
    }

    pub fn params(&self) -> &MoveToTargetParams {
        &self.params
    }

    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    pub fn mover(&self) -> &MoveToPoint {
        &self.mover
    }

    /// Where the target stands right now, if it can be followed at all.
    fn locate(&self, ctx: &ActionContext<'_>, target: ObjectId, layer: Layer) -> Option<Point> {
        if target == ctx.unit || !ctx.host.is_alive(target) {
            return None;
        }
        let at = ctx.host.position(target)?;
        let on = ctx.host.layer_of(target).unwrap_or(layer);
        self.mover.accepts(Some(at), on).then_some(at)
    }

    /// Planar distance from the acting unit to the bound target.
    pub fn distance_to_target(&self, ctx: &ActionContext<'_>) -> Option<f32> {
        ctx.distance_to(self.target?)
    }

    /// `true` when the bound target is alive and within `range`.
    pub fn in_range(&self, ctx: &ActionContext<'_>, range: f32) -> bool {
        self.distance_to_target(ctx).is_some_and(|d| d <= range)
    }
}

impl Action for MoveToTarget {
    fn info(&self) -> &ActionInfo {
        &self.info
    }

    fn evaluate(&self, ctx: &ActionContext<'_>) -> f32 {
        if self.valid_target() && !self.has_completed(ctx) {
            self.params.weights.command
        } else {
            0.0
        }
    }

    fn has_completed(&self, ctx: &ActionContext<'_>) -> bool {
        let Some(target) = self.target else {
            return true;
        };
        if !ctx.host.is_alive(target) {
            return true;
        }
        self.distance_to_target(ctx)
            .is_none_or(|d| d > self.params.max_follow_distance)
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_>) {
        self.mover.enter(ctx);
        self.next_repoll = ctx.now;
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let Some(at) = ctx.host.position(target) else {
            return false;
        };
        self.mover.bind(at);
        self.next_repoll = ctx.cooldown(self.params.repoll_secs);
        self.mover.execute(ctx)
    }

    fn update(&mut self, ctx: &mut ActionContext<'_>) {
        let Some(target) = self.target else {
            return;
        };
        if !ctx.reached(self.next_repoll) {
            return;
        }
        self.next_repoll = ctx.cooldown(self.params.repoll_secs);
        match ctx.host.position(target) {
            Some(at) => self.mover.retarget(ctx, at),
            // Lost; completion reports it on the next check.
            None => ctx.host.reset_path(ctx.unit),
        }
    }

    fn cancel(&mut self, ctx: &mut ActionContext<'_>) {
        self.mover.cancel(ctx);
        self.target = None;
    }

    fn set_variables(
        &mut self,
        ctx:    &ActionContext<'_>,
        target: Option<ObjectId>,
        _point: Option<Point>,
        layer:  Layer,
    ) -> bool {
        let Some(target) = target else {
            return false;
        };
        let Some(at) = self.locate(ctx, target, layer) else {
            return false;
        };
        self.target = Some(target);
        self.mover.bind(at);
        true
    }

    fn valid_target(&self) -> bool {
        self.target.is_some()
    }

    fn instantiate(&self) -> Box<dyn Action> {
        Box::new(Self::new(self.info.clone(), self.params.clone()))
    }
}

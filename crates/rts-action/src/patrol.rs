//! Walk back and forth along a route.

use rts_core::{Layer, LayerMask, ObjectId, Point};

use crate::{Action, ActionContext, ActionInfo, MoveToPoint, MoveToPointParams, UtilityWeights};

#[derive(Clone, Debug, PartialEq)]
pub struct PatrolParams {
    pub stopping_distance: f32,
    pub allowed_layers:    LayerMask,
    pub weights:           UtilityWeights,
}

impl Default for PatrolParams {
    fn default() -> Self {
        Self {
            stopping_distance: 0.5,
            allowed_layers:    LayerMask::ALL,
            weights:           UtilityWeights::commanded(),
        }
    }
}

/// Cycles between two or more points.
///
/// Binding records `[unit position, designated point]`.  Reaching the
/// current point advances the index; running off the end reverses the route
/// and resets the index to 1, so `[A, B]` becomes `[B, A]` heading for `A`.
#[derive(Debug)]
pub struct Patrol {
    info:   ActionInfo,
    params: PatrolParams,
    mover:  MoveToPoint,
    route:  Vec<Point>,
    index:  usize,
}

impl Patrol {
    pub fn new(info: ActionInfo, params: PatrolParams) -> Self {
        let mover = MoveToPoint::new(
            info.clone(),
            MoveToPointParams {
                stopping_distance: params.stopping_distance,
                allowed_layers:    params.allowed_layers,
                weights:           params.weights,
            },
        );
        Self { info, params, mover, route: Vec::new(), index: 0 }
    }

    pub fn route(&self) -> &[Point] {
        &self.route
    }

    /// The point currently walked toward.
    pub fn heading(&self) -> Option<Point> {
        self.route.get(self.index).copied()
    }

    /// Append a point to a bound route.  `false` if nothing is bound yet or
    /// the layer is not allowed.
    pub fn add_waypoint(&mut self, point: Point, layer: Layer) -> bool {
        if self.route.is_empty() || !self.mover.accepts(Some(point), layer) {
            return false;
        }
        self.route.push(point);
        true
    }

    fn advance(&mut self) {
        self.index += 1;
        if self.index >= self.route.len() {
            self.route.reverse();
            self.index = 1;
        }
    }
}

impl Action for Patrol {
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

    fn has_completed(&self, _ctx: &ActionContext<'_>) -> bool {
        !self.valid_target()
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_>) {
        self.mover.enter(ctx);
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let Some(point) = self.heading() else {
            return false;
        };
        self.mover.bind(point);
        self.mover.execute(ctx)
    }

    fn update(&mut self, ctx: &mut ActionContext<'_>) {
        if !self.valid_target() || !self.mover.has_completed(ctx) {
            return;
        }
        self.advance();
        if let Some(next) = self.heading() {
            tracing::debug!(unit = %ctx.unit, index = self.index, %next, "patrol leg");
            self.mover.bind(next);
            if !self.mover.execute(ctx) {
                tracing::debug!(unit = %ctx.unit, %next, "patrol leg not accepted by navigator");
            }
        }
    }

    fn cancel(&mut self, ctx: &mut ActionContext<'_>) {
        self.mover.cancel(ctx);
        self.route.clear();
        self.index = 0;
    }

    fn set_variables(
        &mut self,
        ctx:     &ActionContext<'_>,
        _target: Option<ObjectId>,
        point:   Option<Point>,
        layer:   Layer,
    ) -> bool {
        let (Some(point), Some(start)) = (point, ctx.unit_position()) else {
            return false;
        };
        if !self.mover.accepts(Some(point), layer) {
            return false;
        }
        self.route = vec![start, point];
        self.index = 1;
        self.mover.bind(point);
        true
    }

    fn valid_target(&self) -> bool {
        self.route.len() >= 2
    }

    fn instantiate(&self) -> Box<dyn Action> {
        Box::new(Self::new(self.info.clone(), self.params.clone()))
    }
}

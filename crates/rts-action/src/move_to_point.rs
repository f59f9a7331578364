//! Walk to a designated point.

use rts_core::{Layer, LayerMask, ObjectId, Point};

use crate::{Action, ActionContext, ActionInfo, UtilityWeights};

/// Slack on the arrival check.  The navigator parks exactly on the stopping
/// radius, give or take float error.
const ARRIVAL_EPSILON: f32 = 1e-3;

#[derive(Clone, Debug, PartialEq)]
pub struct MoveToPointParams {
    /// Arrival radius handed to the navigator.
    pub stopping_distance: f32,
    /// Surface layers a destination may lie on.
    pub allowed_layers:    LayerMask,
    pub weights:           UtilityWeights,
}

impl Default for MoveToPointParams {
    fn default() -> Self {
        Self {
            stopping_distance: 0.5,
            allowed_layers:    LayerMask::ALL,
            weights:           UtilityWeights::commanded(),
        }
    }
}

/// Leaf movement action; also the movement half of every composite.
#[derive(Debug)]
pub struct MoveToPoint {
    info:   ActionInfo,
    params: MoveToPointParams,
    target: Option<Point>,
    /// Set once the navigator accepted a destination for this run.
    issued: bool,
}

impl MoveToPoint {
    pub fn new(info: ActionInfo, params: MoveToPointParams) -> Self {
        Self { info, params, target: None, issued: false }
    }

    pub fn params(&self) -> &MoveToPointParams {
        &self.params
    }

    pub fn target(&self) -> Option<Point> {
        self.target
    }

    /// Would `set_variables` accept `point` on `layer`?
    #[inline]
    pub fn accepts(&self, point: Option<Point>, layer: Layer) -> bool {
        point.is_some() && self.params.allowed_layers.contains(layer)
    }

    /// Bind without validation.  Callers validate with [`accepts`][Self::accepts].
    pub(crate) fn bind(&mut self, point: Point) {
        self.target = Some(point);
    }

    /// Point the navigator at a new destination.  Re-issues the order only
    /// if one was already running.
    pub(crate) fn retarget(&mut self, ctx: &mut ActionContext<'_>, point: Point) {
        self.target = Some(point);
        if self.issued {
            self.issued = ctx.host.set_destination(ctx.unit, point);
        }
    }

    /// Remaining distance to the bound point.  The navigator is authoritative
    /// once an order is running; before that, straight-line distance.
    pub fn remaining(&self, ctx: &ActionContext<'_>) -> Option<f32> {
        let target = self.target?;
        if self.issued {
            if let Some(d) = ctx.host.remaining_distance(ctx.unit) {
                return Some(d);
            }
        }
        Some(ctx.unit_position()?.planar_distance(target))
    }
}

impl Action for MoveToPoint {
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
        if self.target.is_none() {
            return true;
        }
        if self.issued && ctx.host.is_path_pending(ctx.unit) {
            return false;
        }
        // A unit that no longer exists cannot get any closer.
        self.remaining(ctx)
            .is_none_or(|d| d <= self.params.stopping_distance + ARRIVAL_EPSILON)
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_>) {
        ctx.host.reset_path(ctx.unit);
        ctx.host.set_stopping_distance(ctx.unit, self.params.stopping_distance);
        self.issued = false;
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let Some(point) = self.target else {
            return false;
        };
        self.issued = ctx.host.set_destination(ctx.unit, point);
        if !self.issued {
            tracing::warn!(unit = %ctx.unit, action = %self.info.id, "unit cannot navigate; move ignored");
        }
        self.issued
    }

    fn update(&mut self, _ctx: &mut ActionContext<'_>) {
        // The navigator drives the unit; completion is polled.
    }

    fn cancel(&mut self, ctx: &mut ActionContext<'_>) {
        if self.issued {
            ctx.host.reset_path(ctx.unit);
            self.issued = false;
        }
        self.target = None;
    }

    fn set_variables(
        &mut self,
        _ctx:    &ActionContext<'_>,
        _target: Option<ObjectId>,
        point:   Option<Point>,
        layer:   Layer,
    ) -> bool {
        match point {
            Some(p) if self.accepts(point, layer) => {
                self.bind(p);
                true
            }
            _ => false,
        }
    }

    fn valid_target(&self) -> bool {
        self.target.is_some()
    }

    fn instantiate(&self) -> Box<dyn Action> {
        Box::new(Self::new(self.info.clone(), self.params.clone()))
    }
}

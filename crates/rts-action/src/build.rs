//! Walk to a site, pay, and raise a structure.

use rts_core::{Layer, LayerMask, ObjectId, Point, Tick};
use rts_world::Cost;

use crate::{Action, ActionContext, ActionInfo, MoveToPoint, MoveToPointParams, UtilityWeights};

#[derive(Clone, Debug, PartialEq)]
pub struct CreateBuildingParams {
    /// Prefab name of the finished structure.
    pub structure:         String,
    /// Prefab name of the placement marker shown while building.
    pub indicator:         Option<String>,
    pub cost:              Cost,
    pub build_secs:        f32,
    pub stopping_distance: f32,
    pub allowed_layers:    LayerMask,
    pub weights:           UtilityWeights,
}

impl CreateBuildingParams {
    pub fn new(structure: &str, cost: Cost) -> Self {
        Self {
            structure:         structure.to_owned(),
            indicator:         None,
            cost,
            build_secs:        5.0,
            stopping_distance: 1.0,
            allowed_layers:    LayerMask::ALL,
            weights:           UtilityWeights::commanded(),
        }
    }
}

/// Where a building attempt stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildState {
    /// Not started, or cancelled.
    Idle,
    /// Walking to the site.
    Travelling,
    /// Arrived but the owner could not pay; retried every update.
    Unaffordable,
    /// Cost reserved, indicator placed, waiting for `ready_at`.
    Building { ready_at: Tick, indicator: Option<ObjectId> },
    /// Structure spawned; the reservation is spent for good.
    Done { structure: Option<ObjectId> },
}

/// Wraps [`MoveToPoint`].
///
/// Cost is reserved atomically on arrival.  An attempt ends either spent
/// (structure spawned) or refunded (cancelled while building), never both,
/// so its net effect on the ledger is `0` or `-cost`.
#[derive(Debug)]
pub struct CreateBuilding {
    info:   ActionInfo,
    params: CreateBuildingParams,
    mover:  MoveToPoint,
    site:   Option<Point>,
    state:  BuildState,
}

impl CreateBuilding {
    pub fn new(info: ActionInfo, params: CreateBuildingParams) -> Self {
        let mover = MoveToPoint::new(
            info.clone(),
            MoveToPointParams {
                stopping_distance: params.stopping_distance,
                allowed_layers:    params.allowed_layers,
                weights:           params.weights,
            },
        );
        Self { info, params, mover, site: None, state: BuildState::Idle }
    }

    pub fn params(&self) -> &CreateBuildingParams {
        &self.params
    }

    pub fn site(&self) -> Option<Point> {
        self.site
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// `true` while stuck on the site waiting for resources.
    pub fn not_affordable(&self) -> bool {
        self.state == BuildState::Unaffordable
    }

    fn begin(&mut self, ctx: &mut ActionContext<'_>, site: Point) {
        if !ctx.host.try_reserve(ctx.owner, &self.params.cost) {
            if self.state != BuildState::Unaffordable {
                tracing::debug!(unit = %ctx.unit, structure = %self.params.structure, "cannot afford structure");
            }
            self.state = BuildState::Unaffordable;
            return;
        }

        let yaw = ctx.host.position(ctx.unit).map_or(0.0, |p| facing(p, site));
        let indicator = self
            .params
            .indicator
            .as_deref()
            .and_then(|name| ctx.host.prefab_named(name))
            .and_then(|prefab| ctx.host.spawn_networked(prefab, site, yaw));
        if let Some(marker) = indicator {
            ctx.host.assign_owner(marker, ctx.owner);
        }
        self.state = BuildState::Building { ready_at: ctx.deadline(self.params.build_secs), indicator };
        tracing::debug!(unit = %ctx.unit, structure = %self.params.structure, %site, "construction started");
    }

    fn finish(&mut self, ctx: &mut ActionContext<'_>, site: Point, indicator: Option<ObjectId>) {
        if let Some(marker) = indicator {
            ctx.host.destroy_networked(marker);
        }
        let structure = match ctx.host.prefab_named(&self.params.structure) {
            Some(prefab) => ctx.host.spawn_networked(prefab, site, 0.0),
            None => None,
        };
        match structure {
            Some(id) => {
                ctx.host.assign_owner(id, ctx.owner);
                tracing::debug!(unit = %ctx.unit, structure = %id, "construction finished");
            }
            None => {
                tracing::warn!(structure = %self.params.structure, "structure prefab could not be spawned; refunding");
                ctx.host.refund(ctx.owner, &self.params.cost);
            }
        }
        self.state = BuildState::Done { structure };
    }
}

/// Yaw in degrees looking from `from` toward `to` on the ground plane.
fn facing(from: Point, to: Point) -> f32 {
    (to.x - from.x).atan2(to.z - from.z).to_degrees()
}

impl Action for CreateBuilding {
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
        self.site.is_none() || matches!(self.state, BuildState::Done { .. })
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_>) {
        self.mover.enter(ctx);
        if self.site.is_some() {
            self.state = BuildState::Travelling;
        }
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        match self.site {
            Some(site) => {
                self.mover.bind(site);
                self.mover.execute(ctx)
            }
            None => false,
        }
    }

    fn update(&mut self, ctx: &mut ActionContext<'_>) {
        let Some(site) = self.site else {
            return;
        };
        match self.state {
            BuildState::Travelling | BuildState::Unaffordable => {
                if self.mover.has_completed(ctx) {
                    self.begin(ctx, site);
                }
            }
            BuildState::Building { ready_at, indicator } => {
                if ctx.reached(ready_at) {
                    self.finish(ctx, site, indicator);
                }
            }
            BuildState::Idle | BuildState::Done { .. } => {}
        }
    }

    fn cancel(&mut self, ctx: &mut ActionContext<'_>) {
        if let BuildState::Building { indicator, .. } = self.state {
            ctx.host.refund(ctx.owner, &self.params.cost);
            if let Some(marker) = indicator {
                ctx.host.destroy_networked(marker);
            }
            tracing::debug!(unit = %ctx.unit, structure = %self.params.structure, "construction cancelled; refunded");
        }
        self.mover.cancel(ctx);
        self.site = None;
        self.state = BuildState::Idle;
    }

    fn set_variables(
        &mut self,
        _ctx:    &ActionContext<'_>,
        _target: Option<ObjectId>,
        point:   Option<Point>,
        layer:   Layer,
    ) -> bool {
        let Some(site) = point else {
            return false;
        };
        if !self.mover.accepts(point, layer) {
            return false;
        }
        self.site = Some(site);
        self.mover.bind(site);
        true
    }

    fn valid_target(&self) -> bool {
        self.site.is_some()
    }

    fn instantiate(&self) -> Box<dyn Action> {
        Box::new(Self::new(self.info.clone(), self.params.clone()))
    }
}

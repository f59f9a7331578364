//! What a designated target resolves to for a given agent.

use rts_action::{ActionId, ActionInfo};
use rts_core::{AgentId, Layer, ObjectId, Point};
use rts_sim::Scene;

/// The first `smart` possible action of `agent` that accepts the
/// designation.
///
/// Acceptance is tested on a fresh instance, so neither the agent's
/// possible actions nor its current action are touched.
pub fn resolve_designation(
    scene:  &mut Scene,
    agent:  AgentId,
    target: Option<ObjectId>,
    point:  Option<Point>,
    layer:  Layer,
) -> Option<ActionId> {
    let now = scene.now();
    let tick_ms = scene.config.tick_duration_ms;
    let agent = scene.agents.get(agent)?;
    let ctx = agent.context(now, tick_ms, &mut scene.world);

    agent
        .possible_actions()
        .filter(|action| action.info().smart)
        .find(|action| action.instantiate().set_variables(&ctx, target, point, layer))
        .map(|action| action.id().clone())
}

/// Display info for every possible action of `agent`, in order.
pub fn available_actions(scene: &Scene, agent: AgentId) -> Vec<ActionInfo> {
    scene
        .agents
        .get(agent)
        .map(|a| a.possible_actions().map(|action| action.info().clone()).collect())
        .unwrap_or_default()
}

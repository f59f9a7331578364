//! The player's current unit selection.

use rts_core::{AgentId, PlayerId, Point};
use rts_sim::Scene;
use rts_world::SceneObjects;

/// Ordered, de-duplicated set of selected agents.
///
/// Ids may go stale when units die; [`Commander`][crate::Commander] skips
/// them and [`retain_live`][Self::retain_live] prunes them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    agents: Vec<AgentId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `agent`.  Returns `false` if it was already selected.
    pub fn select(&mut self, agent: AgentId) -> bool {
        if self.contains(agent) {
            return false;
        }
        self.agents.push(agent);
        true
    }

    pub fn deselect(&mut self, agent: AgentId) -> bool {
        let before = self.agents.len();
        self.agents.retain(|&a| a != agent);
        self.agents.len() != before
    }

    /// Flip `agent`'s membership.  Returns whether it is now selected.
    pub fn toggle(&mut self, agent: AgentId) -> bool {
        if self.deselect(agent) {
            return false;
        }
        self.agents.push(agent);
        true
    }

    /// Replace the selection with `agents`, dropping duplicates.
    pub fn replace(&mut self, agents: impl IntoIterator<Item = AgentId>) {
        self.agents.clear();
        for agent in agents {
            self.select(agent);
        }
    }

    pub fn clear(&mut self) {
        self.agents.clear();
    }

    /// Select `owner`'s live units inside the planar rectangle spanned by
    /// `a` and `b`.  Returns how many agents were added.
    pub fn select_in_rect(
        &mut self,
        scene:    &Scene,
        owner:    PlayerId,
        a:        Point,
        b:        Point,
        additive: bool,
    ) -> usize {
        if !additive {
            self.clear();
        }
        let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
        let (min_z, max_z) = (a.z.min(b.z), a.z.max(b.z));

        let hits: Vec<AgentId> = scene
            .agents
            .iter()
            .filter(|agent| agent.owner() == owner)
            .filter(|agent| {
                scene.world.position(agent.unit()).is_some_and(|p| {
                    (min_x..=max_x).contains(&p.x) && (min_z..=max_z).contains(&p.z)
                })
            })
            .map(|agent| agent.id())
            .collect();
        hits.into_iter().filter(|&id| self.select(id)).count()
    }

    /// Drop agents that no longer exist.  Returns how many were removed.
    pub fn retain_live(&mut self, scene: &Scene) -> usize {
        let before = self.agents.len();
        self.agents.retain(|&id| scene.agents.contains(id));
        before - self.agents.len()
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.agents.contains(&agent)
    }

    pub fn as_slice(&self) -> &[AgentId] {
        &self.agents
    }

    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

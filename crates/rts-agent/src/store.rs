//! Slot storage for live agents.
//!
//! Agents are addressed by [`AgentId`], which is the slot index.  Slots are
//! never reused: removing an agent leaves a hole, so a stale id held by the
//! scheduler or a selection simply stops resolving.

use rustc_hash::FxHashMap;

use rts_action::Action;
use rts_core::{AgentId, ObjectId, PlayerId};

use crate::{Agent, AgentError, AgentResult};

#[derive(Debug, Default)]
pub struct AgentStore {
    slots:   Vec<Option<Agent>>,
    by_unit: FxHashMap<ObjectId, AgentId>,
    live:    usize,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an agent driving `unit`.  One agent per unit.
    pub fn insert(
        &mut self,
        unit:     ObjectId,
        owner:    PlayerId,
        possible: Vec<Box<dyn Action>>,
    ) -> AgentResult<AgentId> {
        if self.by_unit.contains_key(&unit) {
            return Err(AgentError::UnitTaken(unit));
        }
        let id = AgentId::try_from(self.slots.len())
            .ok()
            .filter(|id| id.is_valid())
            .ok_or(AgentError::StoreFull)?;
        self.slots.push(Some(Agent::new(id, unit, owner, possible)));
        self.by_unit.insert(unit, id);
        self.live += 1;
        Ok(id)
    }

    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        let agent = self.slots.get_mut(id.index())?.take()?;
        self.by_unit.remove(&agent.unit());
        self.live -= 1;
        Some(agent)
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.slots.get(id.index())?.as_ref()
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    pub fn require_mut(&mut self, id: AgentId) -> AgentResult<&mut Agent> {
        self.get_mut(id).ok_or(AgentError::AgentNotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: AgentId) -> bool {
        self.get(id).is_some()
    }

    /// The agent driving `unit`, if any.
    pub fn by_unit(&self, unit: ObjectId) -> Option<AgentId> {
        self.by_unit.get(&unit).copied()
    }

    /// Live agents in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.slots.iter().flatten()
    }

    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.iter().map(Agent::id)
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

//! The `Scene` struct and its tick loop.

use rts_action::{ActionId, ActionLibrary};
use rts_agent::{ActionRequest, AddOutcome, AgentBuilder, AgentSnapshot, AgentStore, Completion};
use rts_core::{AgentId, PlayerId, Point, SimClock, SimConfig, Tick};
use rts_world::{SceneObjects, World};

use crate::{AiManager, SimError, SimObserver, SimResult, TickStats};

/// Explicitly constructed scene context: world, agents, AI manager and
/// clock.  There is no global state; everything a tick touches hangs off
/// this struct.
///
/// Per tick:
///
/// 1. **Movement** — `World::step` integrates navigation.
/// 2. **Update** — `update_action` on every registered agent in insertion
///    order, followed by the completion check (dequeue or go idle).
/// 3. **Evaluation** — the manager's rotating pass, if due.
/// 4. **Idle re-evaluation** — agents that went idle this tick are scored
///    immediately when `AiConfig::reevaluate_idle` is set.
/// 5. **Reaping** — agents whose unit died are cleared, removed and
///    deregistered.
/// 6. **Observers**, then the clock advances.
///
/// Create via [`SceneBuilder`][crate::SceneBuilder].
#[derive(Debug)]
pub struct Scene {
    pub config:  SimConfig,
    pub clock:   SimClock,
    pub world:   World,
    pub agents:  AgentStore,
    pub manager: AiManager,
    pub(crate) library: ActionLibrary,
}

impl Scene {
    pub fn library(&self) -> &ActionLibrary {
        &self.library
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Spawn a unit from `prefab` and attach an agent carrying every library
    /// action.
    pub fn spawn_unit(&mut self, prefab: &str, at: Point, owner: PlayerId) -> SimResult<AgentId> {
        self.spawn_unit_with(prefab, at, owner, None)
    }

    /// Like [`spawn_unit`][Self::spawn_unit], restricted to `actions` when
    /// given.
    pub fn spawn_unit_with(
        &mut self,
        prefab:  &str,
        at:      Point,
        owner:   PlayerId,
        actions: Option<&[&str]>,
    ) -> SimResult<AgentId> {
        let prefab_id = self
            .world
            .prefabs()
            .find(prefab)
            .ok_or_else(|| SimError::UnknownPrefab(prefab.to_owned()))?;
        let unit = self.world.spawn(prefab_id, at, 0.0, owner)?;

        let mut builder = AgentBuilder::new(&self.library, unit, owner);
        if let Some(names) = actions {
            builder = builder.only(names);
        }
        let agent = match builder.spawn(&mut self.agents) {
            Ok(agent) => agent,
            Err(e) => {
                self.world.destroy(unit);
                return Err(e.into());
            }
        };
        self.manager.register(agent);
        Ok(agent)
    }

    /// Cancel the agent's actions, remove it and destroy its unit.
    pub fn despawn(&mut self, agent: AgentId) -> SimResult<()> {
        self.clear_actions(agent)?;
        self.manager.deregister(agent);
        if let Some(removed) = self.agents.remove(agent) {
            self.world.destroy(removed.unit());
        }
        Ok(())
    }

    // ── Commands ──────────────────────────────────────────────────────────

    pub fn add_action(&mut self, agent: AgentId, request: &ActionRequest) -> SimResult<AddOutcome> {
        let now = self.now();
        let tick_ms = self.config.tick_duration_ms;
        let agent = self.agents.require_mut(agent)?;
        let mut ctx = agent.context(now, tick_ms, &mut self.world);
        Ok(agent.add_action(&mut ctx, request))
    }

    pub fn clear_actions(&mut self, agent: AgentId) -> SimResult<()> {
        let now = self.now();
        let tick_ms = self.config.tick_duration_ms;
        let agent = self.agents.require_mut(agent)?;
        let mut ctx = agent.context(now, tick_ms, &mut self.world);
        agent.clear_all_actions(&mut ctx);
        Ok(())
    }

    /// Score `agent` right now, outside the manager's rotation.  Returns the
    /// newly selected action, if any.
    pub fn evaluate(&mut self, agent: AgentId) -> SimResult<Option<ActionId>> {
        if !self.manager.contains(agent) {
            return Err(SimError::NotRegistered(agent));
        }
        Ok(self.evaluate_one(agent))
    }

    pub fn request_evaluation(&mut self) {
        self.manager.request_evaluation();
    }

    pub fn snapshot(&self, agent: AgentId) -> Option<AgentSnapshot> {
        self.agents.get(agent).map(|a| a.snapshot())
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        tracing::info!(agents = self.agents.len(), end = %self.config.end_tick(), "scene started");
        while self.now() < self.config.end_tick() {
            self.tick(observer);
        }
        observer.on_sim_end(self.now());
        tracing::info!(tick = %self.clock, agents = self.agents.len(), "scene finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer);
        }
        Ok(())
    }

    /// Process one tick and advance the clock.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> TickStats {
        let now = self.now();
        observer.on_tick_start(now);
        let stats = self.process_tick(now);
        observer.on_tick_end(&stats);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.agents, &self.world);
        }
        self.clock.advance();
        stats
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> TickStats {
        let mut stats = TickStats { tick: now, ..TickStats::default() };
        let tick_ms = self.config.tick_duration_ms;

        // ── Phase 1: movement ─────────────────────────────────────────────
        self.world.step(self.clock.tick_secs());

        // ── Phase 2: update + completion ──────────────────────────────────
        let mut went_idle = Vec::new();
        let mut dead = Vec::new();
        for &id in self.manager.registered() {
            let Some(agent) = self.agents.get_mut(id) else {
                continue;
            };
            if !self.world.is_alive(agent.unit()) {
                dead.push(id);
                continue;
            }
            let mut ctx = agent.context(now, tick_ms, &mut self.world);
            if !agent.is_idle() {
                agent.update_action(&mut ctx);
                stats.updated += 1;
            }
            match agent.advance_if_completed(&mut ctx) {
                Completion::Running => {}
                Completion::Dequeued => stats.completed += 1,
                Completion::Idle => {
                    stats.completed += 1;
                    went_idle.push(id);
                }
            }
        }

        // ── Phase 3: rotating evaluation pass ─────────────────────────────
        if let Some(batch) = self.manager.begin_pass(now) {
            for id in batch {
                if self.evaluate_live(id, &mut stats) {
                    stats.evaluated += 1;
                }
            }
            self.manager.end_pass();
        }

        // ── Phase 4: idle re-evaluation ───────────────────────────────────
        if self.manager.config().reevaluate_idle {
            for id in went_idle {
                if self.agents.get(id).is_some_and(|a| a.is_idle()) && self.evaluate_live(id, &mut stats) {
                    stats.evaluated += 1;
                }
            }
        }

        // ── Phase 5: reap agents whose unit died ──────────────────────────
        for id in dead {
            if let Some(agent) = self.agents.get_mut(id) {
                let mut ctx = agent.context(now, tick_ms, &mut self.world);
                agent.clear_all_actions(&mut ctx);
            }
            self.agents.remove(id);
            self.manager.deregister(id);
            stats.reaped += 1;
            tracing::debug!(agent = %id, %now, "reaped agent of dead unit");
        }

        stats.live = self.agents.len();
        stats
    }

    /// Evaluate `id` if it is still live; returns whether it was scored.
    fn evaluate_live(&mut self, id: AgentId, stats: &mut TickStats) -> bool {
        let live = self.agents.get(id).is_some_and(|a| self.world.is_alive(a.unit()));
        if !live {
            return false;
        }
        if self.evaluate_one(id).is_some() {
            stats.switched += 1;
        }
        true
    }

    fn evaluate_one(&mut self, id: AgentId) -> Option<ActionId> {
        let now = self.now();
        let tick_ms = self.config.tick_duration_ms;
        let agent = self.agents.get_mut(id)?;
        let mut ctx = agent.context(now, tick_ms, &mut self.world);
        agent.evaluate_actions(&mut ctx)
    }
}

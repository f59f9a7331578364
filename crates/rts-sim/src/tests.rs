//! Unit and integration tests for rts-sim.

use rts_core::{PlayerId, Point, SimConfig};
use rts_world::Prefab;

use crate::{AiConfig, Cadence, Scene, SceneBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

const ME: PlayerId = PlayerId(0);
const FOE: PlayerId = PlayerId(1);

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        tick_duration_ms:      100,
        total_ticks,
        seed:                  7,
        output_interval_ticks: 10,
    }
}

fn scene_with(ai: AiConfig) -> Scene {
    SceneBuilder::new(test_config(200))
        .ai(ai)
        .prefab(Prefab::unit("soldier", 100, 4.0))
        .build()
        .unwrap()
}

fn every_tick() -> AiConfig {
    AiConfig { cadence: Cadence::EveryTick, ..AiConfig::default() }
}

// ── AiManager ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod manager {
    use rts_core::{AgentId, Tick};

    use crate::{AiConfig, AiManager, Cadence, Window};

    fn manager(total: u32, percentage: f32, window: Window) -> AiManager {
        let mut m = AiManager::new(AiConfig {
            cadence: Cadence::Timed { interval_ticks: 1 },
            percentage,
            window,
            reevaluate_idle: true,
        });
        for i in 0..total {
            assert!(m.register(AgentId(i)));
        }
        m
    }

    #[test]
    fn prefix_rotation_wraps_after_four_passes() {
        let mut m = manager(40, 25.0, Window::Prefix);
        assert_eq!(m.increment(40), 10);
        assert_eq!(m.next_window(), 0..10);
        assert_eq!(m.cursor(), 10);
        assert_eq!(m.next_window(), 0..20);
        assert_eq!(m.next_window(), 0..30);
        assert_eq!(m.next_window(), 0..40);
        assert_eq!(m.cursor(), 40);
        assert_eq!(m.next_window(), 0..10, "cursor resets on the pass after reaching the end");
    }

    #[test]
    fn sliding_rotation_covers_each_agent_once() {
        let mut m = manager(40, 25.0, Window::Sliding);
        let windows: Vec<_> = (0..5).map(|_| m.next_window()).collect();
        assert_eq!(windows, [0..10, 10..20, 20..30, 30..40, 0..10]);
    }

    #[test]
    fn zero_increment_is_forced_to_everyone() {
        let mut m = manager(3, 1.0, Window::Prefix);
        assert_eq!(m.increment(3), 3);
        assert_eq!(m.next_window(), 0..3);

        let mut m = manager(3, 0.0, Window::Sliding);
        assert_eq!(m.next_window(), 0..3);
    }

    #[test]
    fn uneven_increment_is_clamped() {
        let mut m = manager(10, 30.0, Window::Sliding);
        let windows: Vec<_> = (0..5).map(|_| m.next_window()).collect();
        assert_eq!(windows, [0..3, 3..6, 6..9, 9..10, 0..3]);
    }

    #[test]
    fn empty_registry_yields_empty_window() {
        let mut m = manager(0, 25.0, Window::Prefix);
        assert_eq!(m.next_window(), 0..0);
        assert_eq!(m.begin_pass(Tick(0)), Some(vec![]));
    }

    #[test]
    fn deregister_keeps_cursor_on_successor() {
        let mut m = manager(4, 50.0, Window::Sliding);
        assert_eq!(m.next_window(), 0..2);
        assert!(m.deregister(AgentId(0)));
        assert!(!m.deregister(AgentId(0)));
        assert_eq!(m.cursor(), 1);
        assert_eq!(m.registered(), [AgentId(1), AgentId(2), AgentId(3)]);
        // Agent 2 is next, as before the removal.
        let window = m.next_window();
        assert_eq!(&m.registered()[window], [AgentId(2)]);
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut m = manager(2, 50.0, Window::Prefix);
        assert!(!m.register(AgentId(1)));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn timed_cadence_paces_passes() {
        let mut m = AiManager::new(AiConfig {
            cadence: Cadence::Timed { interval_ticks: 5 },
            ..AiConfig::default()
        });
        m.register(AgentId(0));
        assert!(m.is_due(Tick(0)));
        assert!(m.begin_pass(Tick(0)).is_some());
        m.end_pass();
        assert!(!m.is_due(Tick(4)));
        assert!(m.begin_pass(Tick(4)).is_none());
        assert!(m.is_due(Tick(5)));
        assert_eq!(m.passes(), 1);
    }

    #[test]
    fn manual_cadence_waits_for_request() {
        let mut m = AiManager::new(AiConfig { cadence: Cadence::Manual, ..AiConfig::default() });
        m.register(AgentId(0));
        assert!(m.begin_pass(Tick(0)).is_none());
        m.request_evaluation();
        assert_eq!(m.begin_pass(Tick(1)), Some(vec![AgentId(0)]));
        m.end_pass();
        assert!(!m.is_due(Tick(2)), "request is consumed by the pass");
    }

    #[test]
    fn one_pass_at_a_time() {
        let mut m = AiManager::new(AiConfig { cadence: Cadence::EveryTick, ..AiConfig::default() });
        m.register(AgentId(0));
        assert!(m.begin_pass(Tick(0)).is_some());
        assert!(m.in_pass());
        assert!(m.begin_pass(Tick(0)).is_none());
        m.end_pass();
        m.end_pass();
        assert_eq!(m.passes(), 1);
        assert!(m.begin_pass(Tick(1)).is_some());
    }

    #[test]
    fn every_tick_ignores_rotation() {
        let mut m = AiManager::new(AiConfig {
            cadence: Cadence::EveryTick,
            percentage: 10.0,
            ..AiConfig::default()
        });
        for i in 0..20 {
            m.register(AgentId(i));
        }
        assert_eq!(m.begin_pass(Tick(0)).map(|v| v.len()), Some(20));
        assert_eq!(m.cursor(), 0);
    }

    #[test]
    fn config_validation() {
        assert!(AiConfig::default().validate().is_ok());
        assert!(AiConfig { percentage: 120.0, ..AiConfig::default() }.validate().is_err());
        assert!(AiConfig { percentage: f32::NAN, ..AiConfig::default() }.validate().is_err());
        let zero = AiConfig { cadence: Cadence::Timed { interval_ticks: 0 }, ..AiConfig::default() };
        assert!(zero.validate().is_err());
    }
}

// ── SceneBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn zero_tick_duration_is_rejected() {
        let config = SimConfig { tick_duration_ms: 0, ..test_config(10) };
        assert!(matches!(SceneBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_ai_config_is_rejected() {
        let ai = AiConfig { percentage: -1.0, ..AiConfig::default() };
        assert!(matches!(SceneBuilder::new(test_config(10)).ai(ai).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn funds_and_prefabs_are_applied() {
        let gold = rts_core::ResourceKind(0);
        let scene = SceneBuilder::new(test_config(10))
            .prefab(Prefab::unit("soldier", 100, 4.0))
            .fund(ME, gold, 250)
            .build()
            .unwrap();
        assert_eq!(scene.world.treasury().balance(ME, gold), 250);
        assert!(scene.world.prefabs().find("soldier").is_some());
        assert_eq!(scene.library().len(), 5);
    }

    #[test]
    fn unknown_prefab_is_an_error() {
        let mut scene = scene_with(AiConfig::default());
        let err = scene.spawn_unit("dragon", Point::ORIGIN, ME).unwrap_err();
        assert!(matches!(err, SimError::UnknownPrefab(_)));
        assert!(scene.agents.is_empty());
        assert!(scene.world.is_empty());
    }

    #[test]
    fn failed_agent_build_destroys_the_unit() {
        let mut scene = scene_with(AiConfig::default());
        assert!(scene.spawn_unit_with("soldier", Point::ORIGIN, ME, Some(&["fly"])).is_err());
        assert!(scene.world.is_empty());
        assert!(scene.manager.is_empty());
    }
}

// ── Scene tick loop ───────────────────────────────────────────────────────────

#[cfg(test)]
mod scene_tests {
    use rts_agent::{ActionRequest, AddOutcome};
    use rts_core::Tick;
    use rts_world::{Combat, SceneObjects};

    use super::*;
    use crate::{NoopObserver, SimError, SimObserver, TickStats};

    #[derive(Default)]
    struct Recorder {
        ticks:     u64,
        snapshots: Vec<Tick>,
        reaped:    usize,
        switched:  usize,
        ended:     Option<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_tick_end(&mut self, stats: &TickStats) {
            self.ticks += 1;
            self.reaped += stats.reaped;
            self.switched += stats.switched;
        }

        fn on_snapshot(&mut self, tick: Tick, _agents: &rts_agent::AgentStore, _world: &rts_world::World) {
            self.snapshots.push(tick);
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.ended = Some(final_tick);
        }
    }

    #[test]
    fn run_stops_at_end_tick() {
        let mut scene = SceneBuilder::new(test_config(30)).build().unwrap();
        let mut rec = Recorder::default();
        scene.run(&mut rec).unwrap();
        assert_eq!(rec.ticks, 30);
        assert_eq!(rec.snapshots, [Tick(0), Tick(10), Tick(20)]);
        assert_eq!(rec.ended, Some(Tick(30)));
        assert_eq!(scene.now(), Tick(30));
    }

    #[test]
    fn scene_debug_includes_world_and_agents() {
        let mut scene = scene_with(every_tick());
        scene.spawn_unit("soldier", Point::ORIGIN, ME).unwrap();
        let text = format!("{scene:?}");
        assert!(text.contains("World"));
        assert!(text.contains("objects: 1"));
    }

    #[test]
    fn commanded_move_completes_and_goes_idle() {
        let mut scene = scene_with(every_tick());
        let a = scene.spawn_unit("soldier", Point::ORIGIN, ME).unwrap();
        let out = scene.add_action(a, &ActionRequest::new("move").at(Point::ground(3.0, 0.0))).unwrap();
        assert_eq!(out, AddOutcome::Started);
        let out = scene
            .add_action(a, &ActionRequest::new("move").at(Point::ground(3.0, 3.0)).queued(true))
            .unwrap();
        assert_eq!(out, AddOutcome::Queued);

        scene.run_ticks(40, &mut NoopObserver).unwrap();
        let snap = scene.snapshot(a).unwrap();
        assert_eq!(snap.current, None);
        assert!(snap.queued.is_empty());
        let unit = scene.agents.get(a).unwrap().unit();
        let at = scene.world.position(unit).unwrap();
        assert!(at.planar_distance(Point::ground(3.0, 3.0)) <= 0.5 + 1e-3);
    }

    #[test]
    fn hostile_neighbours_fight_until_one_is_reaped() {
        let mut scene = scene_with(every_tick());
        let a = scene.spawn_unit("soldier", Point::ORIGIN, ME).unwrap();
        let b = scene.spawn_unit("soldier", Point::ground(1.0, 0.0), FOE).unwrap();
        let (unit_a, unit_b) = (scene.agents.get(a).unwrap().unit(), scene.agents.get(b).unwrap().unit());

        let first = scene.tick(&mut NoopObserver);
        assert_eq!(first.switched, 2);
        assert_eq!(scene.snapshot(a).unwrap().current.unwrap().as_str(), "attack");
        assert_eq!(scene.snapshot(b).unwrap().current.unwrap().as_str(), "attack");

        let mut rec = Recorder::default();
        scene.run_ticks(120, &mut rec).unwrap();
        assert_eq!(rec.reaped, 1);
        assert!(!scene.world.is_alive(unit_b));
        assert!(!scene.agents.contains(b));
        assert!(!scene.manager.contains(b));

        // A strikes first each round and lands the tenth hit after taking nine.
        assert!(scene.agents.get(a).unwrap().is_idle());
        let ratio = scene.world.health_ratio(unit_a).unwrap();
        assert!((ratio - 0.1).abs() < 1e-6, "ratio = {ratio}");
    }

    #[test]
    fn manual_cadence_evaluates_on_request() {
        let mut scene = scene_with(AiConfig { cadence: Cadence::Manual, ..AiConfig::default() });
        let a = scene.spawn_unit("soldier", Point::ORIGIN, ME).unwrap();
        scene.spawn_unit("soldier", Point::ground(1.0, 0.0), FOE).unwrap();

        scene.run_ticks(3, &mut NoopObserver).unwrap();
        assert!(scene.agents.get(a).unwrap().is_idle());

        scene.request_evaluation();
        scene.tick(&mut NoopObserver);
        assert!(!scene.agents.get(a).unwrap().is_idle());
    }

    #[test]
    fn direct_evaluation_requires_registration() {
        let mut scene = scene_with(AiConfig { cadence: Cadence::Manual, ..AiConfig::default() });
        let a = scene.spawn_unit("soldier", Point::ORIGIN, ME).unwrap();
        scene.spawn_unit("soldier", Point::ground(2.0, 0.0), FOE).unwrap();
        assert_eq!(scene.evaluate(a).unwrap().map(|id| id.to_string()).as_deref(), Some("attack"));

        scene.manager.deregister(a);
        assert!(matches!(scene.evaluate(a), Err(SimError::NotRegistered(_))));
    }

    #[test]
    fn destroyed_unit_is_reaped() {
        let mut scene = scene_with(every_tick());
        let a = scene.spawn_unit("soldier", Point::ORIGIN, ME).unwrap();
        let unit = scene.agents.get(a).unwrap().unit();
        scene.add_action(a, &ActionRequest::new("move").at(Point::ground(9.0, 0.0))).unwrap();
        scene.world.destroy(unit);

        let stats = scene.tick(&mut NoopObserver);
        assert_eq!(stats.reaped, 1);
        assert!(scene.agents.is_empty());
        assert!(scene.manager.is_empty());
    }

    #[test]
    fn despawn_removes_everything() {
        let mut scene = scene_with(every_tick());
        let a = scene.spawn_unit("soldier", Point::ORIGIN, ME).unwrap();
        scene.despawn(a).unwrap();
        assert!(scene.world.is_empty());
        assert!(!scene.manager.contains(a));
        assert!(matches!(scene.despawn(a), Err(SimError::Agent(_))));
    }

    #[test]
    fn clear_actions_stops_the_unit() {
        let mut scene = scene_with(AiConfig { cadence: Cadence::Manual, ..AiConfig::default() });
        let a = scene.spawn_unit("soldier", Point::ORIGIN, ME).unwrap();
        scene.add_action(a, &ActionRequest::new("move").at(Point::ground(9.0, 0.0))).unwrap();
        scene.run_ticks(5, &mut NoopObserver).unwrap();
        scene.clear_actions(a).unwrap();
        let unit = scene.agents.get(a).unwrap().unit();
        let stopped_at = scene.world.position(unit).unwrap();
        scene.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(scene.world.position(unit), Some(stopped_at));
        assert!(scene.snapshot(a).unwrap().current.is_none());
    }
}

//! Unit tests for rts-action.

#[cfg(test)]
mod fixture {
    use rts_core::{ObjectId, PlayerId, Point, ResourceKind, Tick};
    use rts_world::{Prefab, World};

    use crate::ActionContext;

    pub const ME: PlayerId = PlayerId(0);
    pub const FOE: PlayerId = PlayerId(1);
    pub const GOLD: ResourceKind = ResourceKind(0);
    /// 10 ticks per second.
    pub const TICK_MS: u32 = 100;

    pub struct Fixture {
        pub world: World,
        pub unit:  ObjectId,
    }

    impl Fixture {
        /// One soldier of `ME` at the origin.
        pub fn new() -> Self {
            let mut world = World::new();
            for prefab in [
                Prefab::unit("soldier", 100, 4.0),
                Prefab::structure("barracks", 500),
                Prefab::indicator("barracks_ghost"),
                Prefab::resource_pile("gold_mine", GOLD, 30),
            ] {
                world.register_prefab(prefab).unwrap();
            }
            let soldier = world.prefabs().find("soldier").unwrap();
            let unit = world.spawn(soldier, Point::ORIGIN, 0.0, ME).unwrap();
            Self { world, unit }
        }

        pub fn spawn(&mut self, prefab: &str, at: Point, owner: PlayerId) -> ObjectId {
            let id = self.world.prefabs().find(prefab).unwrap();
            self.world.spawn(id, at, 0.0, owner).unwrap()
        }

        pub fn count(&self, prefab: &str) -> usize {
            let id = self.world.prefabs().find(prefab).unwrap();
            self.world
                .ids()
                .into_iter()
                .filter(|&o| self.world.object(o).is_some_and(|obj| obj.prefab == id))
                .count()
        }

        pub fn ctx(&mut self, now: u64) -> ActionContext<'_> {
            ActionContext::new(Tick(now), TICK_MS, self.unit, ME, &mut self.world)
        }
    }
}

#[cfg(test)]
mod weights {
    use crate::UtilityWeights;

    #[test]
    fn proximity_scales_linearly_to_zero() {
        let w = UtilityWeights::new(1.0, 0.8);
        assert!((w.proximity(0.0, 10.0) - 0.8).abs() < 1e-6);
        assert!((w.proximity(5.0, 10.0) - 0.4).abs() < 1e-6);
        assert_eq!(w.proximity(10.0, 10.0), 0.0);
        assert_eq!(w.proximity(11.0, 10.0), 0.0);
        assert_eq!(w.proximity(1.0, 0.0), 0.0);
        assert_eq!(UtilityWeights::default().autonomous, 0.0);
    }
}

#[cfg(test)]
mod move_to_point {
    use rts_core::{Layer, LayerMask, Point};
    use rts_world::Navigation;

    use super::fixture::Fixture;
    use crate::{Action, ActionInfo, MoveToPoint, MoveToPointParams};

    fn mover(stopping_distance: f32, allowed_layers: LayerMask) -> MoveToPoint {
        MoveToPoint::new(
            ActionInfo::new("move"),
            MoveToPointParams { stopping_distance, allowed_layers, ..Default::default() },
        )
    }

    #[test]
    fn completes_within_stopping_distance() {
        let mut f = Fixture::new();
        let p = Point::ground(5.0, 0.0);
        let mut action = mover(2.0, LayerMask::ALL);
        {
            let mut ctx = f.ctx(0);
            assert!(action.set_variables(&ctx, None, Some(p), Layer::GROUND));
            action.enter(&mut ctx);
            assert!(action.execute(&mut ctx));
            // Path requested but not computed yet.
            assert!(!action.has_completed(&ctx));
        }
        f.world.step(0.0);
        assert!(!action.has_completed(&f.ctx(1)), "distance 5 > stopping distance 2");

        f.world.teleport(f.unit, Point::ground(3.5, 0.0)).unwrap();
        assert!(action.has_completed(&f.ctx(2)), "distance 1.5 <= stopping distance 2");
    }

    #[test]
    fn navigator_brings_unit_to_the_point() {
        let mut f = Fixture::new();
        let mut action = mover(0.5, LayerMask::ALL);
        {
            let mut ctx = f.ctx(0);
            action.set_variables(&ctx, None, Some(Point::ground(4.0, 0.0)), Layer::GROUND);
            action.enter(&mut ctx);
            action.execute(&mut ctx);
        }
        let mut done_at = None;
        for tick in 1..40 {
            f.world.step(0.1);
            let mut ctx = f.ctx(tick);
            action.update(&mut ctx);
            if action.has_completed(&ctx) {
                done_at = Some(tick);
                break;
            }
        }
        // 3.5 units at 0.4 units per tick.
        assert_eq!(done_at, Some(9));
    }

    #[test]
    fn rejected_layer_keeps_previous_binding() {
        let mut f = Fixture::new();
        let mut action = mover(0.5, LayerMask::of(&[Layer(0)]));
        let ctx = f.ctx(0);
        assert!(!action.set_variables(&ctx, None, Some(Point::ground(1.0, 1.0)), Layer(3)));
        assert!(!action.valid_target());
        assert!(!action.set_variables(&ctx, None, None, Layer(0)));

        let first = Point::ground(2.0, 2.0);
        assert!(action.set_variables(&ctx, None, Some(first), Layer(0)));
        assert!(!action.set_variables(&ctx, None, Some(Point::ground(9.0, 9.0)), Layer(3)));
        assert_eq!(action.target(), Some(first));
    }

    #[test]
    fn unbound_move_is_complete_and_cannot_execute() {
        let mut f = Fixture::new();
        let mut action = mover(0.5, LayerMask::ALL);
        let mut ctx = f.ctx(0);
        assert!(action.has_completed(&ctx));
        assert_eq!(action.evaluate(&ctx), 0.0);
        assert!(!action.execute(&mut ctx));
    }

    #[test]
    fn cancel_twice_is_same_as_once() {
        let mut f = Fixture::new();
        let mut action = mover(0.5, LayerMask::ALL);
        {
            let mut ctx = f.ctx(0);
            action.set_variables(&ctx, None, Some(Point::ground(8.0, 0.0)), Layer::GROUND);
            action.enter(&mut ctx);
            action.execute(&mut ctx);
            assert_eq!(action.evaluate(&ctx), 1.0);
            action.cancel(&mut ctx);
            action.cancel(&mut ctx);
            assert!(!action.valid_target());
        }
        assert!(!f.world.is_path_pending(f.unit));
        assert_eq!(f.world.object(f.unit).unwrap().nav.as_ref().unwrap().destination(), None);
    }
}

#[cfg(test)]
mod move_to_target {
    use rts_core::{Layer, Point};
    use rts_world::Spawner;

    use super::fixture::{Fixture, ME};
    use crate::{Action, ActionInfo, MoveToTarget, MoveToTargetParams};

    fn follow() -> MoveToTarget {
        MoveToTarget::new(
            ActionInfo::new("follow"),
            MoveToTargetParams { repoll_secs: 0.5, max_follow_distance: 30.0, ..Default::default() },
        )
    }

    #[test]
    fn re_aims_on_the_repoll_interval() {
        let mut f = Fixture::new();
        let ally = f.spawn("soldier", Point::ground(10.0, 0.0), ME);
        let mut action = follow();
        {
            let mut ctx = f.ctx(0);
            assert!(action.set_variables(&ctx, Some(ally), None, Layer::GROUND));
            action.enter(&mut ctx);
            assert!(action.execute(&mut ctx));
        }
        f.world.teleport(ally, Point::ground(20.0, 0.0)).unwrap();

        action.update(&mut f.ctx(4));
        assert_eq!(action.mover().target(), Some(Point::ground(10.0, 0.0)), "too early to re-poll");
        action.update(&mut f.ctx(5));
        assert_eq!(action.mover().target(), Some(Point::ground(20.0, 0.0)));
    }

    #[test]
    fn completes_when_target_destroyed_or_too_far() {
        let mut f = Fixture::new();
        let a = f.spawn("soldier", Point::ground(5.0, 0.0), ME);
        let b = f.spawn("soldier", Point::ground(5.0, 5.0), ME);
        let mut first = follow();
        let mut second = follow();
        {
            let ctx = f.ctx(0);
            assert!(first.set_variables(&ctx, Some(a), None, Layer::GROUND));
            assert!(second.set_variables(&ctx, Some(b), None, Layer::GROUND));
            assert!(!first.has_completed(&ctx));
        }
        f.world.destroy_networked(a);
        f.world.teleport(b, Point::ground(100.0, 0.0)).unwrap();
        let ctx = f.ctx(1);
        assert!(first.has_completed(&ctx));
        assert!(second.has_completed(&ctx));
    }

    #[test]
    fn rejects_self_and_missing_targets() {
        let mut f = Fixture::new();
        let me = f.unit;
        let mut action = follow();
        let ctx = f.ctx(0);
        assert!(!action.set_variables(&ctx, Some(me), None, Layer::GROUND));
        assert!(!action.set_variables(&ctx, None, Some(Point::ORIGIN), Layer::GROUND));
        assert!(!action.set_variables(&ctx, Some(rts_core::ObjectId(999)), None, Layer::GROUND));
        assert!(!action.valid_target());
    }
}

#[cfg(test)]
mod patrol {
    use rts_core::{Layer, Point, Tick};

    use super::fixture::{Fixture, ME, TICK_MS};
    use crate::{Action, ActionContext, ActionInfo, Patrol, PatrolParams};

    #[test]
    fn reaching_the_end_reverses_the_route() {
        let mut f = Fixture::new();
        let a = Point::ORIGIN;
        let b = Point::ground(4.0, 0.0);
        let mut action = Patrol::new(ActionInfo::new("patrol"), PatrolParams::default());
        {
            let mut ctx = f.ctx(0);
            assert!(action.set_variables(&ctx, None, Some(b), Layer::GROUND));
            assert_eq!(action.route(), &[a, b]);
            assert_eq!(action.heading(), Some(b));
            action.enter(&mut ctx);
            assert!(action.execute(&mut ctx));
        }

        f.world.teleport(f.unit, b).unwrap();
        f.world.step(0.0);
        action.update(&mut f.ctx(1));
        assert_eq!(action.route(), &[b, a], "ping-pong, not loop-around");
        assert_eq!(action.heading(), Some(a));
        assert!(!action.has_completed(&f.ctx(1)));

        f.world.teleport(f.unit, a).unwrap();
        f.world.step(0.0);
        action.update(&mut f.ctx(2));
        assert_eq!(action.route(), &[a, b]);
        assert_eq!(action.heading(), Some(b));
    }

    #[test]
    fn immobile_unit_keeps_its_route_when_a_leg_is_refused() {
        let mut f = Fixture::new();
        let b = Point::ground(4.0, 0.0);
        let barracks = f.spawn("barracks", Point::ORIGIN, ME);
        let mut action = Patrol::new(ActionInfo::new("patrol"), PatrolParams::default());
        {
            let mut ctx = ActionContext::new(Tick(0), TICK_MS, barracks, ME, &mut f.world);
            assert!(action.set_variables(&ctx, None, Some(b), Layer::GROUND));
            action.enter(&mut ctx);
            assert!(!action.execute(&mut ctx));
        }

        // Straight-line arrival still turns the route around.
        f.world.teleport(barracks, b).unwrap();
        let mut ctx = ActionContext::new(Tick(1), TICK_MS, barracks, ME, &mut f.world);
        action.update(&mut ctx);
        assert_eq!(action.route(), &[b, Point::ORIGIN]);
        assert_eq!(action.heading(), Some(Point::ORIGIN));
        assert!(!action.has_completed(&ctx));
    }

    #[test]
    fn waypoints_extend_a_bound_route() {
        let mut f = Fixture::new();
        let mut action = Patrol::new(ActionInfo::new("patrol"), PatrolParams::default());
        assert!(!action.add_waypoint(Point::ground(1.0, 1.0), Layer::GROUND));
        assert!(action.has_completed(&f.ctx(0)));

        let ctx = f.ctx(0);
        action.set_variables(&ctx, None, Some(Point::ground(4.0, 0.0)), Layer::GROUND);
        assert!(action.add_waypoint(Point::ground(4.0, 4.0), Layer::GROUND));
        assert_eq!(action.route().len(), 3);
        assert!(!action.has_completed(&ctx));
    }
}

#[cfg(test)]
mod attack {
    use rts_core::{Layer, PlayerId, Point};
    use rts_world::{Combat, SceneObjects};

    use super::fixture::{Fixture, FOE, ME};
    use crate::{Action, ActionInfo, DirectedAttack, DirectedAttackParams};

    fn attack(damage: u32) -> DirectedAttack {
        DirectedAttack::new(
            ActionInfo::new("attack"),
            DirectedAttackParams { damage, attack_range: 2.0, attack_delay_secs: 1.0, ..Default::default() },
        )
    }

    #[test]
    fn target_death_clears_target_and_stops_damage() {
        let mut f = Fixture::new();
        let foe = f.spawn("soldier", Point::ground(1.0, 0.0), FOE);
        let mut action = attack(60);
        {
            let mut ctx = f.ctx(0);
            assert!(action.set_variables(&ctx, Some(foe), None, Layer::GROUND));
            action.enter(&mut ctx);
            assert!(action.is_watching());
            assert!(action.execute(&mut ctx));
            action.update(&mut ctx);
        }
        assert!((f.world.health_ratio(foe).unwrap() - 0.4).abs() < 1e-5);

        // Cooldown of 1 s = 10 ticks.
        action.update(&mut f.ctx(5));
        assert!((f.world.health_ratio(foe).unwrap() - 0.4).abs() < 1e-5);
        assert!(!action.has_completed(&f.ctx(5)));

        action.update(&mut f.ctx(10));
        assert!(!f.world.is_alive(foe));
        assert_eq!(action.target(), None);
        assert!(action.has_completed(&f.ctx(10)));
        assert!(!action.is_watching());

        action.update(&mut f.ctx(20));
        assert_eq!(action.target(), None);
    }

    #[test]
    fn rejects_allies_neutrals_and_objects_without_health() {
        let mut f = Fixture::new();
        let ally = f.spawn("soldier", Point::ground(1.0, 0.0), ME);
        let neutral = f.spawn("barracks", Point::ground(2.0, 0.0), PlayerId::INVALID);
        let mine = f.spawn("gold_mine", Point::ground(3.0, 0.0), FOE);
        let foe = f.spawn("soldier", Point::ground(4.0, 0.0), FOE);
        let mut action = attack(10);
        let ctx = f.ctx(0);
        assert!(!action.set_variables(&ctx, Some(ally), None, Layer::GROUND));
        assert!(!action.set_variables(&ctx, Some(neutral), None, Layer::GROUND));
        assert!(!action.set_variables(&ctx, Some(mine), None, Layer::GROUND));
        assert!(!action.valid_target());

        assert!(action.set_variables(&ctx, Some(foe), None, Layer::GROUND));
        assert!(!action.set_variables(&ctx, Some(ally), None, Layer::GROUND));
        assert_eq!(action.target(), Some(foe));
    }

    #[test]
    fn cancel_detaches_death_listener_once() {
        let mut f = Fixture::new();
        let foe = f.spawn("soldier", Point::ground(1.0, 0.0), FOE);
        let mut action = attack(10);
        let mut ctx = f.ctx(0);
        action.set_variables(&ctx, Some(foe), None, Layer::GROUND);
        action.enter(&mut ctx);
        assert!(action.is_watching());
        action.cancel(&mut ctx);
        assert!(!action.is_watching());
        assert!(!action.valid_target());
        action.cancel(&mut ctx);
        assert!(!action.valid_target());
    }

    #[test]
    fn autonomous_attack_scores_by_proximity_and_acquires_on_enter() {
        let mut f = Fixture::new();
        let foe = f.spawn("soldier", Point::ground(3.0, 0.0), FOE);
        f.world.refresh_index();
        let mut action = attack(10);
        let mut ctx = f.ctx(0);
        // 0.8 * (1 - 3 / 12)
        assert!((action.evaluate(&ctx) - 0.6).abs() < 1e-5);
        action.enter(&mut ctx);
        assert_eq!(action.target(), Some(foe));
        assert_eq!(action.evaluate(&ctx), 1.0);
    }
}

#[cfg(test)]
mod build {
    use rts_core::{Layer, LayerMask, Point};
    use rts_world::{Cost, Economy, SceneObjects};

    use super::fixture::{Fixture, GOLD, ME};
    use crate::{Action, ActionInfo, BuildState, CreateBuilding, CreateBuildingParams};

    fn barracks() -> CreateBuilding {
        let mut params = CreateBuildingParams::new("barracks", Cost::single(GOLD, 150));
        params.indicator = Some("barracks_ghost".into());
        params.build_secs = 2.0;
        params.allowed_layers = LayerMask::of(&[Layer::GROUND]);
        CreateBuilding::new(ActionInfo::new("build_barracks"), params)
    }

    /// Bind a site one unit away and arrive there.
    fn arrive(f: &mut Fixture, action: &mut CreateBuilding) {
        {
            let mut ctx = f.ctx(0);
            assert!(action.set_variables(&ctx, None, Some(Point::ground(1.0, 0.0)), Layer::GROUND));
            action.enter(&mut ctx);
            assert!(action.execute(&mut ctx));
        }
        f.world.step(0.0);
    }

    #[test]
    fn cancel_while_building_refunds_and_removes_indicator() {
        let mut f = Fixture::new();
        f.world.credit(ME, GOLD, 200);
        let mut action = barracks();
        arrive(&mut f, &mut action);

        action.update(&mut f.ctx(1));
        assert!(matches!(action.state(), BuildState::Building { .. }));
        assert_eq!(f.world.balance(ME, GOLD), 50);
        assert_eq!(f.count("barracks_ghost"), 1);

        let mut ctx = f.ctx(2);
        action.cancel(&mut ctx);
        action.cancel(&mut ctx);
        drop(ctx);
        assert_eq!(f.world.balance(ME, GOLD), 200, "net delta 0");
        assert_eq!(f.count("barracks_ghost"), 0);
        assert_eq!(f.count("barracks"), 0);
    }

    #[test]
    fn finished_building_is_never_refunded() {
        let mut f = Fixture::new();
        f.world.credit(ME, GOLD, 200);
        let mut action = barracks();
        arrive(&mut f, &mut action);

        action.update(&mut f.ctx(1));
        action.update(&mut f.ctx(20));
        assert!(!action.has_completed(&f.ctx(20)), "ready at tick 21");
        action.update(&mut f.ctx(21));
        let BuildState::Done { structure: Some(structure) } = action.state() else {
            panic!("expected a finished structure, got {:?}", action.state());
        };
        assert!(action.has_completed(&f.ctx(21)));
        assert_eq!(f.world.owner(structure), Some(ME));
        assert_eq!(f.count("barracks_ghost"), 0);

        action.exit(&mut f.ctx(22));
        assert_eq!(f.world.balance(ME, GOLD), 50, "net delta -cost");
    }

    #[test]
    fn unaffordable_retries_without_partial_spend() {
        let mut f = Fixture::new();
        f.world.credit(ME, GOLD, 100);
        let mut action = barracks();
        arrive(&mut f, &mut action);

        action.update(&mut f.ctx(1));
        assert!(action.not_affordable());
        assert!(!action.has_completed(&f.ctx(1)));
        assert_eq!(f.world.balance(ME, GOLD), 100);
        assert_eq!(f.count("barracks_ghost"), 0);

        f.world.credit(ME, GOLD, 100);
        action.update(&mut f.ctx(2));
        assert!(!action.not_affordable());
        assert_eq!(f.world.balance(ME, GOLD), 50);
    }

    #[test]
    fn site_on_disallowed_layer_is_rejected() {
        let mut f = Fixture::new();
        let mut action = barracks();
        let ctx = f.ctx(0);
        assert!(!action.set_variables(&ctx, None, Some(Point::ground(1.0, 0.0)), Layer(4)));
        assert_eq!(action.site(), None);
        assert_eq!(action.state(), BuildState::Idle);
    }
}

#[cfg(test)]
mod collect {
    use rts_core::{Layer, Point};
    use rts_world::{Economy, SceneObjects};

    use super::fixture::{Fixture, FOE, GOLD, ME};
    use crate::{Action, ActionInfo, CollectResource, CollectResourceParams};

    fn gather(amount: u32, complete_when_empty: bool) -> CollectResource {
        CollectResource::new(
            ActionInfo::new("collect"),
            CollectResourceParams { amount, complete_when_empty, ..Default::default() },
        )
    }

    #[test]
    fn withdrawal_is_capped_by_the_pile() {
        let mut f = Fixture::new();
        let mine = f.spawn("gold_mine", Point::ground(1.0, 0.0), rts_core::PlayerId::INVALID);
        let mut action = gather(50, true);
        {
            let mut ctx = f.ctx(0);
            assert!(action.set_variables(&ctx, Some(mine), None, Layer::GROUND));
            action.enter(&mut ctx);
            action.execute(&mut ctx);
            action.update(&mut ctx);
            assert!(action.has_completed(&ctx));
        }
        assert_eq!(action.collected(), 30);
        assert_eq!(f.world.balance(ME, GOLD), 30);
        let pile = f.world.pile(mine).unwrap();
        assert_eq!(pile.amount, 0);
        assert!(pile.is_empty());
    }

    #[test]
    fn collects_once_per_interval() {
        let mut f = Fixture::new();
        let mine = f.spawn("gold_mine", Point::ground(1.0, 0.0), rts_core::PlayerId::INVALID);
        let mut action = gather(10, false);
        {
            let mut ctx = f.ctx(0);
            action.set_variables(&ctx, Some(mine), None, Layer::GROUND);
            action.enter(&mut ctx);
            action.execute(&mut ctx);
        }
        for tick in 0..25 {
            action.update(&mut f.ctx(tick));
        }
        // Ticks 0, 10 and 20.
        assert_eq!(action.collected(), 30);
        assert!(!action.has_completed(&f.ctx(25)), "keeps waiting on an empty pile");
    }

    #[test]
    fn rejects_objects_without_a_pile() {
        let mut f = Fixture::new();
        let foe = f.spawn("soldier", Point::ground(1.0, 0.0), FOE);
        let mut action = gather(5, true);
        let ctx = f.ctx(0);
        assert!(!action.set_variables(&ctx, Some(foe), None, Layer::GROUND));
        assert!(!action.valid_target());
    }

    #[test]
    fn autonomous_collect_prefers_nearby_piles() {
        let mut f = Fixture::new();
        let mine = f.spawn("gold_mine", Point::ground(3.0, 0.0), rts_core::PlayerId::INVALID);
        let mut action = gather(5, true);
        let mut ctx = f.ctx(0);
        // 0.4 * (1 - 3 / 15)
        assert!((action.evaluate(&ctx) - 0.32).abs() < 1e-5);
        action.enter(&mut ctx);
        assert_eq!(action.target(), Some(mine));
    }
}

#[cfg(test)]
mod library {
    use rts_core::{Layer, Point};

    use super::fixture::Fixture;
    use crate::{
        load_catalog_reader, Action, ActionError, ActionInfo, ActionLibrary, MoveToPoint,
        MoveToPointParams,
    };

    #[test]
    fn standard_library_lists_templates_in_order() {
        let lib = ActionLibrary::standard();
        let ids: Vec<&str> = lib.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, ["move", "follow", "patrol", "attack", "collect"]);
        assert!(lib.get("attack").unwrap().info().smart);
        assert!(!lib.get("patrol").unwrap().info().smart);
    }

    #[test]
    fn duplicate_and_unknown_names_are_errors() {
        let lib = ActionLibrary::standard();
        let dup = MoveToPoint::new(ActionInfo::new("move"), MoveToPointParams::default());
        assert!(matches!(lib.with(dup), Err(ActionError::DuplicateAction(name)) if name == "move"));

        let lib = ActionLibrary::standard();
        assert!(matches!(lib.instantiate("fly"), Err(ActionError::UnknownAction(_))));
        assert!(lib.instantiate_named(&["move", "fly"]).is_err());
    }

    #[test]
    fn instances_are_fresh_and_independent() {
        let mut f = Fixture::new();
        let lib = ActionLibrary::standard();
        let mut first = lib.instantiate("move").unwrap();
        let ctx = f.ctx(0);
        assert!(first.set_variables(&ctx, None, Some(Point::ground(3.0, 0.0)), Layer::GROUND));

        let second = first.instantiate();
        assert!(first.valid_target());
        assert!(!second.valid_target());
        assert_eq!(second.id(), first.id());
        assert_eq!(lib.instantiate_all().len(), lib.len());
    }

    const CATALOG: &str = "\
name,kind,icon,description,smart,stopping_distance,max_follow_distance,repoll_secs,damage,range,delay_secs,radius,structure,indicator,cost_kind,cost_amount,build_secs,amount,complete_when_empty,command_weight,autonomous_weight,layers
walk,move_to_point,boot,Walk,true,0.5,,,,,,,,,,,,,,,,0
strike,attack,sword,Strike,true,1.5,40,0.5,12,2.0,1.2,10,,,,,,,,1.0,0.8,
build_barracks,build,hammer,Build barracks,false,1.0,,,,,,,barracks,barracks_ghost,0,150,8,,,,,0
gather,collect,basket,Gather,true,1.0,,,,2.0,1.0,15,,,,,,10,true,1.0,0.4,
";

    #[test]
    fn catalog_builds_templates() {
        let lib = load_catalog_reader(CATALOG.as_bytes()).unwrap();
        assert_eq!(lib.len(), 4);
        let walk = lib.get("walk").unwrap();
        assert_eq!(walk.info().icon, "boot");
        assert!(walk.info().smart);
        assert!(!lib.get("build_barracks").unwrap().info().smart);

        // `walk` is restricted to layer 0.
        let mut f = Fixture::new();
        let mut walk = lib.instantiate("walk").unwrap();
        let ctx = f.ctx(0);
        assert!(!walk.set_variables(&ctx, None, Some(Point::ORIGIN), Layer(1)));
        assert!(walk.set_variables(&ctx, None, Some(Point::ORIGIN), Layer(0)));
    }

    #[test]
    fn catalog_errors() {
        let header = CATALOG.lines().next().unwrap();
        let bad_layers = format!("{header}\nwalk,move_to_point,,,,,,,,,,,,,,,,,,,,0|99\n");
        assert!(load_catalog_reader(bad_layers.as_bytes()).is_err());

        let no_structure = format!("{header}\nb,build,,,,,,,,,,,,,,,,,,,,\n");
        assert!(matches!(
            load_catalog_reader(no_structure.as_bytes()),
            Err(ActionError::Catalog(_))
        ));

        let bad_kind = format!("{header}\nx,teleport,,,,,,,,,,,,,,,,,,,,\n");
        assert!(load_catalog_reader(bad_kind.as_bytes()).is_err());

        let dup = format!("{header}\nm,patrol,,,,,,,,,,,,,,,,,,,,\nm,patrol,,,,,,,,,,,,,,,,,,,,\n");
        assert!(matches!(
            load_catalog_reader(dup.as_bytes()),
            Err(ActionError::DuplicateAction(_))
        ));
    }
}

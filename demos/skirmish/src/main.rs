//! skirmish — two small armies and their workers on one map.
//!
//! Each side gets a gold mine, a handful of workers and a squad of soldiers.
//! Workers gather autonomously; player 0's soldiers are drag-selected and
//! ordered across the map, one of them patrols, and a worker is told to put
//! up barracks once it has gathered enough.  Everything else is left to the
//! utility AI.
//!
//! ```text
//! skirmish [config.json] [output_dir]
//! ```
//!
//! The optional JSON config overrides any field of [`DemoConfig`].  Set
//! `RUST_LOG=debug` to watch individual action transitions.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;

use rts_action::load_catalog_reader;
use rts_agent::{ActionRequest, AgentStore};
use rts_command::{Command, CommandController, InputBus, InputEvent};
use rts_core::{AgentId, Layer, PlayerId, Point, ResourceKind, SimConfig, SimRng, Tick};
use rts_output::{CsvWriter, OutputWriter, SimOutputObserver};
use rts_sim::{AiConfig, Cadence, Scene, SceneBuilder, SimObserver, TickStats};
use rts_world::{Economy, Prefab, SceneObjects, World};

// ── Constants ─────────────────────────────────────────────────────────────────

const GOLD: ResourceKind = ResourceKind(0);
const BLUE: PlayerId = PlayerId(0);
const RED: PlayerId = PlayerId(1);

// Action templates.  Workers and soldiers pick subsets by name.
const CATALOG_CSV: &str = "\
name,kind,icon,description,smart,stopping_distance,max_follow_distance,repoll_secs,damage,range,delay_secs,radius,structure,indicator,cost_kind,cost_amount,build_secs,amount,complete_when_empty,command_weight,autonomous_weight,layers\n\
move,move_to_point,move,Move to a point,true,0.5,,,,,,,,,,,,,,,,\n\
follow,move_to_target,follow,Follow a unit,false,1.5,40,0.5,,,,,,,,,,,,,,\n\
patrol,patrol,patrol,Patrol between two points,false,0.5,,,,,,,,,,,,,,,,\n\
attack,attack,sword,Attack an enemy,true,1.5,40,0.5,12,2.0,1.0,10,,,,,,,,1.0,0.8,\n\
gather,collect,basket,Gather gold,true,1.0,,,,2.0,1.0,25,,,,,,10,true,1.0,0.4,\n\
build_barracks,build,hammer,Build barracks,false,1.0,,,,,,,barracks,barracks_ghost,0,150,8,,,,,\n\
";

const WORKER_ACTIONS: &[&str] = &["move", "gather", "build_barracks"];
const SOLDIER_ACTIONS: &[&str] = &["move", "follow", "patrol", "attack"];

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:               SimConfig,
    ai:                AiConfig,
    workers_per_side:  usize,
    soldiers_per_side: usize,
    mine_gold:         u32,
    starting_gold:     u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                tick_duration_ms:      100,
                total_ticks:           1_800,
                seed:                  42,
                output_interval_ticks: 50,
            },
            ai: AiConfig {
                cadence:         Cadence::Timed { interval_ticks: 5 },
                percentage:      25.0,
                ..AiConfig::default()
            },
            workers_per_side:  4,
            soldiers_per_side: 6,
            mine_gold:         400,
            starting_gold:     50,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── Scene setup ───────────────────────────────────────────────────────────────

struct Side {
    owner:    PlayerId,
    base:     Point,
    workers:  Vec<AgentId>,
    soldiers: Vec<AgentId>,
}

fn populate(scene: &mut Scene, cfg: &DemoConfig, owner: PlayerId, base: Point, rng: &mut SimRng) -> Result<Side> {
    let mine = scene.world.prefabs().find("gold_mine").context("gold_mine prefab")?;
    let mine_at = Point::ground(base.x, base.z + 10.0);
    scene.world.scatter(mine, 1, mine_at, 0.0, PlayerId::INVALID, rng)?;

    let mut side = Side { owner, base, workers: Vec::new(), soldiers: Vec::new() };
    for _ in 0..cfg.workers_per_side {
        let at = rng.point_in_disc(mine_at, 3.0);
        side.workers.push(scene.spawn_unit_with("worker", at, owner, Some(WORKER_ACTIONS))?);
    }
    for _ in 0..cfg.soldiers_per_side {
        let at = rng.point_in_disc(base, 4.0);
        side.soldiers.push(scene.spawn_unit_with("soldier", at, owner, Some(SOLDIER_ACTIONS))?);
    }
    Ok(side)
}

/// Player input for the blue side, routed through the input bus.
fn blue_orders(scene: &mut Scene, blue: &Side, red: &Side, bus: &InputBus, controller: &mut CommandController) {
    // Drag-select the soldiers around the base (workers stand by the mine)
    // and send them at red's base.
    bus.emit(InputEvent::SelectRect {
        owner:    blue.owner,
        from:     Point::ground(blue.base.x - 5.0, blue.base.z - 5.0),
        to:       Point::ground(blue.base.x + 5.0, blue.base.z + 5.0),
        additive: false,
    });
    bus.emit(InputEvent::Command(Command::Designate {
        target: None,
        point:  Some(red.base),
        layer:  Layer::GROUND,
        queue:  false,
    }));
    let report = controller.apply(scene);
    tracing::info!(?report, "blue soldiers ordered to advance");

    // One soldier stays behind on patrol.
    if let Some(&guard) = blue.soldiers.last() {
        bus.emit(InputEvent::Select { agents: vec![guard], additive: false });
        let patrol = ActionRequest::new("patrol").at(Point::ground(blue.base.x, blue.base.z + 12.0));
        bus.emit(InputEvent::Command(Command::Order(patrol)));
        controller.apply(scene);
    }

    // One worker queues barracks behind its current job.
    if let Some(&builder) = blue.workers.first() {
        bus.emit(InputEvent::Select { agents: vec![builder], additive: false });
        let site = Point::ground(blue.base.x - 6.0, blue.base.z);
        bus.emit(InputEvent::Command(Command::Order(ActionRequest::new("build_barracks").at(site).queued(true))));
        let report = controller.apply(scene);
        tracing::info!(?report, "barracks queued");
    }
}

// ── Observer wrapper to print progress ───────────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:    SimOutputObserver<W>,
    interval: u64,
    switches: usize,
    reaped:   usize,
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_end(&mut self, stats: &TickStats) {
        self.switches += stats.switched;
        self.reaped += stats.reaped;
        if self.interval > 0 && stats.tick.0.is_multiple_of(self.interval) {
            println!(
                "  {:>6}  live {:>3}  evaluated {:>3}  switches {:>5}  reaped {:>3}",
                stats.tick.to_string(),
                stats.live,
                stats.evaluated,
                self.switches,
                self.reaped
            );
        }
        self.inner.on_tick_end(stats);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, world: &World) {
        self.inner.on_snapshot(tick, agents, world);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from("output"), PathBuf::from);
    let cfg = load_config(config_path.as_deref())?;

    println!("=== skirmish — utility AI demo ===");
    println!(
        "Workers/side: {}  |  Soldiers/side: {}  |  Ticks: {}  |  Seed: {}",
        cfg.workers_per_side, cfg.soldiers_per_side, cfg.sim.total_ticks, cfg.sim.seed
    );

    // 1. Scene with prefabs, treasury and the action catalog.
    let library = load_catalog_reader(Cursor::new(CATALOG_CSV))?;
    println!("Loaded {} action templates", library.len());

    let mut scene = SceneBuilder::new(cfg.sim.clone())
        .ai(cfg.ai.clone())
        .library(library)
        .prefab(Prefab::unit("worker", 60, 3.0))
        .prefab(Prefab::unit("soldier", 120, 4.0))
        .prefab(Prefab::structure("barracks", 800))
        .prefab(Prefab::indicator("barracks_ghost"))
        .prefab(Prefab::resource_pile("gold_mine", GOLD, cfg.mine_gold))
        .fund(BLUE, GOLD, cfg.starting_gold)
        .fund(RED, GOLD, cfg.starting_gold)
        .build()?;

    // 2. Both sides.
    let mut rng = SimRng::new(cfg.sim.seed);
    let blue = populate(&mut scene, &cfg, BLUE, Point::ground(-30.0, 0.0), &mut rng.child(0))?;
    let red = populate(&mut scene, &cfg, RED, Point::ground(30.0, 0.0), &mut rng.child(1))?;
    println!("Spawned {} agents, {} world objects", scene.agents.len(), scene.world.len());

    // 3. Player orders.
    let bus = InputBus::new();
    let mut controller = CommandController::new(&bus);
    blue_orders(&mut scene, &blue, &red, &bus, &mut controller);
    drop(controller);

    // 4. Run with CSV output.
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = ProgressObserver {
        inner:    SimOutputObserver::new(writer, &scene.config),
        interval: cfg.sim.output_interval_ticks * 4,
        switches: 0,
        reaped:   0,
    };

    let started = Instant::now();
    scene.run(&mut obs)?;
    let elapsed = started.elapsed();
    if let Some(e) = obs.inner.take_error() {
        return Err(e).context("writing output");
    }

    // 5. Summary.
    println!();
    println!("Finished {} in {:.2?}", scene.clock, elapsed);
    for side in [&blue, &red] {
        let alive = side
            .soldiers
            .iter()
            .chain(&side.workers)
            .filter(|&&id| scene.agents.contains(id))
            .count();
        let barracks = scene.world.prefabs().find("barracks");
        let buildings = scene
            .world
            .ids()
            .into_iter()
            .filter(|&o| scene.world.owner(o) == Some(side.owner))
            .filter(|&o| barracks.is_some_and(|b| scene.world.object(o).is_some_and(|obj| obj.prefab == b)))
            .count();
        println!(
            "  {}: {alive} units alive, {} gold, {buildings} barracks",
            side.owner,
            scene.world.balance(side.owner, GOLD),
        );
    }
    println!("Output written to {}", output_dir.display());
    Ok(())
}

//! Fluent builder for constructing a [`Scene`].

use rts_action::ActionLibrary;
use rts_agent::AgentStore;
use rts_core::{PlayerId, ResourceKind, SimConfig};
use rts_world::{Prefab, World};

use crate::{AiConfig, AiManager, Scene, SimError, SimResult};

/// Fluent builder for [`Scene`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                        |
/// |---------------------|--------------------------------|
/// | `.ai(c)`            | `AiConfig::default()`          |
/// | `.world(w)`         | `World::new()`                 |
/// | `.library(l)`       | `ActionLibrary::standard()`    |
/// | `.prefab(p)`        | none registered                |
/// | `.fund(p, k, n)`    | every ledger empty             |
///
/// # Example
///
/// ```rust,ignore
/// let mut scene = SceneBuilder::new(config)
///     .ai(AiConfig { percentage: 10.0, ..Default::default() })
///     .prefab(Prefab::unit("soldier", 100, 4.0))
///     .fund(PlayerId(0), GOLD, 500)
///     .build()?;
/// let soldier = scene.spawn_unit("soldier", Point::ORIGIN, PlayerId(0))?;
/// scene.run(&mut NoopObserver)?;
/// ```
pub struct SceneBuilder {
    config:  SimConfig,
    ai:      AiConfig,
    world:   Option<World>,
    library: Option<ActionLibrary>,
    prefabs: Vec<Prefab>,
    funds:   Vec<(PlayerId, ResourceKind, u32)>,
}

impl SceneBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            ai:      AiConfig::default(),
            world:   None,
            library: None,
            prefabs: Vec::new(),
            funds:   Vec::new(),
        }
    }

    pub fn ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    /// Start from a pre-populated world instead of an empty one.
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    pub fn library(mut self, library: ActionLibrary) -> Self {
        self.library = Some(library);
        self
    }

    pub fn prefab(mut self, prefab: Prefab) -> Self {
        self.prefabs.push(prefab);
        self
    }

    /// Credit `amount` of `kind` to `player` before the first tick.
    pub fn fund(mut self, player: PlayerId, kind: ResourceKind, amount: u32) -> Self {
        self.funds.push((player, kind, amount));
        self
    }

    /// Validate inputs and return a ready-to-run [`Scene`].
    pub fn build(self) -> SimResult<Scene> {
        if self.config.tick_duration_ms == 0 {
            return Err(SimError::Config("tick_duration_ms must be non-zero".into()));
        }
        self.ai.validate().map_err(SimError::Config)?;

        let mut world = self.world.unwrap_or_default();
        for prefab in self.prefabs {
            world.register_prefab(prefab)?;
        }
        for (player, kind, amount) in self.funds {
            world.treasury_mut().ledger_mut(player).credit(kind, amount);
        }

        let library = self.library.unwrap_or_else(ActionLibrary::standard);
        tracing::debug!(
            prefabs = world.prefabs().len(),
            actions = library.len(),
            ai = ?self.ai,
            "scene built"
        );

        Ok(Scene {
            clock:   self.config.make_clock(),
            config:  self.config,
            world,
            agents:  AgentStore::new(),
            manager: AiManager::new(self.ai),
            library,
        })
    }
}

//! Spawnable prefab definitions and their registry.

use rustc_hash::FxHashMap;

use rts_core::{Layer, PrefabId, ResourceKind};

use crate::{WorldError, WorldResult};

/// What a prefab spawns as.  Drives which components the object receives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrefabKind {
    /// A controllable unit: nav agent + health.
    Unit,
    /// A finished building: health, no movement.
    Structure,
    /// A temporary placement marker shown while something is built.
    Indicator,
    /// A harvestable resource stock.
    ResourcePile,
}

/// Template for objects created through the spawn service.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prefab {
    pub name:       String,
    pub kind:       PrefabKind,
    pub layer:      Layer,
    pub max_health: Option<u32>,
    /// Ground speed; only meaningful for `PrefabKind::Unit`.
    pub speed:      Option<f32>,
    /// Initial stock; only meaningful for `PrefabKind::ResourcePile`.
    pub pile:       Option<(ResourceKind, u32)>,
}

impl Prefab {
    pub fn unit(name: &str, max_health: u32, speed: f32) -> Self {
        Self {
            name:       name.to_owned(),
            kind:       PrefabKind::Unit,
            layer:      Layer::GROUND,
            max_health: Some(max_health),
            speed:      Some(speed),
            pile:       None,
        }
    }

    pub fn structure(name: &str, max_health: u32) -> Self {
        Self {
            name:       name.to_owned(),
            kind:       PrefabKind::Structure,
            layer:      Layer::GROUND,
            max_health: Some(max_health),
            speed:      None,
            pile:       None,
        }
    }

    pub fn indicator(name: &str) -> Self {
        Self {
            name:       name.to_owned(),
            kind:       PrefabKind::Indicator,
            layer:      Layer::GROUND,
            max_health: None,
            speed:      None,
            pile:       None,
        }
    }

    pub fn resource_pile(name: &str, kind: ResourceKind, amount: u32) -> Self {
        Self {
            name:       name.to_owned(),
            kind:       PrefabKind::ResourcePile,
            layer:      Layer::GROUND,
            max_health: None,
            speed:      None,
            pile:       Some((kind, amount)),
        }
    }

    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }
}

/// Name-addressable list of prefabs, indexed by [`PrefabId`].
#[derive(Clone, Debug, Default)]
pub struct PrefabRegistry {
    prefabs: Vec<Prefab>,
    by_name: FxHashMap<String, PrefabId>,
}

impl PrefabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `prefab`.  Names must be unique.
    pub fn register(&mut self, prefab: Prefab) -> WorldResult<PrefabId> {
        if self.by_name.contains_key(&prefab.name) {
            return Err(WorldError::DuplicatePrefab(prefab.name));
        }
        let id = PrefabId::try_from(self.prefabs.len())
            .map_err(|_| WorldError::RegistryFull)?;
        self.by_name.insert(prefab.name.clone(), id);
        self.prefabs.push(prefab);
        Ok(id)
    }

    pub fn get(&self, id: PrefabId) -> Option<&Prefab> {
        self.prefabs.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<PrefabId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.prefabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefabs.is_empty()
    }
}

//! A live scene object and its optional components.

use rts_core::{Layer, ObjectId, PlayerId, Point, PrefabId};

use crate::{Health, NavAgent, PrefabKind, ResourcePile};

/// One networked object in the scene.
///
/// Component presence follows the prefab kind: units carry a nav agent and
/// health, structures carry health, piles carry a stock, indicators carry
/// nothing.
#[derive(Debug)]
pub struct WorldObject {
    pub id:       ObjectId,
    pub prefab:   PrefabId,
    pub kind:     PrefabKind,
    pub position: Point,
    /// Facing in degrees around the vertical axis.
    pub yaw:      f32,
    pub layer:    Layer,
    pub owner:    PlayerId,
    pub nav:      Option<NavAgent>,
    pub health:   Option<Health>,
    pub pile:     Option<ResourcePile>,
}

impl WorldObject {
    /// `true` if this object can be damaged.
    pub fn is_damageable(&self) -> bool {
        self.health.as_ref().is_some_and(|h| !h.is_dead())
    }

    /// `true` for a resource pile with stock left.
    pub fn has_stock(&self) -> bool {
        self.pile.is_some_and(|p| !p.is_empty())
    }
}

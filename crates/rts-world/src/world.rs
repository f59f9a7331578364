//! The in-memory scene world.
//!
//! # Data layout
//!
//! Objects live in an `FxHashMap<ObjectId, WorldObject>`.  Ids come from a
//! monotonically increasing counter and are never reused, so a dangling id
//! held by an action simply stops resolving once the object is gone.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over the objects' ground-plane positions answers
//! "closest hostile / closest pile within r" queries used by autonomous
//! actions.  The index is rebuilt at the end of every [`World::step`]; any
//! mutation in between (spawn, destroy, teleport) marks it dirty and queries
//! fall back to a linear scan until the next rebuild.  Both paths break
//! distance ties by ascending `ObjectId` so results do not depend on which
//! path answered.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use rts_core::{Layer, ObjectId, PlayerId, Point, PrefabId, ResourceKind, SimRng, Subscription};

use crate::services::{is_hostile, Combat, Economy, Navigation, SceneObjects, Spawner};
use crate::{
    Cost, Health, NavAgent, Prefab, PrefabKind, PrefabRegistry, ResourcePile, Treasury, WorldError,
    WorldObject, WorldResult,
};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[x, z]` point with its object id.
#[derive(Clone, Debug)]
struct ObjectEntry {
    point: [f32; 2],
    id:    ObjectId,
}

impl RTreeObject for ObjectEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ObjectEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

/// Scene objects, prefabs and player ledgers.  Implements every collaborator
/// trait in [`crate::services`].
pub struct World {
    objects:     FxHashMap<ObjectId, WorldObject>,
    next_object: u32,
    prefabs:     PrefabRegistry,
    treasury:    Treasury,
    index:       RTree<ObjectEntry>,
    index_dirty: bool,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("objects", &self.objects.len())
            .field("prefabs", &self.prefabs.len())
            .field("treasury", &self.treasury)
            .field("index_dirty", &self.index_dirty)
            .finish()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            objects:     FxHashMap::default(),
            next_object: 0,
            prefabs:     PrefabRegistry::new(),
            treasury:    Treasury::new(),
            index:       RTree::new(),
            index_dirty: false,
        }
    }

    // ── Prefabs & economy ─────────────────────────────────────────────────

    pub fn register_prefab(&mut self, prefab: Prefab) -> WorldResult<PrefabId> {
        self.prefabs.register(prefab)
    }

    pub fn prefabs(&self) -> &PrefabRegistry {
        &self.prefabs
    }

    pub fn treasury(&self) -> &Treasury {
        &self.treasury
    }

    pub fn treasury_mut(&mut self) -> &mut Treasury {
        &mut self.treasury
    }

    // ── Objects ───────────────────────────────────────────────────────────

    /// Instantiate `prefab` owned by `owner`.
    pub fn spawn(
        &mut self,
        prefab:   PrefabId,
        position: Point,
        yaw:      f32,
        owner:    PlayerId,
    ) -> WorldResult<ObjectId> {
        let template = self.prefabs.get(prefab).ok_or(WorldError::PrefabNotFound(prefab))?;
        let id = ObjectId(self.next_object);
        self.next_object = self
            .next_object
            .checked_add(1)
            .filter(|&n| n != ObjectId::INVALID.0)
            .ok_or(WorldError::ObjectTableFull)?;

        let object = WorldObject {
            id,
            prefab,
            kind:   template.kind,
            position,
            yaw,
            layer:  template.layer,
            owner,
            nav:    match template.kind {
                PrefabKind::Unit => Some(NavAgent::new(template.speed.unwrap_or(0.0))),
                _ => None,
            },
            health: template.max_health.map(Health::new),
            pile:   template.pile.map(|(kind, amount)| ResourcePile::new(kind, amount)),
        };
        tracing::debug!(%id, prefab = %template.name, %position, %owner, "spawned object");
        self.objects.insert(id, object);
        self.index_dirty = true;
        Ok(id)
    }

    /// Spawn `count` copies of `prefab` scattered uniformly within `radius`
    /// of `center`.
    pub fn scatter(
        &mut self,
        prefab: PrefabId,
        count:  usize,
        center: Point,
        radius: f32,
        owner:  PlayerId,
        rng:    &mut SimRng,
    ) -> WorldResult<Vec<ObjectId>> {
        (0..count)
            .map(|_| {
                let at = rng.point_in_disc(center, radius);
                let yaw = rng.gen_range(0.0f32..360.0);
                self.spawn(prefab, at, yaw, owner)
            })
            .collect()
    }

    /// Remove an object without running death notifications.
    pub fn destroy(&mut self, id: ObjectId) -> bool {
        let removed = self.objects.remove(&id).is_some();
        if removed {
            self.index_dirty = true;
            tracing::debug!(%id, "destroyed object");
        }
        removed
    }

    pub fn object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject> {
        self.objects.get_mut(&id)
    }

    /// Move an object instantly (placement, tests).
    pub fn teleport(&mut self, id: ObjectId, to: Point) -> WorldResult<()> {
        let object = self.objects.get_mut(&id).ok_or(WorldError::ObjectNotFound(id))?;
        object.position = to;
        self.index_dirty = true;
        Ok(())
    }

    /// All live object ids in ascending order.
    pub fn ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ── Simulation step ───────────────────────────────────────────────────

    /// Advance every nav agent by `dt_secs` and rebuild the spatial index.
    pub fn step(&mut self, dt_secs: f32) {
        for object in self.objects.values_mut() {
            let from = object.position;
            if let Some(nav) = object.nav.as_mut() {
                object.position = nav.step(from, dt_secs);
            }
        }
        self.refresh_index();
    }

    /// Rebuild the R-tree from current positions.
    pub fn refresh_index(&mut self) {
        let entries = self
            .objects
            .values()
            .map(|o| ObjectEntry { point: o.position.planar(), id: o.id })
            .collect();
        self.index = RTree::bulk_load(entries);
        self.index_dirty = false;
    }

    fn nearest_matching(
        &self,
        from:   Point,
        radius: f32,
        accept: impl Fn(&WorldObject) -> bool,
    ) -> Option<(ObjectId, f32)> {
        if radius <= 0.0 {
            return None;
        }
        let candidates: Vec<ObjectId> = if self.index_dirty {
            self.objects.keys().copied().collect()
        } else {
            self.index
                .locate_within_distance(from.planar(), radius * radius)
                .map(|e| e.id)
                .collect()
        };

        candidates
            .into_iter()
            .filter_map(|id| {
                let object = self.objects.get(&id)?;
                if !accept(object) {
                    return None;
                }
                let d = from.planar_distance(object.position);
                (d <= radius).then_some((id, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
    }
}

// ── Collaborator impls ────────────────────────────────────────────────────────

impl Navigation for World {
    fn set_destination(&mut self, unit: ObjectId, point: Point) -> bool {
        match self.objects.get_mut(&unit).and_then(|o| o.nav.as_mut()) {
            Some(nav) => {
                nav.set_destination(point);
                true
            }
            None => false,
        }
    }

    fn reset_path(&mut self, unit: ObjectId) {
        if let Some(nav) = self.objects.get_mut(&unit).and_then(|o| o.nav.as_mut()) {
            nav.reset_path();
        }
    }

    fn set_stopping_distance(&mut self, unit: ObjectId, distance: f32) {
        if let Some(nav) = self.objects.get_mut(&unit).and_then(|o| o.nav.as_mut()) {
            nav.stopping_distance = distance.max(0.0);
        }
    }

    fn remaining_distance(&self, unit: ObjectId) -> Option<f32> {
        let object = self.objects.get(&unit)?;
        object.nav.as_ref().map(|nav| nav.remaining_distance(object.position))
    }

    fn is_path_pending(&self, unit: ObjectId) -> bool {
        self.objects
            .get(&unit)
            .and_then(|o| o.nav.as_ref())
            .is_some_and(NavAgent::is_path_pending)
    }
}

impl Combat for World {
    fn apply_damage(&mut self, target: ObjectId, amount: u32) -> bool {
        let killed = match self.objects.get_mut(&target).and_then(|o| o.health.as_mut()) {
            Some(health) if !health.is_dead() => health.apply_damage(amount),
            _ => return false,
        };
        if killed {
            if let Some(object) = self.objects.remove(&target) {
                self.index_dirty = true;
                tracing::debug!(%target, "object killed");
                if let Some(health) = object.health {
                    health.on_death().emit_once(&target);
                }
            }
        }
        true
    }

    fn subscribe_death(
        &mut self,
        target:  ObjectId,
        handler: Box<dyn FnMut(&ObjectId)>,
    ) -> Option<Subscription> {
        let health = self.objects.get(&target)?.health.as_ref()?;
        Some(health.on_death().subscribe(handler))
    }

    fn health_ratio(&self, target: ObjectId) -> Option<f32> {
        self.objects.get(&target)?.health.as_ref().map(Health::ratio)
    }
}

impl Economy for World {
    fn can_afford(&self, player: PlayerId, cost: &Cost) -> bool {
        match self.treasury.ledger(player) {
            Some(ledger) => ledger.can_afford_cost(cost),
            None => cost.is_free(),
        }
    }

    fn try_reserve(&mut self, player: PlayerId, cost: &Cost) -> bool {
        self.treasury.ledger_mut(player).try_spend(cost)
    }

    fn credit(&mut self, player: PlayerId, kind: ResourceKind, amount: u32) {
        self.treasury.ledger_mut(player).credit(kind, amount);
    }

    fn refund(&mut self, player: PlayerId, cost: &Cost) {
        self.treasury.ledger_mut(player).refund(cost);
    }

    fn balance(&self, player: PlayerId, kind: ResourceKind) -> i64 {
        self.treasury.balance(player, kind)
    }
}

impl Spawner for World {
    fn spawn_networked(&mut self, prefab: PrefabId, position: Point, yaw: f32) -> Option<ObjectId> {
        match self.spawn(prefab, position, yaw, PlayerId::INVALID) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(%prefab, error = %e, "spawn failed");
                None
            }
        }
    }

    fn destroy_networked(&mut self, object: ObjectId) -> bool {
        self.destroy(object)
    }

    fn assign_owner(&mut self, object: ObjectId, owner: PlayerId) -> bool {
        match self.objects.get_mut(&object) {
            Some(o) => {
                o.owner = owner;
                true
            }
            None => false,
        }
    }

    fn prefab_named(&self, name: &str) -> Option<PrefabId> {
        self.prefabs.find(name)
    }
}

impl SceneObjects for World {
    fn is_alive(&self, object: ObjectId) -> bool {
        self.objects.contains_key(&object)
    }

    fn position(&self, object: ObjectId) -> Option<Point> {
        self.objects.get(&object).map(|o| o.position)
    }

    fn owner(&self, object: ObjectId) -> Option<PlayerId> {
        self.objects.get(&object).map(|o| o.owner)
    }

    fn layer_of(&self, object: ObjectId) -> Option<Layer> {
        self.objects.get(&object).map(|o| o.layer)
    }

    fn has_health(&self, object: ObjectId) -> bool {
        self.objects.get(&object).is_some_and(WorldObject::is_damageable)
    }

    fn pile(&self, object: ObjectId) -> Option<ResourcePile> {
        self.objects.get(&object)?.pile
    }

    fn withdraw(&mut self, object: ObjectId, requested: u32) -> Option<(ResourceKind, u32)> {
        let pile = self.objects.get_mut(&object)?.pile.as_mut()?;
        let taken = pile.withdraw(requested);
        Some((pile.kind, taken))
    }

    fn nearest_hostile(&self, from: Point, owner: PlayerId, radius: f32) -> Option<(ObjectId, f32)> {
        self.nearest_matching(from, radius, |o| o.is_damageable() && is_hostile(owner, o.owner))
    }

    fn nearest_pile(&self, from: Point, radius: f32) -> Option<(ObjectId, f32)> {
        self.nearest_matching(from, radius, WorldObject::has_stock)
    }
}

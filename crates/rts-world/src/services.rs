//! Collaborator contracts the AI core calls into.
//!
//! The AI never owns movement, combat, economy or spawning.  Actions reach
//! those systems through the traits below, bundled as [`Host`].  Every
//! method is infallible from the caller's point of view: an object that does
//! not exist, or lacks the needed component, yields `false` / `None` and the
//! calling action degrades to a no-op.
//!
//! All traits are object-safe so actions can take `&mut dyn Host`.

use rts_core::{Layer, ObjectId, PlayerId, Point, PrefabId, ResourceKind, Subscription};

use crate::{Cost, ResourcePile};

/// Movement / pathfinding service.  Authoritative for "are we close enough".
pub trait Navigation {
    /// Start moving `unit` toward `point`.  `false` if `unit` cannot move.
    fn set_destination(&mut self, unit: ObjectId, point: Point) -> bool;

    /// Drop the current path; the unit stops where it is.
    fn reset_path(&mut self, unit: ObjectId);

    /// Distance at which the navigator considers the destination reached.
    fn set_stopping_distance(&mut self, unit: ObjectId, distance: f32);

    /// Remaining path length, or `None` if `unit` has no nav agent.
    fn remaining_distance(&self, unit: ObjectId) -> Option<f32>;

    /// `true` while a freshly requested path has not been computed yet.
    fn is_path_pending(&self, unit: ObjectId) -> bool;
}

/// Combat / health service.
pub trait Combat {
    /// Subtract `amount` from `target`'s health.  `false` if the target is
    /// gone or has no health component.
    fn apply_damage(&mut self, target: ObjectId, amount: u32) -> bool;

    /// Attach a fire-once handler invoked when `target` dies.  `None` if the
    /// target is gone or cannot die.  The handler is detached when the guard
    /// drops.
    fn subscribe_death(
        &mut self,
        target:  ObjectId,
        handler: Box<dyn FnMut(&ObjectId)>,
    ) -> Option<Subscription>;

    /// Current health fraction in `[0, 1]`.
    fn health_ratio(&self, target: ObjectId) -> Option<f32>;
}

/// Local-authoritative economy ledger.
pub trait Economy {
    fn can_afford(&self, player: PlayerId, cost: &Cost) -> bool;

    /// Deduct the whole `cost` if affordable.  Never partially deducts.
    fn try_reserve(&mut self, player: PlayerId, cost: &Cost) -> bool;

    fn credit(&mut self, player: PlayerId, kind: ResourceKind, amount: u32);

    /// Return a previously reserved `cost`.
    fn refund(&mut self, player: PlayerId, cost: &Cost);

    fn balance(&self, player: PlayerId, kind: ResourceKind) -> i64;
}

/// Networked spawn service.
pub trait Spawner {
    /// Instantiate `prefab` at `position` facing `yaw` degrees.
    fn spawn_networked(&mut self, prefab: PrefabId, position: Point, yaw: f32) -> Option<ObjectId>;

    fn destroy_networked(&mut self, object: ObjectId) -> bool;

    fn assign_owner(&mut self, object: ObjectId, owner: PlayerId) -> bool;

    fn prefab_named(&self, name: &str) -> Option<PrefabId>;
}

/// Read (and minimal write) access to scene objects.
pub trait SceneObjects {
    fn is_alive(&self, object: ObjectId) -> bool;

    fn position(&self, object: ObjectId) -> Option<Point>;

    fn owner(&self, object: ObjectId) -> Option<PlayerId>;

    /// Surface layer the object stands on.
    fn layer_of(&self, object: ObjectId) -> Option<Layer>;

    fn has_health(&self, object: ObjectId) -> bool;

    fn pile(&self, object: ObjectId) -> Option<ResourcePile>;

    /// Take `min(requested, available)` from a resource pile.
    fn withdraw(&mut self, object: ObjectId, requested: u32) -> Option<(ResourceKind, u32)>;

    /// Closest living object with health owned by a player other than
    /// `owner` (neutral objects excluded) within `radius` of `from`.
    fn nearest_hostile(&self, from: Point, owner: PlayerId, radius: f32) -> Option<(ObjectId, f32)>;

    /// Closest non-empty resource pile within `radius` of `from`.
    fn nearest_pile(&self, from: Point, radius: f32) -> Option<(ObjectId, f32)>;
}

/// Everything an action may call.
pub trait Host: Navigation + Combat + Economy + Spawner + SceneObjects {}

impl<T: Navigation + Combat + Economy + Spawner + SceneObjects + ?Sized> Host for T {}

/// `true` if an object owned by `other` is an enemy of `owner`.
#[inline]
pub fn is_hostile(owner: PlayerId, other: PlayerId) -> bool {
    other.is_valid() && other != owner
}

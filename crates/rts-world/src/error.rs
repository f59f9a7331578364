//! World error type.

use thiserror::Error;

use rts_core::{ObjectId, PrefabId};

/// Errors produced by `rts-world` construction APIs.
///
/// The collaborator traits themselves never return errors: a missing object
/// or component is reported as `false` / `None` so the AI can degrade to a
/// no-op.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("prefab {0} not registered")]
    PrefabNotFound(PrefabId),

    #[error("prefab name {0:?} already registered")]
    DuplicatePrefab(String),

    #[error("prefab registry is full")]
    RegistryFull,

    #[error("object table is full")]
    ObjectTableFull,
}

pub type WorldResult<T> = Result<T, WorldError>;

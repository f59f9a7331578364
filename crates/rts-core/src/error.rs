//! Workspace base error type.
//!
//! Sub-crates define their own error enums and either convert them into
//! `CoreError` via `From` impls or wrap `CoreError` as one variant, whichever
//! keeps error sites clean.

use thiserror::Error;

use crate::{AgentId, ObjectId, PrefabId};

/// The top-level error type for `rts-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("prefab {0} not registered")]
    PrefabNotFound(PrefabId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `rts-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;

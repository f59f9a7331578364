use thiserror::Error;

use rts_action::ActionError;
use rts_core::{AgentId, ObjectId};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("unit {0} already has an agent")]
    UnitTaken(ObjectId),

    #[error("agent for unit {0} has no possible actions")]
    NoActions(ObjectId),

    #[error("agent store is full")]
    StoreFull,

    #[error(transparent)]
    Action(#[from] ActionError),
}

pub type AgentResult<T> = Result<T, AgentError>;

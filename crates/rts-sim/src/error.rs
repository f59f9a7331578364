use rts_agent::AgentError;
use rts_core::AgentId;
use rts_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scene configuration error: {0}")]
    Config(String),

    #[error("unknown prefab {0:?}")]
    UnknownPrefab(String),

    #[error("agent {0} is not registered with the AI manager")]
    NotRegistered(AgentId),

    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("agent error: {0}")]
    Agent(#[from] AgentError),
}

pub type SimResult<T> = Result<T, SimError>;

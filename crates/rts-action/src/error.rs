use thiserror::Error;

use rts_core::CoreError;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action {0:?} already registered")]
    DuplicateAction(String),

    #[error("action {0:?} not found in library")]
    UnknownAction(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ActionResult<T> = Result<T, ActionError>;

use thiserror::Error;

use crate::lifecycle::CycleError;
use crate::widget::TreeError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session '{0}' not found")]
    NotFound(String),

    #[error("Session limit of {max} reached")]
    LimitReached { max: usize },

    #[error("Application setup failed: {0}")]
    Setup(#[from] TreeError),

    #[error(transparent)]
    Cycle(#[from] CycleError),
}

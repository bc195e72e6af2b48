//! Core error type.
//!
//! Each sub-crate keeps its own error enum (`GridError`, `OccupancyError`,
//! …).  `CoreError` covers what the shared primitives themselves can reject,
//! which today is configuration.

use thiserror::Error;

use crate::AgentId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

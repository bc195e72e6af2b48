use pg_behavior::FsmError;
use pg_core::{AgentId, CoreError};
use pg_mobility::OccupancyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("agent {agent}: {source}")]
    Occupancy {
        agent:  AgentId,
        #[source]
        source: OccupancyError,
    },

    #[error("agent {agent}: {source}")]
    Fsm {
        agent:  AgentId,
        #[source]
        source: FsmError,
    },
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::AgentNotFound(agent) => SimError::AgentNotFound(agent),
            CoreError::Config(msg) => SimError::Config(msg),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;

use pg_behavior::FsmError;
use pg_core::{AgentId, CellId};
use pg_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OccupancyError {
    #[error("agent {agent} cannot use {cell}: not a cell of this grid")]
    InvalidCell { agent: AgentId, cell: CellId },

    #[error("planning failed: {0}")]
    Planning(#[from] GridError),

    #[error("state machine rejected arrival: {0}")]
    Fsm(#[from] FsmError),
}

pub type OccupancyResult<T> = Result<T, OccupancyError>;

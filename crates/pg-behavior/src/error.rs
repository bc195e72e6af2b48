use thiserror::Error;

use crate::PawnState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsmError {
    #[error("pawn is dead and cannot transition to {to}")]
    Terminal { to: PawnState },
}

pub type FsmResult<T> = Result<T, FsmError>;

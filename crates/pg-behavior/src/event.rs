//! Events delivered to the FSM and what a handler answers with.

use pg_core::CellId;

use crate::PawnState;

/// Something that happened to a pawn outside the state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PawnEvent {
    /// The pawn's current cell equals its goal.
    Arrived { cell: CellId },
}

/// A handler's answer to a [`PawnEvent`].
///
/// `transition` is applied by the machine before `react` returns; `goal` is
/// left for the caller to write into the pawn's goal relation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub transition: Option<PawnState>,
    pub goal:       Option<CellId>,
}

impl Reaction {
    /// Event ignored.
    pub const NONE: Reaction = Reaction { transition: None, goal: None };
}

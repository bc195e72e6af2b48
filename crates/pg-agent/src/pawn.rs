//! `PawnMut` — one pawn's row of the SoA store, borrowed mutably.

use pg_core::{AgentId, AgentRng, CellId, Vec2};
use pg_behavior::PawnFsm;

/// Exclusive borrow of everything one pawn owns.
///
/// Views of distinct pawns never alias, so a batch of them can be processed
/// on separate worker threads.
pub struct PawnMut<'a> {
    pub id:        AgentId,
    pub position:  &'a mut Vec2,
    pub velocity:  &'a mut Vec2,
    pub speed:     f64,
    pub occupying: &'a mut CellId,
    pub goal:      &'a mut CellId,
    pub next_cell: &'a mut CellId,
    pub fsm:       &'a mut PawnFsm,
    pub rng:       &'a mut AgentRng,
}

impl PawnMut<'_> {
    /// Stop in place: zero velocity, no next cell.
    #[inline]
    pub fn halt(&mut self) {
        *self.velocity = Vec2::ZERO;
        *self.next_cell = CellId::INVALID;
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.next_cell.is_valid()
    }
}

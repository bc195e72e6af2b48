//! Goal policies — where a walking pawn heads after it arrives.

use pg_core::{AgentId, AgentRng, CellId};
use pg_grid::WeightedGrid;

/// Chooses the next goal for a pawn that just arrived at `current`.
///
/// One policy instance is shared by every pawn and, with the `parallel`
/// feature, by every worker thread.  Per-pawn randomness must come from
/// `rng`, never from state inside the policy.
pub trait GoalPolicy: Send + Sync {
    fn next_goal(
        &self,
        agent:   AgentId,
        current: CellId,
        grid:    &WeightedGrid,
        rng:     &mut AgentRng,
    ) -> CellId;
}

/// Every pawn is sent to the same cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedGoal(pub CellId);

impl GoalPolicy for FixedGoal {
    fn next_goal(&self, _: AgentId, _: CellId, _: &WeightedGrid, _: &mut AgentRng) -> CellId {
        self.0
    }
}

/// Uniformly random cell other than the one just reached.
///
/// Draws that land on a blocked cell are redrawn, up to
/// [`RandomGoal::MAX_DRAWS`] times; if every draw is blocked, or the grid has
/// a single cell, the pawn parks on `current`.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomGoal;

impl RandomGoal {
    pub const MAX_DRAWS: usize = 16;
}

impl GoalPolicy for RandomGoal {
    fn next_goal(&self, _: AgentId, current: CellId, grid: &WeightedGrid, rng: &mut AgentRng) -> CellId {
        let n = grid.cell_count() as u32;
        if n < 2 {
            return current;
        }
        for _ in 0..Self::MAX_DRAWS {
            // Draw from the n−1 other cells and skip over `current`.
            let pick = rng.gen_range(0..n - 1);
            let cell = if current.is_valid() && pick >= current.0 { CellId(pick + 1) } else { CellId(pick) };
            if !grid.is_blocked(cell) {
                return cell;
            }
        }
        current
    }
}

/// The goal stays where the pawn is, so it parks on arrival.
#[derive(Copy, Clone, Debug, Default)]
pub struct StayPut;

impl GoalPolicy for StayPut {
    fn next_goal(&self, _: AgentId, current: CellId, _: &WeightedGrid, _: &mut AgentRng) -> CellId {
        current
    }
}

//! The occupancy protocol: the only sanctioned way to move a pawn's current
//! cell or goal.
//!
//! Every write is followed synchronously by one planning pass:
//!
//! ```text
//! set_current / set_goal
//!        │
//!        ▼
//!   both relations set? ── no ──▶ Replan::Pending
//!        │ yes
//!        ▼
//!   pawn dead? ── yes ──▶ halt ─▶ Replan::Halted
//!        │ no
//!        ▼
//!   current == goal? ── yes ──▶ halt, re-centre, FSM Arrived
//!        │ no                     └─▶ new goal? plan once ─▶ Replan::Arrived
//!        ▼
//!   planner.next_hop ──▶ next cell + velocity ─▶ Replan::Moving
//! ```
//!
//! A planning failure halts the pawn (zero velocity, no next cell) before the
//! error is returned, so it never keeps moving on a stale plan.

use pg_behavior::{FsmContext, GoalPolicy, PawnEvent};
use pg_core::{CellId, Vec2};
use pg_grid::{Planner, WeightedGrid};

use pg_agent::PawnMut;

use crate::{OccupancyError, OccupancyResult};

/// Shared, read-only collaborators of a planning pass.
#[derive(Copy, Clone)]
pub struct PlanningEnv<'a> {
    pub grid:    &'a WeightedGrid,
    pub planner: &'a dyn Planner,
    pub policy:  &'a dyn GoalPolicy,
}

/// Outcome of the planning pass that follows a relation write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Replan {
    /// Current cell or goal still unset; nothing planned.
    Pending,
    /// The pawn is dead: stopped where it stands, nothing planned.
    Halted,
    /// The pawn reached its goal.  `next` is the first hop towards the goal
    /// the FSM picked in response, or `None` if it parked.
    Arrived { next: Option<CellId> },
    /// Heading for `next`.
    Moving { next: CellId },
}

/// Put the pawn on `cell` and re-plan.
pub fn set_current(pawn: &mut PawnMut<'_>, cell: CellId, env: &PlanningEnv<'_>) -> OccupancyResult<Replan> {
    check_cell(pawn, cell, env)?;
    *pawn.occupying = cell;
    replan(pawn, env)
}

/// Give the pawn the goal `cell` and re-plan.  Re-affirming the current goal
/// is how a plan is refreshed.
pub fn set_goal(pawn: &mut PawnMut<'_>, cell: CellId, env: &PlanningEnv<'_>) -> OccupancyResult<Replan> {
    check_cell(pawn, cell, env)?;
    *pawn.goal = cell;
    replan(pawn, env)
}

/// Move the occupying relation without planning.  The caller must follow up
/// with a goal write so the plan catches up.
pub(crate) fn relocate(pawn: &mut PawnMut<'_>, cell: CellId) {
    *pawn.occupying = cell;
}

fn check_cell(pawn: &PawnMut<'_>, cell: CellId, env: &PlanningEnv<'_>) -> OccupancyResult<()> {
    if env.grid.contains(cell) {
        Ok(())
    } else {
        Err(OccupancyError::InvalidCell { agent: pawn.id, cell })
    }
}

fn replan(pawn: &mut PawnMut<'_>, env: &PlanningEnv<'_>) -> OccupancyResult<Replan> {
    let (current, goal) = (*pawn.occupying, *pawn.goal);
    if !current.is_valid() || !goal.is_valid() {
        return Ok(Replan::Pending);
    }
    if !pawn.fsm.is_alive() {
        pawn.halt();
        return Ok(Replan::Halted);
    }
    if current == goal {
        return arrive(pawn, env);
    }
    plan(pawn, env).map(|next| Replan::Moving { next })
}

fn plan(pawn: &mut PawnMut<'_>, env: &PlanningEnv<'_>) -> OccupancyResult<CellId> {
    let (current, goal) = (*pawn.occupying, *pawn.goal);
    let next = match env.planner.next_hop(env.grid, current, goal) {
        Ok(next) => next,
        Err(e) => {
            pawn.halt();
            return Err(e.into());
        }
    };
    let step = env.grid.center(next)? - env.grid.center(current)?;
    *pawn.next_cell = next;
    *pawn.velocity = step * pawn.speed;
    tracing::debug!(agent = %pawn.id, %current, %goal, %next, "planned");
    Ok(next)
}

fn arrive(pawn: &mut PawnMut<'_>, env: &PlanningEnv<'_>) -> OccupancyResult<Replan> {
    let cell = *pawn.occupying;
    pawn.halt();
    *pawn.position = Vec2::ZERO;

    let mut ctx = FsmContext {
        agent:   pawn.id,
        current: cell,
        grid:    env.grid,
        policy:  env.policy,
        rng:     &mut *pawn.rng,
    };
    let reaction = pawn.fsm.react(&PawnEvent::Arrived { cell }, &mut ctx)?;
    tracing::debug!(agent = %pawn.id, %cell, new_goal = ?reaction.goal, "arrived");

    let Some(new_goal) = reaction.goal else {
        return Ok(Replan::Arrived { next: None });
    };
    check_cell(pawn, new_goal, env)?;
    *pawn.goal = new_goal;
    if new_goal == cell {
        return Ok(Replan::Arrived { next: None });
    }
    // Planned directly rather than through `replan`: one arrival per write.
    plan(pawn, env).map(|next| Replan::Arrived { next: Some(next) })
}

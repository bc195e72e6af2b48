//! Two-phase movement step.
//!
//! 1. **Integrate**: every pawn's in-cell position advances by
//!    `velocity × elapsed`.
//! 2. **Cross**: every pawn with a next cell whose position left `[-1, 1]` on
//!    some axis wraps to the opposite edge, takes the next cell as its
//!    current cell, and re-affirms its goal so the plan is refreshed once.
//!
//! Phase 1 finishes for all pawns before phase 2 starts.  Within a phase
//! pawns are independent, so with the `parallel` feature each phase is a
//! Rayon pass over disjoint `PawnMut` views.
//!
//! Overshoot past the boundary is discarded: a pawn that crosses always
//! re-enters exactly at the far edge of its new cell.

use pg_agent::{AgentRngs, AgentStore, PawnMut};
use pg_core::{AgentId, Vec2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::occupancy::{self, PlanningEnv, Replan};
use crate::{OccupancyError, OccupancyResult};

/// What the crossing phase did in one tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickReport {
    /// Pawns that moved into a new cell.
    pub crossings: usize,
    /// Crossings that landed on the pawn's goal.
    pub arrivals:  usize,
    /// Per-pawn failures.  The pawn is halted; other pawns are unaffected.
    pub errors:    Vec<(AgentId, OccupancyError)>,
}

impl TickReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn record(&mut self, agent: AgentId, outcome: OccupancyResult<Option<Replan>>) {
        match outcome {
            Ok(None) => {}
            Ok(Some(replan)) => {
                self.crossings += 1;
                if matches!(replan, Replan::Arrived { .. }) {
                    self.arrivals += 1;
                }
            }
            Err(e) => {
                tracing::warn!(%agent, error = %e, "movement failed");
                self.errors.push((agent, e));
            }
        }
    }
}

/// Drives the per-tick movement phases over an [`AgentStore`].
#[derive(Copy, Clone, Debug, Default)]
pub struct MovementScheduler;

impl MovementScheduler {
    /// Run both phases for one tick lasting `elapsed` seconds.
    pub fn tick(
        &self,
        store:   &mut AgentStore,
        rngs:    &mut AgentRngs,
        env:     &PlanningEnv<'_>,
        elapsed: f64,
    ) -> TickReport {
        self.integrate(store, rngs, elapsed);
        self.cross_boundaries(store, rngs, env)
    }

    /// Phase 1.
    pub fn integrate(&self, store: &mut AgentStore, rngs: &mut AgentRngs, elapsed: f64) {
        #[cfg(feature = "parallel")]
        store.par_pawns_mut(rngs).for_each(|p| integrate_one(p, elapsed));

        #[cfg(not(feature = "parallel"))]
        store.pawns_mut(rngs).for_each(|p| integrate_one(p, elapsed));
    }

    /// Phase 2.
    pub fn cross_boundaries(
        &self,
        store: &mut AgentStore,
        rngs:  &mut AgentRngs,
        env:   &PlanningEnv<'_>,
    ) -> TickReport {
        #[cfg(feature = "parallel")]
        let outcomes: Vec<_> = store
            .par_pawns_mut(rngs)
            .filter(|p| p.is_moving())
            .map(|mut p| (p.id, cross_one(&mut p, env)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<_> = store
            .pawns_mut(rngs)
            .filter(|p| p.is_moving())
            .map(|mut p| (p.id, cross_one(&mut p, env)))
            .collect();

        let mut report = TickReport::default();
        for (agent, outcome) in outcomes {
            report.record(agent, outcome);
        }
        report
    }
}

fn integrate_one(pawn: PawnMut<'_>, elapsed: f64) {
    *pawn.position += *pawn.velocity * elapsed;
}

/// `Ok(None)` when the pawn is still inside its cell.
fn cross_one(pawn: &mut PawnMut<'_>, env: &PlanningEnv<'_>) -> OccupancyResult<Option<Replan>> {
    let Some(wrapped) = wrap(*pawn.position) else {
        return Ok(None);
    };
    *pawn.position = wrapped;
    let next = *pawn.next_cell;
    occupancy::relocate(pawn, next);
    let goal = *pawn.goal;
    occupancy::set_goal(pawn, goal, env).map(Some)
}

/// The position mirrored onto the far edge on every axis past ±1, or `None`
/// if the pawn has not left its cell.
fn wrap(p: Vec2) -> Option<Vec2> {
    fn axis(v: f64) -> f64 {
        if v > 1.0 {
            -1.0
        } else if v < -1.0 {
            1.0
        } else {
            v
        }
    }
    let w = Vec2::new(axis(p.x), axis(p.y));
    (w != p).then_some(w)
}

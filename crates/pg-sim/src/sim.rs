//! The `Sim` struct and its tick loop.

use pg_agent::{AgentRngs, AgentStore, PawnMut};
use pg_behavior::{FsmContext, GoalPolicy, PawnState};
use pg_core::{AgentId, CellId, SimClock, SimConfig, Tick};
use pg_grid::{Planner, WeightedGrid};
use pg_mobility::{MovementScheduler, PlanningEnv, Replan, TickReport, set_current, set_goal};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{SimError, SimObserver, SimResult, StateCounts};

/// The simulation runner.
///
/// `Sim<P, G>` owns the world and drives one tick as:
///
/// 1. **FSM update**: every pawn's active state runs its periodic step.
/// 2. **Integrate**: in-cell positions advance by `velocity × elapsed`.
/// 3. **Cross**: pawns past their cell boundary step into their next cell
///    and re-plan.
/// 4. **Observe**: `on_tick_end`, per-pawn errors, and every
///    `snapshot_interval_ticks` an `on_snapshot`.
///
/// Each phase finishes for every pawn before the next begins.  With the
/// `parallel` feature phases 1–3 fan out over Rayon.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: Planner, G: GoalPolicy> {
    pub config: SimConfig,

    /// Tick counter and elapsed-time source.
    pub clock: SimClock,

    /// Read-only after construction.
    pub grid: WeightedGrid,

    pub agents: AgentStore,

    /// Per-pawn deterministic RNGs, kept apart for the split borrow.
    pub rngs: AgentRngs,

    pub planner: P,

    pub policy: G,

    pub(crate) scheduler: MovementScheduler,
}

impl<P: Planner, G: GoalPolicy> Sim<P, G> {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`, taking each tick's
    /// elapsed time from the clock.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        tracing::info!(
            from = %self.clock.current_tick,
            to = %self.config.end_tick(),
            agents = self.agents.count,
            "run started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            let elapsed = self.clock.next_elapsed();
            self.step(elapsed, observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        tracing::info!(tick = %self.clock.current_tick, elapsed_secs = self.clock.elapsed_total_secs, "run finished");
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let elapsed = self.clock.next_elapsed();
            self.step(elapsed, observer);
        }
    }

    /// Process one tick lasting `elapsed` seconds, supplied by the caller.
    pub fn step<O: SimObserver>(&mut self, elapsed: f64, observer: &mut O) -> TickReport {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let report = self.process_tick(elapsed);

        for (agent, error) in &report.errors {
            observer.on_agent_error(now, *agent, error);
        }
        observer.on_tick_end(now, &report);
        if now.is_every(self.config.snapshot_interval_ticks) {
            observer.on_snapshot(now, &self.agents, &self.grid);
        }

        self.clock.advance(elapsed);
        report
    }

    fn process_tick(&mut self, elapsed: f64) -> TickReport {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let grid   = &self.grid;
        let policy = &self.policy;
        let agents = &mut self.agents;
        let rngs   = &mut self.rngs;

        // ── Phase 1: FSM update ───────────────────────────────────────────
        #[cfg(feature = "parallel")]
        agents.par_pawns_mut(rngs).for_each(|p| update_fsm(p, grid, policy));

        #[cfg(not(feature = "parallel"))]
        agents.pawns_mut(rngs).for_each(|p| update_fsm(p, grid, policy));

        // ── Phases 2 & 3: movement ────────────────────────────────────────
        let env = PlanningEnv { grid, planner: &self.planner, policy };
        self.scheduler.tick(agents, rngs, &env, elapsed)
    }

    // ── External commands ─────────────────────────────────────────────────

    /// Move `agent` onto `cell` through the occupancy protocol.
    pub fn set_current(&mut self, agent: AgentId, cell: CellId) -> SimResult<Replan> {
        let env = PlanningEnv { grid: &self.grid, planner: &self.planner, policy: &self.policy };
        let mut pawn = self.agents.pawn_mut(&mut self.rngs, agent)?;
        set_current(&mut pawn, cell, &env).map_err(|source| SimError::Occupancy { agent, source })
    }

    /// Send `agent` towards `cell` through the occupancy protocol.
    pub fn set_goal(&mut self, agent: AgentId, cell: CellId) -> SimResult<Replan> {
        let env = PlanningEnv { grid: &self.grid, planner: &self.planner, policy: &self.policy };
        let mut pawn = self.agents.pawn_mut(&mut self.rngs, agent)?;
        set_goal(&mut pawn, cell, &env).map_err(|source| SimError::Occupancy { agent, source })
    }

    /// Kill `agent`: its FSM enters `Dead` and it stops where it stands.
    pub fn kill(&mut self, agent: AgentId) -> SimResult<()> {
        let mut pawn = self.agents.pawn_mut(&mut self.rngs, agent)?;
        pawn.fsm.kill();
        pawn.halt();
        tracing::debug!(%agent, "killed");
        Ok(())
    }

    /// Put a living pawn into `state`.  `Dead` goes through [`kill`](Self::kill).
    pub fn change_state(&mut self, agent: AgentId, state: PawnState) -> SimResult<()> {
        if !self.agents.contains(agent) {
            return Err(SimError::AgentNotFound(agent));
        }
        if !state.is_alive() && self.agents.fsm[agent.index()].is_alive() {
            return self.kill(agent);
        }
        self.agents.fsm[agent.index()]
            .change_to(state)
            .map_err(|source| SimError::Fsm { agent, source })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn state_counts(&self) -> StateCounts {
        StateCounts::from_store(&self.agents)
    }
}

fn update_fsm<G: GoalPolicy>(pawn: PawnMut<'_>, grid: &WeightedGrid, policy: &G) {
    let mut ctx = FsmContext {
        agent:   pawn.id,
        current: *pawn.occupying,
        grid,
        policy,
        rng:     &mut *pawn.rng,
    };
    if let Err(e) = pawn.fsm.update(&mut ctx) {
        tracing::warn!(agent = %pawn.id, error = %e, "fsm update failed");
    }
}

//! Fluent builder for constructing a [`Sim`].

use pg_agent::{AgentRngs, AgentStore};
use pg_behavior::GoalPolicy;
use pg_core::{AgentId, CellId, SimConfig};
use pg_grid::{Planner, WeightedGrid};
use pg_mobility::{OccupancyError, OccupancyResult, PlanningEnv, Replan, set_current, set_goal};

use crate::{Population, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<P, G>`].
///
/// # Required inputs
///
/// - [`SimConfig`]
/// - the [`WeightedGrid`], already wired (e.g. with `pg_grid::connect_all`)
/// - [`AgentStore`] + [`AgentRngs`] from `pg_agent::AgentStoreBuilder`
/// - `P: Planner` (e.g. `pg_grid::DijkstraPlanner`)
/// - `G: GoalPolicy` (e.g. `pg_behavior::RandomGoal`)
///
/// # Optional inputs
///
/// | Method                | Default                          |
/// |-----------------------|----------------------------------|
/// | `.initial_cells(v)`   | every pawn off-grid              |
/// | `.goals(v)`           | no goals                         |
///
/// Placement goes through the occupancy protocol, so `build` also computes
/// every pawn's first hop.  A start or goal outside the grid fails the build;
/// an unreachable goal only leaves that pawn halted.
///
/// ```rust,ignore
/// let pop = seed_population(&grid, 20, config.seed, DEFAULT_SPEED_RANGE)?;
/// let mut sim = SimBuilder::from_population(config, grid, pop, DijkstraPlanner, RandomGoal)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<P: Planner, G: GoalPolicy> {
    config:  SimConfig,
    grid:    WeightedGrid,
    agents:  AgentStore,
    rngs:    AgentRngs,
    planner: P,
    policy:  G,
    cells:   Option<Vec<CellId>>,
    goals:   Option<Vec<CellId>>,
}

impl<P: Planner, G: GoalPolicy> SimBuilder<P, G> {
    pub fn new(
        config:  SimConfig,
        grid:    WeightedGrid,
        agents:  AgentStore,
        rngs:    AgentRngs,
        planner: P,
        policy:  G,
    ) -> Self {
        Self { config, grid, agents, rngs, planner, policy, cells: None, goals: None }
    }

    /// Builder pre-filled with a seeded population's pawns, starts and goals.
    pub fn from_population(config: SimConfig, grid: WeightedGrid, population: Population, planner: P, policy: G) -> Self {
        Self::new(config, grid, population.agents, population.rngs, planner, policy)
            .initial_cells(population.starts)
            .goals(population.goals)
    }

    /// Starting cell per pawn (length `agent_count`).  `CellId::INVALID`
    /// leaves a pawn off-grid.
    pub fn initial_cells(mut self, cells: Vec<CellId>) -> Self {
        self.cells = Some(cells);
        self
    }

    /// Goal per pawn (length `agent_count`).  `CellId::INVALID` means none.
    pub fn goals(mut self, goals: Vec<CellId>) -> Self {
        self.goals = Some(goals);
        self
    }

    /// Validate inputs, place every pawn, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, G>> {
        self.config.validate()?;
        let count = self.agents.count;
        if self.rngs.len() != count {
            return Err(SimError::AgentCountMismatch { expected: count, got: self.rngs.len(), what: "agent RNGs" });
        }
        let cells = resolve(self.cells, count, "initial cells")?;
        let goals = resolve(self.goals, count, "goals")?;

        let mut agents = self.agents;
        let mut rngs = self.rngs;
        {
            let env = PlanningEnv { grid: &self.grid, planner: &self.planner, policy: &self.policy };
            for (i, (&cell, &goal)) in cells.iter().zip(&goals).enumerate() {
                let agent = AgentId(i as u32);
                let mut pawn = agents.pawn_mut(&mut rngs, agent)?;
                if cell.is_valid() {
                    tolerate_planning(agent, set_current(&mut pawn, cell, &env))?;
                }
                if goal.is_valid() {
                    tolerate_planning(agent, set_goal(&mut pawn, goal, &env))?;
                }
            }
        }

        tracing::info!(
            agents = count,
            cells = self.grid.cell_count(),
            edges = self.grid.edge_count(),
            "simulation built"
        );

        Ok(Sim {
            clock:     self.config.make_clock(),
            config:    self.config,
            grid:      self.grid,
            agents,
            rngs,
            planner:   self.planner,
            policy:    self.policy,
            scheduler: Default::default(),
        })
    }
}

/// Unreachable goals are not a build error; the pawn just stays halted.
fn tolerate_planning(agent: AgentId, placed: OccupancyResult<Replan>) -> SimResult<()> {
    match placed {
        Ok(_) => Ok(()),
        Err(OccupancyError::Planning(e)) => {
            tracing::warn!(%agent, error = %e, "initial plan failed; pawn halted");
            Ok(())
        }
        Err(source) => Err(SimError::Occupancy { agent, source }),
    }
}

fn resolve(v: Option<Vec<CellId>>, count: usize, what: &'static str) -> SimResult<Vec<CellId>> {
    match v {
        Some(v) if v.len() != count => Err(SimError::AgentCountMismatch { expected: count, got: v.len(), what }),
        Some(v) => Ok(v),
        None => Ok(vec![CellId::INVALID; count]),
    }
}

//! Random initial population: start cell, goal cell and speed per pawn.

use std::ops::Range;

use pg_agent::{AgentRngs, AgentStore, AgentStoreBuilder, Occupation};
use pg_core::{CellId, SimRng};
use pg_grid::WeightedGrid;

use crate::{SimError, SimResult};

/// Speeds drawn by the reference world.
pub const DEFAULT_SPEED_RANGE: Range<f64> = 0.7..0.9;

/// Redraws allowed per start/goal cell before seeding fails.
const MAX_CELL_DRAWS: usize = 64;

/// A freshly seeded population, ready for [`SimBuilder`][crate::SimBuilder].
pub struct Population {
    pub agents: AgentStore,
    pub rngs:   AgentRngs,
    pub starts: Vec<CellId>,
    pub goals:  Vec<CellId>,
}

/// Draw `count` pawns over `grid` from `seed`.
///
/// For each pawn, in order: goal x, goal y, start x, start y, speed.  A goal
/// or start that lands on a blocked cell is redrawn on the spot.  The same
/// seed and grid always produce the same population.  The pawns' own RNGs are
/// seeded from `seed` too.  Every pawn is a woodcutter.
pub fn seed_population(
    grid:        &WeightedGrid,
    count:       usize,
    seed:        u64,
    speed_range: Range<f64>,
) -> SimResult<Population> {
    if !(speed_range.start.is_finite() && speed_range.end.is_finite() && speed_range.start < speed_range.end) {
        return Err(SimError::Config(format!("empty or non-finite speed range {speed_range:?}")));
    }

    let mut rng = SimRng::new(seed);
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let (mut agents, rngs) = AgentStoreBuilder::new(count, seed)
        .occupation(Occupation::Woodcutter)
        .build();
    let mut starts = Vec::with_capacity(count);
    let mut goals = Vec::with_capacity(count);

    for i in 0..count {
        let goal = draw_open_cell(grid, &mut rng, w, h)?;
        let start = draw_open_cell(grid, &mut rng, w, h)?;
        agents.speed[i] = rng.gen_range(speed_range.clone());
        goals.push(goal);
        starts.push(start);
    }

    tracing::info!(count, seed, "population seeded");
    Ok(Population { agents, rngs, starts, goals })
}

fn draw_open_cell(grid: &WeightedGrid, rng: &mut SimRng, w: i32, h: i32) -> SimResult<CellId> {
    for _ in 0..MAX_CELL_DRAWS {
        let cell = grid
            .cell(rng.gen_range(0..w), rng.gen_range(0..h))
            .map_err(|e| SimError::Config(e.to_string()))?;
        if !grid.is_blocked(cell) {
            return Ok(cell);
        }
    }
    Err(SimError::Config(format!("no open cell in {MAX_CELL_DRAWS} draws")))
}

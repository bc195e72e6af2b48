//! pawns — demo world for the pawngrid simulation.
//!
//! Seeds 20 woodcutters on a 20 × 20 grid whose edges cost more going up than
//! going down, puts the granary in their way, and lets them wander between
//! random goals.  Every pawn walks to its goal, picks a fresh one on arrival,
//! and keeps going.
//!
//! ```text
//! cargo run -p pawns                     # defaults
//! cargo run -p pawns -- config.json      # SimConfig overrides
//! RUST_LOG=debug cargo run -p pawns      # every plan and transition
//! ```

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use pg_agent::{AgentStore, Occupation};
use pg_behavior::RandomGoal;
use pg_core::{AgentId, SimConfig, Tick};
use pg_grid::{BuildingRegistry, BuildingSpec, DijkstraPlanner, DirectionalWeights, WeightedGrid, connect_all};
use pg_mobility::{OccupancyError, TickReport};
use pg_sim::{DEFAULT_SPEED_RANGE, SimBuilder, SimObserver, StateCounts, seed_population};

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID_WIDTH:  u32   = 20;
const GRID_HEIGHT: u32   = 20;
const PAWN_COUNT:  usize = 20;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tallies movement and keeps the latest state counts for the summary.
#[derive(Default)]
struct WorldObserver {
    crossings: usize,
    arrivals:  usize,
    errors:    usize,
    snapshots: usize,
    counts:    StateCounts,
}

impl SimObserver for WorldObserver {
    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        self.crossings += report.crossings;
        self.arrivals += report.arrivals;
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, _grid: &WeightedGrid) {
        self.snapshots += 1;
        let counts = StateCounts::from_store(agents);
        if counts != self.counts {
            tracing::info!(%tick, %counts, "state counts changed");
        }
        self.counts = counts;
    }

    fn on_agent_error(&mut self, tick: Tick, agent: AgentId, error: &OccupancyError) {
        self.errors += 1;
        tracing::error!(%tick, %agent, %error, "pawn halted");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Config: defaults, or a JSON file of overrides.
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening {path}"))?;
            serde_json::from_reader::<_, SimConfig>(BufReader::new(file))
                .with_context(|| format!("parsing {path}"))?
        }
        None => SimConfig::default(),
    };
    config.validate()?;

    #[cfg(feature = "parallel")]
    if let Some(n) = config.num_threads {
        rayon::ThreadPoolBuilder::new().num_threads(n).build_global()?;
    }

    // 2. World.
    let mut grid = WeightedGrid::new(GRID_WIDTH, GRID_HEIGHT)?;
    connect_all(&mut grid, DirectionalWeights::default())?;
    tracing::info!(
        width = GRID_WIDTH,
        height = GRID_HEIGHT,
        edges = grid.edge_count(),
        "grid connected"
    );

    let mut buildings = BuildingRegistry::new();
    let granary = buildings.place(&mut grid, BuildingSpec::granary())?;
    tracing::info!(building = %granary, door = %grid.coord(buildings.door(granary)?)?, "granary placed");

    // 3. Pawns.
    let population = seed_population(&grid, PAWN_COUNT, config.seed, DEFAULT_SPEED_RANGE)?;
    let mut sim = SimBuilder::from_population(config, grid, population, DijkstraPlanner, RandomGoal).build()?;

    // 4. Run.
    let mut obs = WorldObserver::default();
    let t0 = Instant::now();
    sim.run(&mut obs);
    let wall = t0.elapsed();

    // 5. Summary.
    println!(
        "{} ticks ({:.1} s simulated) in {:.3} s",
        sim.current_tick().0,
        sim.clock.elapsed_total_secs,
        wall.as_secs_f64()
    );
    println!(
        "  crossings {}  arrivals {}  errors {}  snapshots {}",
        obs.crossings, obs.arrivals, obs.errors, obs.snapshots
    );
    println!("  {}", sim.state_counts());
    println!(
        "  woodcutters {}",
        sim.agents.with_occupation(Occupation::Woodcutter).count()
    );
    for (_, b) in buildings.iter() {
        let door = sim.grid.coord(b.door()).map(|c| c.to_string()).unwrap_or_else(|_| "-".into());
        println!("  {} door {}  stores: {}", b.spec.name, door, b.resources);
    }
    println!();

    println!("{:<6} {:<10} {:<10} {:<9} {:<16}", "Pawn", "Cell", "Goal", "State", "World");
    println!("{}", "-".repeat(54));
    for agent in sim.agents.agent_ids() {
        let i = agent.index();
        let cell = sim.grid.coord(sim.agents.occupying[i]).map(|c| c.to_string()).unwrap_or_else(|_| "-".into());
        let goal = sim.grid.coord(sim.agents.goal[i]).map(|c| c.to_string()).unwrap_or_else(|_| "-".into());
        let world = sim
            .agents
            .world_position(agent, &sim.grid)
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<6} {:<10} {:<10} {:<9} {:<16}",
            i,
            cell,
            goal,
            sim.agents.fsm[i].state().to_string(),
            world
        );
    }

    Ok(())
}

//! Integration tests for pg-sim.

use pg_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
use pg_core::{AgentId, SimConfig, Tick};
use pg_grid::{DirectionalWeights, WeightedGrid, connect_all};
use pg_mobility::{OccupancyError, TickReport};

use crate::SimObserver;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        tick_interval_secs:      0.25,
        total_ticks,
        seed:                    42,
        num_threads:             Some(1),
        snapshot_interval_ticks: 2,
        ..SimConfig::default()
    }
}

fn uniform(w: u32, h: u32) -> WeightedGrid {
    let mut g = WeightedGrid::new(w, h).unwrap();
    connect_all(&mut g, DirectionalWeights::uniform(1.0)).unwrap();
    g
}

fn store(n: usize, speed: f64) -> (AgentStore, AgentRngs) {
    AgentStoreBuilder::new(n, 42).speed(speed).build()
}

/// Records every hook call.
#[derive(Default)]
struct Recorder {
    starts:    Vec<Tick>,
    arrivals:  usize,
    crossings: usize,
    snapshots: Vec<Tick>,
    errors:    Vec<(Tick, AgentId)>,
    ended_at:  Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        self.arrivals += report.arrivals;
        self.crossings += report.crossings;
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore, grid: &WeightedGrid) {
        for a in agents.agent_ids() {
            if agents.occupying[a.index()].is_valid() {
                assert!(agents.world_position(a, grid).is_some());
            }
        }
        self.snapshots.push(tick);
    }

    fn on_agent_error(&mut self, tick: Tick, agent: AgentId, error: &OccupancyError) {
        assert!(matches!(error, OccupancyError::Planning(_)));
        self.errors.push((tick, agent));
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended_at = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use pg_behavior::StayPut;
    use pg_core::{AgentId, CellId, SimConfig, Vec2};
    use pg_grid::{DijkstraPlanner, WeightedGrid};
    use pg_mobility::OccupancyError;

    use super::*;
    use crate::{SimBuilder, SimError};

    #[test]
    fn builds_with_pawns_off_grid() {
        let (agents, rngs) = store(3, 1.0);
        let sim = SimBuilder::new(test_config(10), uniform(3, 3), agents, rngs, DijkstraPlanner, StayPut)
            .build()
            .unwrap();
        assert_eq!(sim.agents.count, 3);
        assert!(sim.agents.occupying.iter().all(|c| !c.is_valid()));
        assert_eq!(sim.current_tick(), Tick::ZERO);
    }

    #[test]
    fn cell_count_mismatch_errors() {
        let (agents, rngs) = store(3, 1.0);
        let result = SimBuilder::new(test_config(10), uniform(3, 3), agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(0); 2])
            .build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 3, got: 2, what: "initial cells" })
        ));
    }

    #[test]
    fn goal_count_mismatch_errors() {
        let (agents, rngs) = store(1, 1.0);
        let result = SimBuilder::new(test_config(10), uniform(3, 3), agents, rngs, DijkstraPlanner, StayPut)
            .goals(vec![])
            .build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { .. })));
    }

    #[test]
    fn rng_count_mismatch_errors() {
        let (agents, _) = store(2, 1.0);
        let (_, rngs) = store(3, 1.0);
        let result = SimBuilder::new(test_config(10), uniform(3, 3), agents, rngs, DijkstraPlanner, StayPut).build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { what: "agent RNGs", .. })));
    }

    #[test]
    fn bad_config_rejected() {
        let (agents, rngs) = store(1, 1.0);
        let config = SimConfig { tick_interval_secs: 0.0, ..test_config(10) };
        let result = SimBuilder::new(config, uniform(2, 2), agents, rngs, DijkstraPlanner, StayPut).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn start_outside_grid_rejected() {
        let (agents, rngs) = store(2, 1.0);
        let result = SimBuilder::new(test_config(10), uniform(2, 2), agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(0), CellId(9)])
            .build();
        match result {
            Err(SimError::Occupancy { agent, source }) => {
                assert_eq!(agent, AgentId(1));
                assert!(matches!(source, OccupancyError::InvalidCell { .. }));
            }
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn initial_placement_plans_first_hop() {
        let (agents, rngs) = store(1, 0.5);
        let sim = SimBuilder::new(test_config(10), uniform(3, 1), agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(0)])
            .goals(vec![CellId(2)])
            .build()
            .unwrap();
        assert_eq!(sim.agents.occupying[0], CellId(0));
        assert_eq!(sim.agents.next_cell[0], CellId(1));
        assert_eq!(sim.agents.velocity[0], Vec2::new(0.5, 0.0));
    }

    #[test]
    fn unreachable_goal_builds_halted() {
        let grid = WeightedGrid::new(2, 1).unwrap();
        let (agents, rngs) = store(1, 1.0);
        let sim = SimBuilder::new(test_config(10), grid, agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(0)])
            .goals(vec![CellId(1)])
            .build()
            .unwrap();
        assert!(!sim.agents.is_moving(AgentId(0)));
        assert_eq!(sim.agents.velocity[0], Vec2::ZERO);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use pg_behavior::{FixedGoal, StayPut};
    use pg_core::{CellId, ElapsedMode, Vec2};
    use pg_grid::DijkstraPlanner;

    use super::*;
    use crate::{NoopObserver, SimBuilder};

    #[test]
    fn run_visits_every_tick_and_snapshots_on_interval() {
        let (agents, rngs) = store(1, 1.0);
        let mut sim = SimBuilder::new(test_config(10), uniform(2, 2), agents, rngs, DijkstraPlanner, StayPut)
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs);
        assert_eq!(obs.starts.len(), 10);
        assert_eq!(obs.starts[0], Tick(0));
        assert_eq!(obs.snapshots, vec![Tick(0), Tick(2), Tick(4), Tick(6), Tick(8)]);
        assert_eq!(obs.ended_at, Some(Tick(10)));
        assert_eq!(sim.clock.elapsed_total_secs, 2.5);
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let (agents, rngs) = store(1, 1.0);
        let mut sim = SimBuilder::new(test_config(2), uniform(2, 2), agents, rngs, DijkstraPlanner, StayPut)
            .build()
            .unwrap();
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.current_tick(), Tick(5));
    }

    #[test]
    fn two_cell_walk_arrives_on_fifth_tick() {
        let mut grid = WeightedGrid::new(2, 1).unwrap();
        grid.connect(CellId(0), CellId(1), 1.0, false).unwrap();
        grid.connect(CellId(1), CellId(0), 1.0, false).unwrap();
        let (agents, rngs) = store(1, 1.0);
        let mut sim = SimBuilder::new(test_config(10), grid, agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(0)])
            .goals(vec![CellId(1)])
            .build()
            .unwrap();

        let mut obs = Recorder::default();
        sim.run_ticks(4, &mut obs);
        assert_eq!(obs.arrivals, 0);
        assert_eq!(sim.agents.position[0], Vec2::new(1.0, 0.0));

        let report = sim.step(0.25, &mut obs);
        assert_eq!(report.arrivals, 1);
        assert_eq!(sim.agents.occupying[0], CellId(1));
        assert_eq!(sim.agents.position[0], Vec2::ZERO);
        assert_eq!(sim.agents.velocity[0], Vec2::ZERO);
    }

    #[test]
    fn fixed_goal_keeps_pawn_shuttling() {
        let (agents, rngs) = store(1, 1.0);
        let mut sim = SimBuilder::new(test_config(40), uniform(2, 1), agents, rngs, DijkstraPlanner, FixedGoal(CellId(0)))
            .initial_cells(vec![CellId(0)])
            .goals(vec![CellId(1)])
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs);
        // Out to cell 1, then back to the fixed goal where it parks.
        assert_eq!(obs.arrivals, 2);
        assert_eq!(sim.agents.occupying[0], CellId(0));
        assert!(!sim.agents.is_moving(AgentId(0)));
    }

    #[test]
    fn blocked_route_reports_agent_error() {
        let (agents, rngs) = store(2, 1.0);
        let mut sim = SimBuilder::new(test_config(10), uniform(3, 2), agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(0), CellId(3)])
            .goals(vec![CellId(2), CellId(5)])
            .build()
            .unwrap();
        sim.grid.block_cell(CellId(2)).unwrap();

        let mut obs = Recorder::default();
        sim.run_ticks(5, &mut obs);
        assert_eq!(obs.errors, vec![(Tick(4), AgentId(0))]);
        assert_eq!(sim.agents.occupying[0], CellId(1));
        assert_eq!(sim.agents.velocity[0], Vec2::ZERO);
        assert_eq!(sim.agents.occupying[1], CellId(4));
        assert!(sim.agents.is_moving(AgentId(1)));
    }

    #[test]
    fn wall_clock_mode_accumulates_time() {
        let (agents, rngs) = store(1, 1.0);
        let config = SimConfig { elapsed_mode: ElapsedMode::WallClock, ..test_config(3) };
        let mut sim = SimBuilder::new(config, uniform(2, 2), agents, rngs, DijkstraPlanner, StayPut)
            .build()
            .unwrap();
        sim.run(&mut NoopObserver);
        assert_eq!(sim.current_tick(), Tick(3));
        assert!(sim.clock.elapsed_total_secs >= 0.25);
    }
}

// ── FSM integration ───────────────────────────────────────────────────────────

#[cfg(test)]
mod fsm_tests {
    use pg_behavior::{FsmError, PawnState, StayPut};
    use pg_core::{CellId, Vec2};
    use pg_grid::DijkstraPlanner;
    use pg_mobility::Replan;

    use super::*;
    use crate::{NoopObserver, SimBuilder, SimError};

    #[test]
    fn combat_calms_down_after_one_tick() {
        let (agents, rngs) = store(2, 1.0);
        let mut sim = SimBuilder::new(test_config(10), uniform(2, 2), agents, rngs, DijkstraPlanner, StayPut)
            .build()
            .unwrap();
        sim.change_state(AgentId(0), PawnState::Combat).unwrap();
        sim.change_state(AgentId(1), PawnState::Fleeing).unwrap();
        sim.run_ticks(1, &mut NoopObserver);
        assert_eq!(sim.agents.fsm[0].state(), PawnState::Idle);
        assert_eq!(sim.agents.fsm[1].state(), PawnState::Idle);
    }

    #[test]
    fn killed_pawn_stops_and_stays_dead() {
        let (agents, rngs) = store(2, 1.0);
        let mut sim = SimBuilder::new(test_config(10), uniform(4, 1), agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(0), CellId(0)])
            .goals(vec![CellId(3), CellId(3)])
            .build()
            .unwrap();
        sim.kill(AgentId(0)).unwrap();
        sim.run_ticks(3, &mut NoopObserver);

        assert_eq!(sim.agents.position[0], Vec2::ZERO);
        assert_ne!(sim.agents.position[1], Vec2::ZERO);

        let counts = sim.state_counts();
        assert_eq!((counts.alive, counts.walking, counts.dead), (1, 1, 1));

        let err = sim.change_state(AgentId(0), PawnState::Idle).unwrap_err();
        assert!(matches!(
            err,
            SimError::Fsm { source: FsmError::Terminal { to: PawnState::Idle }, .. }
        ));
    }

    #[test]
    fn change_state_to_dead_halts_like_kill() {
        let (agents, rngs) = store(1, 1.0);
        let mut sim = SimBuilder::new(test_config(10), uniform(4, 1), agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(0)])
            .goals(vec![CellId(3)])
            .build()
            .unwrap();
        sim.change_state(AgentId(0), PawnState::Dead).unwrap();
        assert_eq!(sim.agents.velocity[0], Vec2::ZERO);

        sim.run_ticks(60, &mut NoopObserver);
        assert_eq!(sim.agents.fsm[0].state(), PawnState::Dead);
        assert_eq!(sim.agents.occupying[0], CellId(0));
        assert_eq!(sim.agents.position[0], Vec2::ZERO);
    }

    #[test]
    fn killed_pawn_ignores_new_goals() {
        let (agents, rngs) = store(1, 1.0);
        let mut sim = SimBuilder::new(test_config(10), uniform(4, 1), agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(0)])
            .build()
            .unwrap();
        sim.kill(AgentId(0)).unwrap();
        assert_eq!(sim.set_goal(AgentId(0), CellId(2)).unwrap(), Replan::Halted);

        sim.run_ticks(60, &mut NoopObserver);
        assert_eq!(sim.agents.occupying[0], CellId(0));
        assert!(!sim.agents.is_moving(AgentId(0)));
    }

    #[test]
    fn unknown_agent_commands_fail() {
        let (agents, rngs) = store(1, 1.0);
        let mut sim = SimBuilder::new(test_config(10), uniform(2, 2), agents, rngs, DijkstraPlanner, StayPut)
            .build()
            .unwrap();
        assert!(matches!(sim.kill(AgentId(4)), Err(SimError::AgentNotFound(AgentId(4)))));
        assert!(matches!(sim.set_goal(AgentId(4), CellId(0)), Err(SimError::AgentNotFound(_))));
        assert!(matches!(sim.change_state(AgentId(4), PawnState::Idle), Err(SimError::AgentNotFound(_))));
    }

    #[test]
    fn set_goal_mid_run_replans() {
        let (agents, rngs) = store(1, 1.0);
        let mut sim = SimBuilder::new(test_config(10), uniform(3, 3), agents, rngs, DijkstraPlanner, StayPut)
            .initial_cells(vec![CellId(4)])
            .build()
            .unwrap();
        assert!(!sim.agents.is_moving(AgentId(0)));
        sim.set_goal(AgentId(0), CellId(7)).unwrap();
        assert_eq!(sim.agents.next_cell[0], CellId(7));
        assert_eq!(sim.agents.velocity[0], Vec2::new(0.0, 1.0));
    }
}

// ── Population, index, counts ─────────────────────────────────────────────────

#[cfg(test)]
mod population_tests {
    use pg_agent::Occupation;
    use pg_behavior::{FixedGoal, RandomGoal};
    use pg_core::{CellId, SimConfig};
    use pg_grid::{BuildingRegistry, BuildingSpec, DijkstraPlanner, DirectionalWeights, WeightedGrid, connect_all};

    use super::*;
    use crate::{
        DEFAULT_SPEED_RANGE, NoopObserver, SimBuilder, SimError, StateCounts, occupancy_index,
        seed_population,
    };

    fn reference_grid() -> WeightedGrid {
        let mut g = WeightedGrid::new(20, 20).unwrap();
        connect_all(&mut g, DirectionalWeights::default()).unwrap();
        g
    }

    #[test]
    fn same_seed_same_population() {
        let g = reference_grid();
        let a = seed_population(&g, 20, 20_231_104, DEFAULT_SPEED_RANGE).unwrap();
        let b = seed_population(&g, 20, 20_231_104, DEFAULT_SPEED_RANGE).unwrap();
        assert_eq!(a.starts, b.starts);
        assert_eq!(a.goals, b.goals);
        assert_eq!(a.agents.speed, b.agents.speed);
        assert!(a.agents.speed.iter().all(|s| (0.7..0.9).contains(s)));
        assert!(a.starts.iter().chain(&a.goals).all(|c| g.contains(*c)));
    }

    #[test]
    fn empty_speed_range_rejected() {
        let g = reference_grid();
        assert!(matches!(seed_population(&g, 3, 1, 0.9..0.9), Err(SimError::Config(_))));
    }

    #[test]
    fn reference_world_keeps_invariants() {
        let config = SimConfig { total_ticks: 400, ..SimConfig::default() };
        let grid = reference_grid();
        let pop = seed_population(&grid, 20, config.seed, DEFAULT_SPEED_RANGE).unwrap();
        let mut sim = SimBuilder::from_population(config, grid, pop, DijkstraPlanner, RandomGoal)
            .build()
            .unwrap();

        let mut obs = Recorder::default();
        sim.run(&mut obs);
        assert!(obs.errors.is_empty());
        assert!(obs.crossings > 0);
        for i in 0..sim.agents.count {
            let p = sim.agents.position[i];
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0, "pawn {i} left its cell: {p}");
            assert!(sim.grid.contains(sim.agents.occupying[i]));
            assert!(sim.grid.contains(sim.agents.goal[i]));
        }
        assert_eq!(StateCounts::from_store(&sim.agents).alive, 20);
    }

    #[test]
    fn identical_runs_are_identical() {
        let run = || {
            let config = SimConfig { total_ticks: 200, ..SimConfig::default() };
            let grid = reference_grid();
            let pop = seed_population(&grid, 10, 7, DEFAULT_SPEED_RANGE).unwrap();
            let mut sim = SimBuilder::from_population(config, grid, pop, DijkstraPlanner, RandomGoal)
                .build()
                .unwrap();
            sim.run(&mut NoopObserver);
            (sim.agents.occupying.clone(), sim.agents.goal.clone(), sim.agents.position.clone())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn occupancy_index_groups_by_cell() {
        let (mut agents, _) = store(4, 1.0);
        agents.occupying = vec![CellId(2), CellId::INVALID, CellId(2), CellId(0)];
        let index = occupancy_index(&agents);
        assert_eq!(index.len(), 2);
        assert_eq!(index[&CellId(2)], vec![AgentId(0), AgentId(2)]);
        assert_eq!(index[&CellId(0)], vec![AgentId(3)]);
    }

    #[test]
    fn fresh_store_counts_all_walking() {
        let (agents, _) = store(5, 1.0);
        let counts = StateCounts::from_store(&agents);
        assert_eq!((counts.alive, counts.walking, counts.dead, counts.idle), (5, 5, 0, 0));
    }

    #[test]
    fn seeded_pawns_are_woodcutters() {
        let g = reference_grid();
        let pop = seed_population(&g, 6, 3, DEFAULT_SPEED_RANGE).unwrap();
        assert!(pop.agents.occupation.iter().all(|o| *o == Occupation::Woodcutter));
        assert_eq!(pop.agents.with_occupation(Occupation::Woodcutter).count(), 6);
    }

    #[test]
    fn seeding_avoids_building_footprints() {
        let mut g = reference_grid();
        let mut buildings = BuildingRegistry::new();
        let granary = buildings.place(&mut g, BuildingSpec::granary()).unwrap();
        let footprint = buildings.get(granary).unwrap().cells().to_vec();

        let pop = seed_population(&g, 200, 11, DEFAULT_SPEED_RANGE).unwrap();
        for cell in pop.starts.iter().chain(&pop.goals) {
            assert!(!footprint.contains(cell), "seeded onto the granary at {cell}");
        }
    }

    #[test]
    fn fully_blocked_grid_cannot_be_seeded() {
        let mut g = WeightedGrid::new(2, 1).unwrap();
        connect_all(&mut g, DirectionalWeights::uniform(1.0)).unwrap();
        g.block_cell(CellId(0)).unwrap();
        g.block_cell(CellId(1)).unwrap();
        assert!(matches!(seed_population(&g, 1, 5, DEFAULT_SPEED_RANGE), Err(SimError::Config(_))));
    }

    #[test]
    fn pawn_walks_around_the_granary_to_its_door() {
        let mut grid = WeightedGrid::new(10, 12).unwrap();
        connect_all(&mut grid, DirectionalWeights::uniform(1.0)).unwrap();
        let mut buildings = BuildingRegistry::new();
        let granary = buildings.place(&mut grid, BuildingSpec::granary()).unwrap();
        let door = buildings.door(granary).unwrap();
        let start = grid.cell(6, 9).unwrap();

        let (agents, rngs) = store(1, 1.0);
        let mut sim = SimBuilder::new(test_config(400), grid, agents, rngs, DijkstraPlanner, FixedGoal(door))
            .initial_cells(vec![start])
            .goals(vec![door])
            .build()
            .unwrap();

        for _ in 0..400 {
            sim.run_ticks(1, &mut NoopObserver);
            let here = sim.agents.occupying[0];
            assert_eq!(buildings.building_at(here), None, "walked into the granary at {here}");
            if here == door && !sim.agents.is_moving(AgentId(0)) {
                return;
            }
        }
        panic!("pawn never reached the door");
    }
}

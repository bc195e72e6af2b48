//! `pg-sim` — tick loop orchestrator for the `pawngrid` simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   elapsed = clock.next_elapsed()        // fixed step or wall clock
//!   ① FSM update  — each pawn's active state runs its periodic step
//!   ② Integrate   — position += velocity × elapsed
//!   ③ Cross       — pawns past ±1 step into their next cell and re-plan
//!   ④ Observe     — on_tick_end; on_snapshot every N ticks
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`sim`]        | `Sim<P, G>` and the tick loop                        |
//! | [`builder`]    | `SimBuilder` (validation + initial placement)        |
//! | [`observer`]   | `SimObserver` hooks, `NoopObserver`                  |
//! | [`population`] | `seed_population`, `Population`                      |
//! | [`stats`]      | `StateCounts` — per-tag pawn counts for UI           |
//! | [`index`]      | `occupancy_index` — cell → pawns                     |
//! | [`error`]      | `SimError`, `SimResult<T>`                           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | FSM update and movement phases run on Rayon.           |
//! | `fx-hash`  | `occupancy_index` uses `FxHashMap`.                    |
//! | `serde`    | Serde derives on config and value types.               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pg_behavior::RandomGoal;
//! use pg_core::SimConfig;
//! use pg_grid::{DijkstraPlanner, DirectionalWeights, WeightedGrid, connect_all};
//! use pg_sim::{DEFAULT_SPEED_RANGE, NoopObserver, SimBuilder, seed_population};
//!
//! let config = SimConfig::default();
//! let mut grid = WeightedGrid::new(20, 20)?;
//! connect_all(&mut grid, DirectionalWeights::default())?;
//! let pop = seed_population(&grid, 20, config.seed, DEFAULT_SPEED_RANGE)?;
//! let mut sim = SimBuilder::from_population(config, grid, pop, DijkstraPlanner, RandomGoal).build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod index;
pub mod observer;
pub mod population;
pub mod sim;
pub mod stats;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use index::{CellIndex, occupancy_index};
pub use observer::{NoopObserver, SimObserver};
pub use population::{DEFAULT_SPEED_RANGE, Population, seed_population};
pub use sim::Sim;
pub use stats::StateCounts;

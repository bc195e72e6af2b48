//! `pg-grid` — weighted grid world and next-hop planning.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`grid`]     | `WeightedGrid`, `Direction`                               |
//! | [`planner`]  | `Planner` trait, `DijkstraPlanner`, `ShortestPaths`       |
//! | [`generate`] | `connect_all`, `DirectionalWeights`                       |
//! | [`building`] | `BuildingRegistry`, `BuildingSpec`, `Resources`           |
//! | [`error`]    | `GridError`, `GridResult<T>`                              |
//!
//! The grid is built and wired once at world initialisation and is read-only
//! for the rest of the run, so every tick shares it by plain `&` reference.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on weights and buildings.  |

pub mod building;
pub mod error;
pub mod generate;
pub mod grid;
pub mod planner;


pub use building::{Building, BuildingKind, BuildingRegistry, BuildingSpec, Resources};
pub use error::{GridError, GridResult};
pub use generate::{DirectionalWeights, connect_all};
pub use grid::{Direction, WeightedGrid};
pub use planner::{DijkstraPlanner, Planner, ShortestPaths};

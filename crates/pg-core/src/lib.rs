//! `pg-core` — foundational types for the `pawngrid` simulation.
//!
//! Every other `pg-*` crate depends on this one.  It has no `pg-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `CellId`, `BuildingId`                        |
//! | [`geo`]    | `Vec2` (continuous position / velocity), `CellCoord`     |
//! | [`time`]   | `Tick`, `SimClock`, `ElapsedMode`, `SimConfig`           |
//! | [`rng`]    | `AgentRng` (per-agent), `SimRng` (global)                |
//! | [`error`]  | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{CellCoord, Vec2};
pub use ids::{AgentId, BuildingId, CellId};
pub use rng::{AgentRng, SimRng};
pub use time::{ElapsedMode, SimClock, SimConfig, Tick};

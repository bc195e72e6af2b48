//! `pg-mobility` — cell occupancy and per-tick pawn movement.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`occupancy`] | `set_current`, `set_goal`, `PlanningEnv`, `Replan`         |
//! | [`scheduler`] | `MovementScheduler` (integrate + cross), `TickReport`      |
//! | [`error`]     | `OccupancyError`, `OccupancyResult<T>`                     |
//!
//! # Movement model
//!
//! A pawn holds a continuous offset in `[-1, 1]²` from the centre of the cell
//! it occupies and a constant velocity towards the centre of its next cell.
//! When the offset leaves the square the pawn steps into the next cell,
//! appears on the opposite edge, and the planner picks the following hop.
//! Reaching the goal cell halts and re-centres the pawn and hands an
//! `Arrived` event to its state machine.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Both scheduler phases run on Rayon.                     |

pub mod error;
pub mod occupancy;
pub mod scheduler;


pub use error::{OccupancyError, OccupancyResult};
pub use occupancy::{PlanningEnv, Replan, set_current, set_goal};
pub use scheduler::{MovementScheduler, TickReport};

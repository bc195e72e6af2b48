//! `pg-agent` — Structure-of-Arrays pawn storage.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`store`]   | `AgentStore` (SoA arrays), `AgentRngs` (per-pawn RNG)      |
//! | [`pawn`]    | `PawnMut` — disjoint mutable view of one pawn              |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)                  |
//! | [`traits`]  | `LifeTraits`, `AbilityTraits`, `Occupation`                |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Adds `AgentStore::par_pawns_mut` backed by Rayon.        |

pub mod builder;
pub mod pawn;
pub mod store;
pub mod traits;


pub use builder::{AgentStoreBuilder, DEFAULT_SPEED};
pub use pawn::PawnMut;
pub use store::{AgentRngs, AgentStore};
pub use traits::{AbilityTraits, LifeTraits, Occupation};

//! `pg-behavior` — the per-pawn hierarchical state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`state`]   | `PawnState`, `StateTag`, `StateTags`                          |
//! | [`machine`] | `PawnFsm`, `StateHandlers` dispatch table, `FsmContext`       |
//! | [`event`]   | `PawnEvent`, `Reaction`                                       |
//! | [`policy`]  | `GoalPolicy` trait, `FixedGoal`, `RandomGoal`, `StayPut`      |
//! | [`error`]   | `FsmError`, `FsmResult<T>`                                    |
//!
//! # State tree
//!
//! ```text
//! Alive ─┬─ Idle
//!        ├─ Working
//!        ├─ Walking      (initial)
//!        ├─ Fleeing
//!        └─ Combat
//! Dead                   (terminal)
//! ```
//!
//! The machine is a plain enum plus a static table of `fn` pointers per
//! state.  Handlers never hold a reference back to the pawn; everything they
//! need arrives in an [`FsmContext`] built by the caller for one call.
//!
//! `GoalPolicy` implementations are shared across workers, so they must be
//! `Send + Sync` and keep all per-pawn randomness in the `AgentRng` they are
//! handed.

pub mod error;
pub mod event;
pub mod machine;
pub mod policy;
pub mod state;


pub use error::{FsmError, FsmResult};
pub use event::{PawnEvent, Reaction};
pub use machine::{FsmContext, PawnFsm, StateHandlers, handlers};
pub use policy::{FixedGoal, GoalPolicy, RandomGoal, StayPut};
pub use state::{PawnState, StateTag, StateTags};

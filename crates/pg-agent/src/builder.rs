//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! ```rust
//! use pg_agent::AgentStoreBuilder;
//!
//! let (store, rngs) = AgentStoreBuilder::new(20, 20_231_104).speed(0.8).build();
//! assert_eq!(store.count, 20);
//! assert_eq!(rngs.len(), 20);
//! ```
//!
//! Every pawn starts off-grid (all relations unset) at rest, in `Walking`,
//! with zeroed traits.
//! Placement and goals are written afterwards through the occupancy
//! protocol.

use crate::{AgentRngs, AgentStore, Occupation};

/// Speed given to pawns when the builder is not told otherwise.
pub const DEFAULT_SPEED: f64 = 0.8;

pub struct AgentStoreBuilder {
    count:      usize,
    seed:       u64,
    speed:      f64,
    occupation: Occupation,
}

impl AgentStoreBuilder {
    /// Builder for `count` pawns using `seed` as the global RNG seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, speed: DEFAULT_SPEED, occupation: Occupation::default() }
    }

    /// Speed shared by every pawn; individual entries can be overwritten on
    /// `AgentStore::speed` after building.
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Job given to every pawn (default `Unemployed`).
    pub fn occupation(mut self, occupation: Occupation) -> Self {
        self.occupation = occupation;
        self
    }

    pub fn build(self) -> (AgentStore, AgentRngs) {
        let store = AgentStore::new(self.count, self.speed, self.occupation);
        let rngs = AgentRngs::new(self.count, self.seed);
        (store, rngs)
    }
}

//! Per-pawn trait data carried alongside the movement state.
//!
//! These are plain values: nothing in the tick loop reads or updates them.
//! They live in the SoA store so behaviours and observers built on top of the
//! simulation have somewhere to keep needs, abilities and jobs.

use std::fmt;

/// Needs, each on an open-ended scale where 0 means satisfied.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LifeTraits {
    pub hunger:  f32,
    pub thirst:  f32,
    pub cold:    f32,
    pub comfort: f32,
}

/// Physical abilities.  Walking speed is `AgentStore::speed`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AbilityTraits {
    pub strength: f32,
}

/// A pawn's job.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Occupation {
    #[default]
    Unemployed,
    Woodcutter,
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Occupation::Unemployed => "unemployed",
            Occupation::Woodcutter => "woodcutter",
        })
    }
}

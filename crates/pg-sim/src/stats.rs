//! Aggregate counters for UI display.

use std::fmt;

use pg_agent::AgentStore;
use pg_behavior::StateTag;

/// How many pawns carry each state tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub alive:   usize,
    pub idle:    usize,
    pub working: usize,
    pub walking: usize,
    pub fleeing: usize,
    pub combat:  usize,
    pub dead:    usize,
}

impl StateCounts {
    pub fn from_store(agents: &AgentStore) -> Self {
        let mut counts = StateCounts::default();
        for fsm in &agents.fsm {
            for tag in fsm.tags().iter() {
                *counts.slot(tag) += 1;
            }
        }
        counts
    }

    pub fn get(&self, tag: StateTag) -> usize {
        match tag {
            StateTag::Alive   => self.alive,
            StateTag::Idle    => self.idle,
            StateTag::Working => self.working,
            StateTag::Walking => self.walking,
            StateTag::Fleeing => self.fleeing,
            StateTag::Combat  => self.combat,
            StateTag::Dead    => self.dead,
        }
    }

    fn slot(&mut self, tag: StateTag) -> &mut usize {
        match tag {
            StateTag::Alive   => &mut self.alive,
            StateTag::Idle    => &mut self.idle,
            StateTag::Working => &mut self.working,
            StateTag::Walking => &mut self.walking,
            StateTag::Fleeing => &mut self.fleeing,
            StateTag::Combat  => &mut self.combat,
            StateTag::Dead    => &mut self.dead,
        }
    }
}

impl fmt::Display for StateCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alive {} (idle {}, working {}, walking {}, fleeing {}, combat {}), dead {}",
            self.alive, self.idle, self.working, self.walking, self.fleeing, self.combat, self.dead
        )
    }
}

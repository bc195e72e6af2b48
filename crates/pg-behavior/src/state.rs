//! FSM states and the per-pawn tag set.

use std::fmt;

/// Active leaf state of a pawn.
///
/// Every variant except `Dead` is a child of the composite `Alive` state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PawnState {
    Idle,
    Working,
    Walking,
    Fleeing,
    Combat,
    Dead,
}

impl PawnState {
    pub const ALL: [PawnState; 6] = [
        PawnState::Idle,
        PawnState::Working,
        PawnState::Walking,
        PawnState::Fleeing,
        PawnState::Combat,
        PawnState::Dead,
    ];

    /// `true` for every child of `Alive`.
    #[inline]
    pub fn is_alive(self) -> bool {
        self != PawnState::Dead
    }

    /// Tag set while this state is active.
    #[inline]
    pub fn tag(self) -> StateTag {
        match self {
            PawnState::Idle    => StateTag::Idle,
            PawnState::Working => StateTag::Working,
            PawnState::Walking => StateTag::Walking,
            PawnState::Fleeing => StateTag::Fleeing,
            PawnState::Combat  => StateTag::Combat,
            PawnState::Dead    => StateTag::Dead,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PawnState::Idle    => "idle",
            PawnState::Working => "working",
            PawnState::Walking => "walking",
            PawnState::Fleeing => "fleeing",
            PawnState::Combat  => "combat",
            PawnState::Dead    => "dead",
        }
    }
}

impl fmt::Display for PawnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Tags ──────────────────────────────────────────────────────────────────────

/// Marker a state sets on enter and clears on exit.  `Alive` belongs to the
/// composite state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum StateTag {
    Alive   = 0,
    Idle    = 1,
    Working = 2,
    Walking = 3,
    Fleeing = 4,
    Combat  = 5,
    Dead    = 6,
}

impl StateTag {
    pub const ALL: [StateTag; 7] = [
        StateTag::Alive,
        StateTag::Idle,
        StateTag::Working,
        StateTag::Walking,
        StateTag::Fleeing,
        StateTag::Combat,
        StateTag::Dead,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Bitset of [`StateTag`]s.  Inserting or removing twice is a no-op.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StateTags(u8);

impl StateTags {
    pub const EMPTY: StateTags = StateTags(0);

    #[inline]
    pub fn insert(&mut self, tag: StateTag) {
        self.0 |= tag.bit();
    }

    #[inline]
    pub fn remove(&mut self, tag: StateTag) {
        self.0 &= !tag.bit();
    }

    #[inline]
    pub fn contains(self, tag: StateTag) -> bool {
        self.0 & tag.bit() != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = StateTag> {
        StateTag::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

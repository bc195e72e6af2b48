//! Pawn storage: `AgentStore` (SoA data) and `AgentRngs` (per-pawn RNG).
//!
//! The RNGs live outside the store so a caller can hold `&AgentStore` for
//! reading while handing out `&mut AgentRng`s, and so the store can be
//! snapshotted for observers without touching RNG state.
//!
//! Relations (occupying / goal / next cell) are one `CellId` slot per pawn,
//! `CellId::INVALID` when unset.  A pawn therefore has at most one of each by
//! construction.

use pg_core::{AgentId, AgentRng, CellId, CoreError, CoreResult, Vec2};
use pg_behavior::PawnFsm;
use pg_grid::WeightedGrid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{AbilityTraits, LifeTraits, Occupation, PawnMut};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-pawn deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentRng> {
        self.inner.get_mut(agent.index())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every pawn.
///
/// Every `Vec` has exactly `count` elements and `AgentId` indexes all of
/// them.  Reads go straight to the fields; writes to the relations should go
/// through the occupancy protocol in `pg-mobility` so planning stays in sync.
pub struct AgentStore {
    /// Number of pawns.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Kinematics ────────────────────────────────────────────────────────
    /// Offset from the occupied cell's centre, each axis in `[-1, 1]`.
    pub position: Vec<Vec2>,

    /// Cells per second along each axis.
    pub velocity: Vec<Vec2>,

    /// Scalar applied to the unit step towards the next cell.
    pub speed: Vec<f64>,

    // ── Relations ─────────────────────────────────────────────────────────
    pub occupying: Vec<CellId>,
    pub goal:      Vec<CellId>,
    pub next_cell: Vec<CellId>,

    // ── Behaviour ─────────────────────────────────────────────────────────
    pub fsm: Vec<PawnFsm>,

    // ── Traits ────────────────────────────────────────────────────────────
    pub life:       Vec<LifeTraits>,
    pub ability:    Vec<AbilityTraits>,
    pub occupation: Vec<Occupation>,
}

impl AgentStore {
    pub(crate) fn new(count: usize, speed: f64, occupation: Occupation) -> Self {
        Self {
            count,
            position:   vec![Vec2::ZERO; count],
            velocity:   vec![Vec2::ZERO; count],
            speed:      vec![speed; count],
            occupying:  vec![CellId::INVALID; count],
            goal:       vec![CellId::INVALID; count],
            next_cell:  vec![CellId::INVALID; count],
            fsm:        vec![PawnFsm::new(); count],
            life:       vec![LifeTraits::default(); count],
            ability:    vec![AbilityTraits::default(); count],
            occupation: vec![occupation; count],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// All `AgentId`s in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.count
    }

    /// `true` if the pawn has somewhere to go next.
    #[inline]
    pub fn is_moving(&self, agent: AgentId) -> bool {
        self.next_cell.get(agent.index()).is_some_and(|c| c.is_valid())
    }

    /// Render-space position: occupied cell centre plus half the in-cell
    /// offset, so a pawn at the boundary draws halfway to its neighbour.
    ///
    /// `None` for unknown pawns or pawns not on the grid.
    pub fn world_position(&self, agent: AgentId, grid: &WeightedGrid) -> Option<Vec2> {
        let i = agent.index();
        let cell = *self.occupying.get(i)?;
        let centre = grid.center(cell).ok()?;
        Some(centre + self.position[i] * 0.5)
    }

    /// Pawns holding `occupation`, in ascending order.
    pub fn with_occupation(&self, occupation: Occupation) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(move |a| self.occupation[a.index()] == occupation)
    }

    // ── Mutable views ─────────────────────────────────────────────────────

    /// Exclusive view of one pawn.
    pub fn pawn_mut<'a>(&'a mut self, rngs: &'a mut AgentRngs, agent: AgentId) -> CoreResult<PawnMut<'a>> {
        let i = agent.index();
        if i >= self.count {
            return Err(CoreError::AgentNotFound(agent));
        }
        let rng = rngs.inner.get_mut(i).ok_or(CoreError::AgentNotFound(agent))?;
        Ok(PawnMut {
            id:        agent,
            position:  &mut self.position[i],
            velocity:  &mut self.velocity[i],
            speed:     self.speed[i],
            occupying: &mut self.occupying[i],
            goal:      &mut self.goal[i],
            next_cell: &mut self.next_cell[i],
            fsm:       &mut self.fsm[i],
            rng,
        })
    }

    /// Exclusive views of every pawn, in `AgentId` order.
    pub fn pawns_mut<'a>(&'a mut self, rngs: &'a mut AgentRngs) -> impl Iterator<Item = PawnMut<'a>> + 'a {
        debug_assert_eq!(rngs.len(), self.count);
        self.position
            .iter_mut()
            .zip(self.velocity.iter_mut())
            .zip(self.speed.iter())
            .zip(self.occupying.iter_mut())
            .zip(self.goal.iter_mut())
            .zip(self.next_cell.iter_mut())
            .zip(self.fsm.iter_mut())
            .zip(rngs.inner.iter_mut())
            .enumerate()
            .map(|(i, (((((((position, velocity), speed), occupying), goal), next_cell), fsm), rng))| {
                PawnMut {
                    id: AgentId(i as u32),
                    position,
                    velocity,
                    speed: *speed,
                    occupying,
                    goal,
                    next_cell,
                    fsm,
                    rng,
                }
            })
    }

    /// Parallel counterpart of [`pawns_mut`](Self::pawns_mut).  Each pawn is
    /// handed to exactly one worker.
    #[cfg(feature = "parallel")]
    pub fn par_pawns_mut<'a>(
        &'a mut self,
        rngs: &'a mut AgentRngs,
    ) -> impl IndexedParallelIterator<Item = PawnMut<'a>> + 'a {
        debug_assert_eq!(rngs.len(), self.count);
        self.position
            .par_iter_mut()
            .zip(self.velocity.par_iter_mut())
            .zip(self.speed.par_iter())
            .zip(self.occupying.par_iter_mut())
            .zip(self.goal.par_iter_mut())
            .zip(self.next_cell.par_iter_mut())
            .zip(self.fsm.par_iter_mut())
            .zip(rngs.inner.par_iter_mut())
            .enumerate()
            .map(|(i, (((((((position, velocity), speed), occupying), goal), next_cell), fsm), rng))| {
                PawnMut {
                    id: AgentId(i as u32),
                    position,
                    velocity,
                    speed: *speed,
                    occupying,
                    goal,
                    next_cell,
                    fsm,
                    rng,
                }
            })
    }
}

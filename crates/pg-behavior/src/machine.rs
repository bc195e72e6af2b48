//! The pawn state machine and its per-state dispatch table.

use pg_core::{AgentId, AgentRng, CellId};
use pg_grid::WeightedGrid;

use crate::{FsmError, FsmResult, GoalPolicy, PawnEvent, PawnState, Reaction, StateTag, StateTags};

// ── Context ───────────────────────────────────────────────────────────────────

/// Everything a handler may look at or draw from during one call.
///
/// Built fresh by the caller for each `update`/`react`; the machine keeps no
/// reference to it afterwards.
pub struct FsmContext<'a> {
    pub agent:   AgentId,
    /// The pawn's occupying cell at the time of the call.
    pub current: CellId,
    pub grid:    &'a WeightedGrid,
    pub policy:  &'a dyn GoalPolicy,
    pub rng:     &'a mut AgentRng,
}

// ── Dispatch table ────────────────────────────────────────────────────────────

/// Per-state behaviour, one static entry per [`PawnState`].
pub struct StateHandlers {
    pub enter:  fn(PawnState, &mut StateTags),
    pub exit:   fn(PawnState, &mut StateTags),
    /// Periodic step.  `Some(next)` requests a transition.
    pub update: fn(&mut FsmContext<'_>) -> Option<PawnState>,
    pub react:  fn(&PawnEvent, &mut FsmContext<'_>) -> Reaction,
}

static IDLE:    StateHandlers = StateHandlers { enter: mark, exit: unmark, update: stay, react: ignore };
static WORKING: StateHandlers = StateHandlers { enter: mark, exit: unmark, update: stay, react: ignore };
static WALKING: StateHandlers = StateHandlers { enter: mark, exit: unmark, update: stay, react: walking_react };
static FLEEING: StateHandlers = StateHandlers { enter: mark, exit: unmark, update: calm_down, react: ignore };
static COMBAT:  StateHandlers = StateHandlers { enter: mark, exit: unmark, update: calm_down, react: ignore };
static DEAD:    StateHandlers = StateHandlers { enter: mark, exit: unmark, update: stay, react: ignore };

/// Handler table entry for `state`.
pub fn handlers(state: PawnState) -> &'static StateHandlers {
    match state {
        PawnState::Idle    => &IDLE,
        PawnState::Working => &WORKING,
        PawnState::Walking => &WALKING,
        PawnState::Fleeing => &FLEEING,
        PawnState::Combat  => &COMBAT,
        PawnState::Dead    => &DEAD,
    }
}

fn mark(state: PawnState, tags: &mut StateTags) {
    tags.insert(state.tag());
}

fn unmark(state: PawnState, tags: &mut StateTags) {
    tags.remove(state.tag());
}

fn stay(_: &mut FsmContext<'_>) -> Option<PawnState> {
    None
}

fn calm_down(_: &mut FsmContext<'_>) -> Option<PawnState> {
    Some(PawnState::Idle)
}

fn ignore(_: &PawnEvent, _: &mut FsmContext<'_>) -> Reaction {
    Reaction::NONE
}

fn walking_react(event: &PawnEvent, ctx: &mut FsmContext<'_>) -> Reaction {
    match *event {
        PawnEvent::Arrived { cell } => Reaction {
            transition: Some(PawnState::Walking),
            goal:       Some(ctx.policy.next_goal(ctx.agent, cell, ctx.grid, ctx.rng)),
        },
    }
}

// ── PawnFsm ───────────────────────────────────────────────────────────────────

/// One pawn's machine: the active leaf state and the tags it has set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PawnFsm {
    state: PawnState,
    tags:  StateTags,
}

impl Default for PawnFsm {
    fn default() -> Self {
        Self::new()
    }
}

impl PawnFsm {
    /// Enter `Alive`, then its initial child `Walking`.
    pub fn new() -> Self {
        let mut tags = StateTags::EMPTY;
        tags.insert(StateTag::Alive);
        (handlers(PawnState::Walking).enter)(PawnState::Walking, &mut tags);
        Self { state: PawnState::Walking, tags }
    }

    #[inline]
    pub fn state(&self) -> PawnState {
        self.state
    }

    #[inline]
    pub fn tags(&self) -> StateTags {
        self.tags
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// Move to `next`.  The old leaf's `exit` (and `Alive`'s, when leaving
    /// it) runs before `next`'s `enter`; `next == state` exits and re-enters.
    pub fn change_to(&mut self, next: PawnState) -> FsmResult<()> {
        let from = self.state;
        if !from.is_alive() {
            return Err(FsmError::Terminal { to: next });
        }
        (handlers(from).exit)(from, &mut self.tags);
        if !next.is_alive() {
            self.tags.remove(StateTag::Alive);
        }
        (handlers(next).enter)(next, &mut self.tags);
        self.state = next;
        tracing::debug!(%from, to = %next, "state change");
        Ok(())
    }

    /// Run the active state's periodic step.
    pub fn update(&mut self, ctx: &mut FsmContext<'_>) -> FsmResult<()> {
        match (handlers(self.state).update)(ctx) {
            Some(next) => self.change_to(next),
            None => Ok(()),
        }
    }

    /// Deliver `event` to the active state and apply any transition it
    /// requests.  The returned reaction's `goal` is the caller's to apply.
    pub fn react(&mut self, event: &PawnEvent, ctx: &mut FsmContext<'_>) -> FsmResult<Reaction> {
        let reaction = (handlers(self.state).react)(event, ctx);
        if let Some(next) = reaction.transition {
            self.change_to(next)?;
        }
        Ok(reaction)
    }

    /// Leave `Alive` for `Dead`.  Killing a dead pawn does nothing.
    pub fn kill(&mut self) {
        if self.is_alive() {
            // Cannot fail: the source state is alive.
            let _ = self.change_to(PawnState::Dead);
        }
    }
}

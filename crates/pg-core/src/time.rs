//! Simulation time model and tick source.
//!
//! # Design
//!
//! The canonical time unit is the integer `Tick` — one pawn-behaviour step.
//! How much continuous time a tick represents is decided by the clock's
//! [`ElapsedMode`]:
//!
//! - `Fixed`: every tick lasts exactly `tick_interval_secs`.  Runs are
//!   bit-for-bit reproducible; tests always use this.
//! - `WallClock`: each tick lasts however long really passed since the
//!   previous one (the first tick falls back to `tick_interval_secs`).
//!
//! The movement code only ever sees the resulting `elapsed` seconds, so it is
//! agnostic to which mode produced them.

use std::fmt;
use std::time::Instant;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute, monotonically increasing behaviour-tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// `true` every `n`th tick, starting with tick 0.  `n == 0` never fires.
    #[inline]
    pub fn is_every(self, n: u64) -> bool {
        n > 0 && self.0 % n == 0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── ElapsedMode ───────────────────────────────────────────────────────────────

/// Where a tick's `elapsed` seconds come from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElapsedMode {
    #[default]
    Fixed,
    WallClock,
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The tick source: counts ticks and hands out each tick's elapsed time.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Nominal length of one tick in seconds.
    pub tick_interval_secs: f64,
    pub mode: ElapsedMode,
    /// The tick about to be processed.
    pub current_tick: Tick,
    /// Sum of every `elapsed` handed to [`advance`](Self::advance).
    pub elapsed_total_secs: f64,
    last_wall: Option<Instant>,
}

impl SimClock {
    pub fn new(tick_interval_secs: f64, mode: ElapsedMode) -> Self {
        Self {
            tick_interval_secs,
            mode,
            current_tick: Tick::ZERO,
            elapsed_total_secs: 0.0,
            last_wall: None,
        }
    }

    /// Elapsed seconds for the tick about to run.
    ///
    /// In `WallClock` mode this also restarts the wall-clock stopwatch.
    pub fn next_elapsed(&mut self) -> f64 {
        match self.mode {
            ElapsedMode::Fixed => self.tick_interval_secs,
            ElapsedMode::WallClock => {
                let now = Instant::now();
                let elapsed = match self.last_wall {
                    Some(prev) => now.duration_since(prev).as_secs_f64(),
                    None => self.tick_interval_secs,
                };
                self.last_wall = Some(now);
                elapsed
            }
        }
    }

    /// Close the current tick, recording how long it lasted.
    #[inline]
    pub fn advance(&mut self, elapsed: f64) {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.elapsed_total_secs += elapsed;
    }

    /// Nominal tick rate in Hz.
    #[inline]
    pub fn rate_hz(&self) -> f64 {
        1.0 / self.tick_interval_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_total_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// The defaults reproduce the reference world: pawn behaviour at 25 Hz
/// (every 4th tick of a 100 Hz base timer) and UI aggregation every second
/// behaviour tick (12.5 Hz).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seconds per behaviour tick in `Fixed` mode, and the first tick's
    /// length in `WallClock` mode.
    pub tick_interval_secs: f64,

    pub elapsed_mode: ElapsedMode,

    /// Ticks executed by `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always seeds the same population.
    pub seed: u64,

    /// Worker thread count for the `parallel` feature.  `None` uses all
    /// logical cores.
    pub num_threads: Option<usize>,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs:      0.04,
            elapsed_mode:            ElapsedMode::Fixed,
            total_ticks:             1_500,
            seed:                    20_231_104,
            num_threads:             None,
            snapshot_interval_ticks: 2,
        }
    }
}

impl SimConfig {
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_interval_secs, self.elapsed_mode)
    }

    /// Reject values the tick loop cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.tick_interval_secs.is_finite() || self.tick_interval_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "tick_interval_secs must be positive and finite, got {}",
                self.tick_interval_secs
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}

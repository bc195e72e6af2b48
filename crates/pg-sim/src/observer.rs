//! Simulation observer trait for progress reporting and UI aggregation.

use pg_agent::AgentStore;
use pg_core::{AgentId, Tick};
use pg_grid::WeightedGrid;
use pg_mobility::{OccupancyError, TickReport};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// Every method has a no-op default, so implementors override only what
/// they need.
///
/// # Example — arrivals counter
///
/// ```rust,ignore
/// struct Arrivals(usize);
///
/// impl SimObserver for Arrivals {
///     fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
///         self.0 += report.arrivals;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Start of a tick, before the FSM update.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// End of a tick, after both movement phases.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Every `config.snapshot_interval_ticks` ticks, after `on_tick_end`.
    ///
    /// This is the lower-frequency phase for rendering and aggregate
    /// counters; pair `agents` with `grid` to get world positions.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore, _grid: &WeightedGrid) {}

    /// Once per pawn whose movement failed this tick.
    fn on_agent_error(&mut self, _tick: Tick, _agent: AgentId, _error: &OccupancyError) {}

    /// Once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

//! Simulation observer trait for progress reporting and data collection.

use ev_core::{AgentId, Cell, Tick};

/// Counts reported at the end of every tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TickSummary {
    pub tick:              Tick,
    pub rescued_this_tick: usize,
    pub rescued_total:     usize,
    pub remaining:         usize,
    /// Rescuers in searching mode after the tick.
    pub searching:         usize,
    pub guiding:           usize,
}

/// Outcome of [`Warehouse::run`][crate::Warehouse::run] or
/// [`Warehouse::run_ticks`][crate::Warehouse::run_ticks].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RunSummary {
    /// Ticks completed in total.
    pub ticks:     Tick,
    pub rescued:   usize,
    pub remaining: usize,
}

/// Callbacks invoked by the warehouse tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         println!("{tick}: {} victims left", summary.remaining);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the shuffle.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per victim that left through an exit during `tick`.
    fn on_rescue(&mut self, _tick: Tick, _victim: AgentId, _exit: Cell) {}

    /// Called after every agent has acted.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called once when [`Warehouse::run`][crate::Warehouse::run] stops.
    fn on_sim_end(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

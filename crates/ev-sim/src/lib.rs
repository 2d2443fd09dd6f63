//! `ev-sim` — the warehouse orchestrator.
//!
//! # Tick loop
//!
//! ```text
//! for each tick:
//!   ① Shuffle  — reshuffle the activation order with the scenario RNG.
//!   ② Activate — run every agent's behavior once, strictly in that order.
//!                Later agents see everything earlier agents did this tick.
//!   ③ Report   — tick summary and rescues go to the observer; a snapshot of
//!                every agent still in the building is returned.
//! ```
//!
//! The shuffle stops low IDs from always moving first, which would bias
//! races for the same victim.  The RNG is seeded from the config, so a run is
//! reproducible snapshot for snapshot.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ev_core::ScenarioConfig;
//! use ev_sim::{NoopObserver, Warehouse};
//!
//! let mut warehouse = Warehouse::initialize(ScenarioConfig::default())?;
//! let snapshot = warehouse.step()?;
//! let summary = warehouse.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod render;
pub mod snapshot;
pub mod warehouse;

#[cfg(test)]
mod tests;

pub use builder::WarehouseBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RunSummary, SimObserver, TickSummary};
pub use render::{render_ascii, render_matrix};
pub use snapshot::AgentSnapshot;
pub use warehouse::{Activation, Warehouse};

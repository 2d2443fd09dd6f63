//! `ev-core` — foundational types for the warehouse evacuation simulator.
//!
//! This crate is a dependency of every other `ev-*` crate.  It intentionally
//! has no `ev-*` dependencies and minimal external ones (`rand`, `thiserror`,
//! and `serde` + `toml` for scenario loading).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`cell`]        | `Cell`, Chebyshev distance, king-move stepping        |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (the single seeded random source)            |
//! | [`config`]      | `ScenarioConfig`, `GuidePolicy`                       |
//! | [`error`]       | `EvError`, `EvResult`                                 |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use config::{GuidePolicy, ScenarioConfig};
pub use error::{EvError, EvResult};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::Tick;

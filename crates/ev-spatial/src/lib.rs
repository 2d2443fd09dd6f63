//! `ev-spatial` — the warehouse floor and its visit heat map.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Grid` (multi-agent cells, Moore neighborhoods), `Neighborhood` |
//! | [`heat`]    | `HeatMap`, inverse-frequency weighted choice                |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! The grid is bounded: neighborhoods never wrap around the edges, and any
//! placement outside `[0, width) × [0, height)` fails with
//! [`SpatialError::OutOfBounds`].

pub mod error;
pub mod grid;
pub mod heat;


pub use error::{SpatialError, SpatialResult};
pub use grid::{Grid, Neighborhood};
pub use heat::{HeatMap, inverse_heat_weight, least_visited_choice};

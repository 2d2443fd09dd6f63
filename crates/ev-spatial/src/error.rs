//! Spatial-subsystem error type.

use thiserror::Error;

use ev_core::{AgentId, Cell};

/// Errors produced by `ev-spatial`.
///
/// Both variants that can reach the orchestrator are structural: they point
/// at a misconfigured scenario or a logic defect, never at a transient
/// condition, so nothing retries them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpatialError {
    #[error("cell {cell} is outside the {width}x{height} grid")]
    OutOfBounds { cell: Cell, width: u32, height: u32 },

    #[error("no empty cell left in the {width}x{height} grid")]
    GridFull { width: u32, height: u32 },

    #[error("agent {0} is not on the grid")]
    AgentNotPlaced(AgentId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;

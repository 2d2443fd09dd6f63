use ev_core::{AgentId, EvError, Tick};
use ev_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Scenario(#[from] EvError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent {0} is not part of this warehouse")]
    UnknownAgent(AgentId),

    #[error("warehouse halted after tick {tick} failed")]
    Halted { tick: Tick },

    #[error("spatial error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;

//! Error types for ev-bridge.

use ev_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tick failed: {0}")]
    Sim(#[from] SimError),
}

pub type BridgeResult<T> = Result<T, BridgeError>;

//! Framework error type.
//!
//! Sub-crates define their own error enums (`SpatialError`, `SimError`, …)
//! and wrap `EvError` where configuration problems bubble up.

use thiserror::Error;

/// The top-level error type for `ev-core`.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ev-core`.
pub type EvResult<T> = Result<T, EvError>;

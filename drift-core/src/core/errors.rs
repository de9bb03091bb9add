//! Domain-specific error types
//!
//! Only startup can fail: an invalid configuration or an unavailable log
//! target. Steady-state conditions (full channel, empty channel) are not
//! errors and never appear here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors constructing a [`Symbol`](super::types::Symbol)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("symbol must not be empty")]
    Empty,

    #[error("symbol is {len} bytes, limit is {max}")]
    TooLong { len: usize, max: usize },
}

/// Errors opening or preparing the log sink
#[derive(Debug, Error)]
pub enum SinkError {
    /// The log target could not be opened (fatal to startup)
    #[error("failed to open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration values rejected by validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid symbol: {0}")]
    Symbol(#[from] SymbolError),

    #[error("initial price must be finite and positive, got {0}")]
    InitialPrice(f64),

    #[error("{field} must be positive")]
    ZeroSize { field: &'static str },

    #[error("channel capacity is fixed at {expected} in this build, got {actual}")]
    ChannelCapacity { expected: usize, actual: usize },

    #[error("update interval must be finite and non-negative, got {0}ms")]
    UpdateInterval(f64),

    #[error("strategy threshold must be finite and non-negative, got {0}")]
    Threshold(f64),
}

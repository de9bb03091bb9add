//! Core value types for the tick pipeline
//!
//! This module provides the fundamental building blocks:
//! - `Tick` / `Symbol`: Copy, heap-free market observations
//! - `Signal` / `TradeAction`: strategy output
//! - `PositionState`: Flat / Long / Short
//! - `RunFlag` and the worker lifecycle typestate
//! - Startup error types

pub mod errors;
pub mod lifecycle;
pub mod signal;
pub mod types;

// Re-export commonly used types
pub use errors::{ConfigError, SinkError, SymbolError};
pub use lifecycle::{RunFlag, WorkerInitializing, WorkerReport, WorkerRunning, WorkerStopped};
pub use signal::{Signal, TradeAction};
pub use types::{unix_timestamp, PositionState, Symbol, Tick};

//! Drift Core - Simulated Tick Pipeline
//!
//! A producer thread fabricates a random-walk price series and publishes
//! ticks through a lock-free single-producer/single-consumer ring; a consumer
//! thread drains the ring and drives a strategy that emits trade actions.
//!
//! ## Architecture
//! - **Wait-free SPSC ring** between exactly two threads (acquire/release cursors)
//! - **Zero heap allocations** for ticks: `Tick` is `Copy`, slots are pre-allocated
//! - **Drop on full**: the producer never blocks or retries
//! - **Poll + fixed backoff** on the consumer: no wakeups, no locks on the hot path
//! - **Generics** for compile-time strategy and sink dispatch
//!
//! ## Data Flow
//!
//! ```text
//!   TickProducer ──try_push──► SPSC ring ──try_pop──► SignalConsumer ──► Strategy
//!        │                                                  │
//!        └──────────────── "Price update" ──► LogSink ◄─────┘ "Momentum" / "BUY|SELL"
//! ```
//!
//! ## Modules
//! - `core`: Value types (Tick, Symbol, Signal, PositionState), run flags, errors
//! - `channel`: SPSC ring buffer
//! - `feed`: Random-walk tick producer
//! - `engine`: Consumer loop, `Strategy` trait, thread orchestration
//! - `sink`: Timestamped log line sinks
//! - `config`: Runtime configuration and compile-time constants
//! - `perf`: CPU pinning, lock-free counters
//! - `resilience`: Panic hook
//! - `utils`: Tracing initialization

pub mod channel;
pub mod config;
pub mod core;
pub mod engine;
pub mod feed;
pub mod perf;
pub mod resilience;
pub mod sink;
pub mod utils;

// Re-export core types
pub use crate::core::{PositionState, RunFlag, Signal, Symbol, Tick, TradeAction};

pub use crate::config::Config;
pub use crate::engine::{SignalConsumer, Strategy, SystemReport, TradingSystem};
pub use crate::feed::TickProducer;
pub use crate::sink::{FileSink, LogSink, MemorySink, NullSink};

// Re-export error types
pub use anyhow::{Error, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{PositionState, RunFlag, Signal, Symbol, Tick, TradeAction};

    pub use crate::channel::{spsc, tick_channel, TickReceiver, TickSender};
    pub use crate::config::{Config, CHANNEL_CAPACITY};
    pub use crate::engine::{PollOutcome, SignalConsumer, Strategy, SystemReport, TradingSystem};
    pub use crate::feed::{PublishOutcome, TickProducer};
    pub use crate::perf::{MetricsSnapshot, PipelineMetrics};
    pub use crate::sink::{FileSink, LogSink, MemorySink, NullSink};

    pub use crate::{Error, Result};
}

//! Pipeline engine
//!
//! - `generic`: the consumer loop, generic over the [`Strategy`] it drives
//! - `system`: orchestration of the producer and consumer threads

pub mod generic;
pub mod system;

pub use generic::{PollOutcome, SignalConsumer, Strategy};
pub use system::{RunningSystem, SystemReport, TradingSystem};

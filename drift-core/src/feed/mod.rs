//! Synthetic market data feed
//!
//! The feed thread generates a symmetric random walk and publishes each point
//! into the tick channel. Publishing never blocks: when the channel is full
//! the tick is dropped and the walk continues.

pub mod producer;

pub use producer::{PublishOutcome, TickProducer};

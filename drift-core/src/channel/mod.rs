//! Bounded channel between the feed thread and the strategy thread
//!
//! The pipeline carries [`Tick`]s through a [`spsc`] ring whose slot count
//! is fixed at compile time by [`CHANNEL_CAPACITY`].

pub mod spsc;

use crate::config::CHANNEL_CAPACITY;
use crate::core::Tick;

pub use spsc::{channel, RingReceiver, RingSender};

/// Producer half used by the trading system
pub type TickSender = RingSender<Tick, CHANNEL_CAPACITY>;

/// Consumer half used by the trading system
pub type TickReceiver = RingReceiver<Tick, CHANNEL_CAPACITY>;

/// Create the pipeline's tick channel
pub fn tick_channel() -> (TickSender, TickReceiver) {
    spsc::channel()
}

//! Centralized constants for the tick pipeline
//!
//! Values that shape memory layout are compile-time constants and can be
//! switched with Cargo features. Everything else is a default for the
//! runtime [`Config`](super::Config).

use std::time::Duration;

// ===== CHANNEL =====

/// Slot count of the tick ring (one slot stays unused)
/// Default: 100 slots
#[cfg(not(feature = "channel-1024"))]
pub const CHANNEL_CAPACITY: usize = 100;
#[cfg(feature = "channel-1024")]
pub const CHANNEL_CAPACITY: usize = 1024;

// ===== CONSUMER POLLING =====

/// Sleep after observing an empty channel
pub const CONSUMER_BACKOFF: Duration = Duration::from_micros(500);

// ===== RUNTIME DEFAULTS =====

pub const DEFAULT_SYMBOL: &str = "BTCUSD";
pub const DEFAULT_INITIAL_PRICE: f64 = 100.0;
pub const DEFAULT_PRICE_HISTORY_SIZE: usize = 100;

/// ~200 Hz
pub const DEFAULT_UPDATE_INTERVAL_MS: f64 = 5.0;

pub const DEFAULT_STRATEGY_WINDOW: usize = 20;

/// Fractional return (0.5%)
pub const DEFAULT_STRATEGY_THRESHOLD: f64 = 0.005;

pub const DEFAULT_LOG_FILE: &str = "hft_log.txt";
pub const DEFAULT_RUN_DURATION_SECS: u64 = 90;

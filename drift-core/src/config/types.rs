use super::constants::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Immutable startup configuration
///
/// Built once, validated, then shared by `Arc` between the feed, the
/// strategy thread, the sink and the orchestrator. Missing fields in a JSON
/// file fall back to the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Instrument traded by both threads
    pub symbol: String,

    /// Starting point of the random walk
    pub initial_price: f64,

    /// Bounded price history kept by the feed
    pub price_history_size: usize,

    /// Ring slot count; must match the compile-time `CHANNEL_CAPACITY`
    pub channel_capacity: usize,

    /// Feed cadence in milliseconds
    pub update_interval_ms: f64,

    /// Sliding window length (W)
    pub strategy_window: usize,

    /// Momentum threshold as a fractional return (T)
    pub strategy_threshold: f64,

    /// Log sink target
    pub log_file: PathBuf,

    /// Mirror sink lines to stdout
    pub echo_stdout: bool,

    /// Wall-clock run time before shutdown
    pub run_duration_secs: u64,

    /// Fixed RNG seed for reproducible random walks
    pub seed: Option<u64>,

    /// CPU core for the feed thread
    pub producer_core: Option<usize>,

    /// CPU core for the strategy thread
    pub consumer_core: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            initial_price: DEFAULT_INITIAL_PRICE,
            price_history_size: DEFAULT_PRICE_HISTORY_SIZE,
            channel_capacity: CHANNEL_CAPACITY,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            strategy_window: DEFAULT_STRATEGY_WINDOW,
            strategy_threshold: DEFAULT_STRATEGY_THRESHOLD,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            echo_stdout: true,
            run_duration_secs: DEFAULT_RUN_DURATION_SECS,
            seed: None,
            producer_core: None,
            consumer_core: None,
        }
    }
}

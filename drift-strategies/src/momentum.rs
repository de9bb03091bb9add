//! Windowed Momentum Strategy
//!
//! Keeps the last `W` prices and, once the window is full, measures the
//! fractional return across it:
//!
//! ```text
//!   momentum = (newest - oldest) / oldest
//! ```
//!
//! ## Position State Machine
//!
//! ```text
//!              momentum > +T                momentum < -T
//!     FLAT ─────────────────► LONG    FLAT ─────────────────► SHORT
//!
//!     LONG ──── momentum < -T ───► SHORT ──── momentum > +T ───► LONG
//! ```
//!
//! A crossing in the direction already held emits nothing, so a persistent
//! trend produces one trade, not one per tick. Readings inside `[-T, +T]`
//! never trade.
//!
//! ## Zero Base Price
//!
//! If the oldest price in the window is exactly zero (or the return is not
//! finite) the reading is skipped: no momentum line, no trade. The window
//! still advances, so the next tick is evaluated normally.

use drift_core::config::Config;
use drift_core::core::{PositionState, Signal, Tick, TradeAction};
use drift_core::engine::Strategy;
use std::collections::VecDeque;

/// Momentum strategy with a sliding price window
#[derive(Debug, Clone)]
pub struct Momentum {
    window: VecDeque<f64>,
    window_size: usize,
    threshold: f64,
    position: PositionState,
    skipped_readings: u64,
}

impl Momentum {
    /// Create a strategy with window `W = window_size` and threshold `T`
    ///
    /// A zero window size is treated as 1.
    pub fn new(window_size: usize, threshold: f64) -> Self {
        let window_size = window_size.max(1);
        Self {
            window: VecDeque::with_capacity(window_size + 1),
            window_size,
            threshold,
            position: PositionState::Flat,
            skipped_readings: 0,
        }
    }

    /// Window and threshold from the runtime configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.strategy_window, config.strategy_threshold)
    }

    /// Append a price and evaluate the window
    ///
    /// Returns `None` until the window holds exactly `W` prices, and for
    /// skipped zero-base readings.
    pub fn update(&mut self, price: f64) -> Option<Signal> {
        self.window.push_back(price);
        if self.window.len() > self.window_size {
            self.window.pop_front();
        }

        if self.window.len() != self.window_size {
            return None;
        }

        let (oldest, newest) = (*self.window.front()?, *self.window.back()?);
        let momentum = match window_return(oldest, newest) {
            Some(momentum) => momentum,
            None => {
                self.skipped_readings += 1;
                tracing::warn!(
                    oldest,
                    newest,
                    skipped = self.skipped_readings,
                    "Momentum skipped: zero or non-finite base price"
                );
                return None;
            }
        };

        let trade = decide(self.position, momentum, self.threshold);
        if let Some(action) = trade {
            self.position = action.resulting_position();
        }

        Some(Signal { momentum, trade })
    }

    /// True once the window holds `W` prices
    pub fn is_warm(&self) -> bool {
        self.window.len() == self.window_size
    }

    /// Prices in the window, oldest first
    pub fn window(&self) -> &VecDeque<f64> {
        &self.window
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Readings dropped because of a zero or non-finite base
    pub fn skipped_readings(&self) -> u64 {
        self.skipped_readings
    }
}

/// Fractional return from `oldest` to `newest`, `None` when undefined
#[inline(always)]
pub fn window_return(oldest: f64, newest: f64) -> Option<f64> {
    if oldest == 0.0 {
        return None;
    }
    let momentum = (newest - oldest) / oldest;
    momentum.is_finite().then_some(momentum)
}

/// Position transition for one momentum reading
///
/// Re-entry in the direction already held is suppressed.
#[inline(always)]
pub fn decide(position: PositionState, momentum: f64, threshold: f64) -> Option<TradeAction> {
    if momentum > threshold && position != PositionState::Long {
        Some(TradeAction::Buy)
    } else if momentum < -threshold && position != PositionState::Short {
        Some(TradeAction::Sell)
    } else {
        None
    }
}

impl Strategy for Momentum {
    #[inline]
    fn on_tick(&mut self, tick: &Tick) -> Option<Signal> {
        self.update(tick.price)
    }

    fn position(&self) -> PositionState {
        self.position
    }

    fn name(&self) -> &'static str {
        "Momentum"
    }

    fn reset(&mut self) {
        self.window.clear();
        self.position = PositionState::Flat;
        self.skipped_readings = 0;
    }
}

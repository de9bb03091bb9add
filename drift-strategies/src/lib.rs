//! Drift Strategies - Tick-Driven Signal Strategies
//!
//! Strategies implement [`drift_core::engine::Strategy`] and run on the
//! consumer thread, one call per delivered tick.
//!
//! ## Available Strategies
//!
//! ### [`Momentum`] - Sliding-Window Momentum
//!
//! Tracks the last `W` prices and trades on the fractional return across the
//! window. Goes Long when the return exceeds `+T`, Short when it falls below
//! `-T`, flipping directly between the two and never re-entering the side
//! already held.
//!
//! ## Usage Example
//!
//! ```rust
//! use drift_strategies::Momentum;
//! use drift_core::core::{PositionState, TradeAction};
//! use drift_core::engine::Strategy;
//!
//! let mut strategy = Momentum::new(3, 0.01);
//! assert!(strategy.update(100.0).is_none());
//! assert!(strategy.update(101.0).is_none());
//!
//! let signal = strategy.update(102.0).unwrap();
//! assert_eq!(signal.trade, Some(TradeAction::Buy));
//! assert_eq!(strategy.position(), PositionState::Long);
//! ```
//!
//! ## Integration with drift-core
//!
//! ```rust,ignore
//! let strategy = Momentum::from_config(&config);
//! let system = TradingSystem::new(config, strategy, sink)?;
//! ```

pub mod momentum;
pub mod test_helpers;

// Re-export strategies for convenience
pub use momentum::Momentum;

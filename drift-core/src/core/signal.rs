//! Strategy output: momentum readings and trade actions
//!
//! A signal is emitted for every tick on which the strategy's window is full.
//! It always carries the momentum reading; it carries a trade only when the
//! reading crossed the threshold against the current position.

use super::types::PositionState;
use std::fmt;

/// Trade action emitted on a threshold crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TradeAction {
    Buy = 0,
    Sell = 1,
}

impl TradeAction {
    /// Position held after this action executes
    #[inline(always)]
    pub const fn resulting_position(self) -> PositionState {
        match self {
            TradeAction::Buy => PositionState::Long,
            TradeAction::Sell => PositionState::Short,
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

/// Result of evaluating one tick with a full window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    /// Fractional return across the window
    pub momentum: f64,
    /// Trade to emit, if the reading crossed the threshold
    pub trade: Option<TradeAction>,
}

impl Signal {
    /// A reading with no trade attached
    #[inline(always)]
    pub const fn reading(momentum: f64) -> Self {
        Self {
            momentum,
            trade: None,
        }
    }

    /// A reading that triggers a trade
    #[inline(always)]
    pub const fn with_trade(momentum: f64, action: TradeAction) -> Self {
        Self {
            momentum,
            trade: Some(action),
        }
    }

    /// Check if the signal requires a trade line
    #[inline(always)]
    pub const fn requires_action(&self) -> bool {
        self.trade.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        assert_eq!(TradeAction::Buy.to_string(), "BUY");
        assert_eq!(TradeAction::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_resulting_position() {
        assert_eq!(TradeAction::Buy.resulting_position(), PositionState::Long);
        assert_eq!(TradeAction::Sell.resulting_position(), PositionState::Short);
    }

    #[test]
    fn test_signal_constructors() {
        let reading = Signal::reading(0.001);
        assert!(!reading.requires_action());

        let buy = Signal::with_trade(0.02, TradeAction::Buy);
        assert!(buy.requires_action());
        assert_eq!(buy.trade, Some(TradeAction::Buy));
    }
}

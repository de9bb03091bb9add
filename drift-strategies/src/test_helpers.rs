//! Test helpers for feeding strategies

#[cfg(test)]
use drift_core::core::{Symbol, Tick};

/// `n` prices starting at `start`, increasing by `step`
#[cfg(test)]
pub fn ramp(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

/// A BTCUSD tick at `price`
#[cfg(test)]
pub fn tick(price: f64) -> Tick {
    let symbol = Symbol::new("BTCUSD").expect("valid symbol");
    Tick::new(symbol, price, 1_700_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp() {
        assert_eq!(ramp(100.0, 1.0, 3), vec![100.0, 101.0, 102.0]);
        assert!(ramp(1.0, 1.0, 0).is_empty());
    }
}

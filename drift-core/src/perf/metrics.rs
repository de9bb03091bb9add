//! Lock-Free Pipeline Counters
//!
//! Cache-aligned atomic counters shared by the feed and strategy threads.
//! All counters use relaxed ordering: they are statistics, never used to
//! synchronize access to ticks.

use std::sync::atomic::{AtomicU64, Ordering};

/// Cache-aligned pipeline counters
///
/// Producer-side and consumer-side counters live on different cache lines so
/// the two threads do not false-share.
#[repr(C, align(64))]
pub struct PipelineMetrics {
    /// Ticks accepted by the channel
    pub ticks_published: AtomicU64,

    /// Ticks dropped because the channel was full
    pub ticks_dropped: AtomicU64,

    /// Padding to next cache line
    _padding1: [u8; 48],

    /// Ticks popped and handed to the strategy
    pub ticks_consumed: AtomicU64,

    /// Ticks popped but ignored (symbol mismatch)
    pub ticks_skipped: AtomicU64,

    /// Polls that found the channel empty
    pub empty_polls: AtomicU64,

    /// Momentum readings logged
    pub momentum_readings: AtomicU64,

    /// Trade actions emitted
    pub trades_emitted: AtomicU64,

    /// Padding to next cache line
    _padding2: [u8; 24],
}

impl PipelineMetrics {
    /// Create new metrics with all counters at zero
    pub const fn new() -> Self {
        Self {
            ticks_published: AtomicU64::new(0),
            ticks_dropped: AtomicU64::new(0),
            _padding1: [0; 48],
            ticks_consumed: AtomicU64::new(0),
            ticks_skipped: AtomicU64::new(0),
            empty_polls: AtomicU64::new(0),
            momentum_readings: AtomicU64::new(0),
            trades_emitted: AtomicU64::new(0),
            _padding2: [0; 24],
        }
    }

    #[inline(always)]
    pub fn inc_published(&self) {
        self.ticks_published.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_dropped(&self) {
        self.ticks_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_consumed(&self) {
        self.ticks_consumed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_skipped(&self) {
        self.ticks_skipped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_empty_polls(&self) {
        self.empty_polls.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_momentum(&self) {
        self.momentum_readings.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_trades(&self) {
        self.trades_emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            ticks_published: self.ticks_published.load(Ordering::Relaxed),
            ticks_dropped: self.ticks_dropped.load(Ordering::Relaxed),
            ticks_consumed: self.ticks_consumed.load(Ordering::Relaxed),
            ticks_skipped: self.ticks_skipped.load(Ordering::Relaxed),
            empty_polls: self.empty_polls.load(Ordering::Relaxed),
            momentum_readings: self.momentum_readings.load(Ordering::Relaxed),
            trades_emitted: self.trades_emitted.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.ticks_published.store(0, Ordering::Relaxed);
        self.ticks_dropped.store(0, Ordering::Relaxed);
        self.ticks_consumed.store(0, Ordering::Relaxed);
        self.ticks_skipped.store(0, Ordering::Relaxed);
        self.empty_polls.store(0, Ordering::Relaxed);
        self.momentum_readings.store(0, Ordering::Relaxed);
        self.trades_emitted.store(0, Ordering::Relaxed);
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of counters at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub ticks_published: u64,
    pub ticks_dropped: u64,
    pub ticks_consumed: u64,
    pub ticks_skipped: u64,
    pub empty_polls: u64,
    pub momentum_readings: u64,
    pub trades_emitted: u64,
}

impl MetricsSnapshot {
    /// Ticks the feed generated, delivered or not
    pub fn ticks_generated(&self) -> u64 {
        self.ticks_published + self.ticks_dropped
    }

    /// Fraction of generated ticks lost to a full channel
    pub fn drop_rate(&self) -> f64 {
        let generated = self.ticks_generated();
        if generated > 0 {
            self.ticks_dropped as f64 / generated as f64
        } else {
            0.0
        }
    }

    /// Trades per momentum reading
    pub fn trade_rate(&self) -> f64 {
        if self.momentum_readings > 0 {
            self.trades_emitted as f64 / self.momentum_readings as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_metrics_alignment() {
        assert_eq!(std::mem::align_of::<PipelineMetrics>(), 64);
        assert_eq!(std::mem::size_of::<PipelineMetrics>(), 128);
    }

    #[test]
    fn test_counters_and_snapshot() {
        let metrics = PipelineMetrics::new();

        for _ in 0..9 {
            metrics.inc_published();
        }
        metrics.inc_dropped();
        metrics.inc_consumed();
        metrics.inc_momentum();
        metrics.inc_momentum();
        metrics.inc_trades();

        let snap = metrics.snapshot();
        assert_eq!(snap.ticks_generated(), 10);
        assert_relative_eq!(snap.drop_rate(), 0.1);
        assert_relative_eq!(snap.trade_rate(), 0.5);

        metrics.reset();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_rates_on_empty_snapshot() {
        let snap = MetricsSnapshot::default();
        assert_eq!(snap.drop_rate(), 0.0);
        assert_eq!(snap.trade_rate(), 0.0);
    }
}

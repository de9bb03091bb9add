//! Signal Consumer - Generic Over the Strategy
//!
//! The consumer drains the tick channel on its own thread and hands every
//! matching tick to a [`Strategy`]. Strategy dispatch is resolved at compile
//! time (`SignalConsumer<S, K, N>` is monomorphized per strategy and sink).
//!
//! ## Poll Pipeline
//!
//! ```text
//!                         poll_once()
//!                              │
//!                              ▼
//!                     ┌─────────────────┐
//!                     │   try_pop()     │
//!                     └─────────────────┘
//!                       │      │      │
//!                 None  │      │      │ Some(tick), symbol matches
//!               ┌───────┘      │      └────────────┐
//!               ▼              │ other symbol       ▼
//!        ┌────────────┐        ▼           ┌─────────────────┐
//!        │ Empty:     │  ┌──────────┐      │ Strategy::      │
//!        │ sleep 500µs│  │ Skipped  │      │ on_tick()       │
//!        └────────────┘  └──────────┘      └─────────────────┘
//!                                                   │ Some(signal)
//!                                                   ▼
//!                                      "Momentum for <sym>: <m>"
//!                                                   │ signal.trade
//!                                                   ▼
//!                                      "<BUY|SELL> <sym> at <price>"
//! ```
//!
//! The consumer is the only reader of the channel, so ticks reach the
//! strategy in publication order and never twice.

use crate::channel::RingReceiver;
use crate::config::{Config, CHANNEL_CAPACITY, CONSUMER_BACKOFF};
use crate::core::{
    ConfigError, PositionState, RunFlag, Signal, Symbol, Tick, WorkerInitializing, WorkerReport,
};
use crate::perf::PipelineMetrics;
use crate::sink::LogSink;
use std::sync::Arc;
use std::time::Duration;

/// Strategy trait - implemented by zero-dispatch strategy types
///
/// Called once per delivered tick on the consumer thread.
pub trait Strategy: Send {
    /// Feed one tick; return a signal once the strategy has a reading
    fn on_tick(&mut self, tick: &Tick) -> Option<Signal>;

    /// Current directional stance
    fn position(&self) -> PositionState;

    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Reset strategy state
    fn reset(&mut self) {}
}

/// Result of one consumer poll
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PollOutcome {
    /// Channel was empty
    Empty,
    /// Tick for a different symbol, ignored
    Skipped,
    /// Tick handed to the strategy, with the strategy's signal if any
    Processed(Option<Signal>),
}

/// Consumer side of the pipeline
pub struct SignalConsumer<S: Strategy, K: LogSink + ?Sized, const N: usize = CHANNEL_CAPACITY> {
    symbol: Symbol,
    receiver: RingReceiver<Tick, N>,
    strategy: S,
    sink: Arc<K>,
    metrics: Arc<PipelineMetrics>,
    backoff: Duration,
}

impl<S: Strategy, K: LogSink + ?Sized, const N: usize> SignalConsumer<S, K, N> {
    pub fn new(
        config: &Config,
        receiver: RingReceiver<Tick, N>,
        strategy: S,
        sink: Arc<K>,
        metrics: Arc<PipelineMetrics>,
    ) -> Result<Self, ConfigError> {
        tracing::info!("Initializing consumer with strategy {}", strategy.name());

        Ok(Self {
            symbol: config.symbol()?,
            receiver,
            strategy,
            sink,
            metrics,
            backoff: CONSUMER_BACKOFF,
        })
    }

    /// Try to take one tick from the channel and process it
    #[inline]
    pub fn poll_once(&mut self) -> PollOutcome {
        match self.receiver.try_pop() {
            None => {
                self.metrics.inc_empty_polls();
                PollOutcome::Empty
            }
            Some(tick) if tick.symbol != self.symbol => {
                self.metrics.inc_skipped();
                PollOutcome::Skipped
            }
            Some(tick) => PollOutcome::Processed(self.process_tick(&tick)),
        }
    }

    /// Feed one tick to the strategy and log what it produced
    pub fn process_tick(&mut self, tick: &Tick) -> Option<Signal> {
        self.metrics.inc_consumed();

        let signal = self.strategy.on_tick(tick)?;

        self.metrics.inc_momentum();
        self.sink.log(&format!(
            "Momentum for {}: {:.4}",
            self.symbol, signal.momentum
        ));

        if let Some(action) = signal.trade {
            self.metrics.inc_trades();
            self.sink
                .log(&format!("{} {} at {:.2}", action, self.symbol, tick.price));
            tracing::debug!(
                "{} {} at {:.2} (momentum {:.4}, now {})",
                action,
                self.symbol,
                tick.price,
                signal.momentum,
                self.strategy.position()
            );
        }

        Some(signal)
    }

    /// Poll until `run_flag` is cleared, backing off on an empty channel
    ///
    /// Each loop iteration is one poll. The flag is checked once per
    /// iteration; no wakeup notification exists, so an idle consumer
    /// re-checks every backoff period.
    pub fn run(&mut self, run_flag: &RunFlag) -> WorkerReport {
        let worker = WorkerInitializing::new("consumer");
        self.sink
            .log(&format!("Strategy initialized for {}", self.symbol));

        let mut worker = worker.start();
        while run_flag.is_running() {
            if self.poll_once() == PollOutcome::Empty {
                std::thread::sleep(self.backoff);
            }
            worker.record_iteration();
        }

        let report = worker.stop().report();
        tracing::info!(
            "Consumer stopped after {} polls ({:?}), final position {}",
            report.iterations,
            report.runtime,
            self.strategy.position()
        );
        report
    }

    pub fn position(&self) -> PositionState {
        self.strategy.position()
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    pub fn into_strategy(self) -> S {
        self.strategy
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }
}

//! Random-walk tick producer
//!
//! ## Loop
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────┐
//!   │ while run_flag.is_running()                              │
//!   │   price += N(0, 1)                                       │
//!   │   history.push_back(price)      (bounded, oldest drops)  │
//!   │   try_push(Tick { symbol, price, now })                  │
//!   │     ok   → "Price update - <symbol>: <price>"            │
//!   │     full → dropped, no retry                             │
//!   │   sleep(update_interval)        (fixed, not adaptive)    │
//!   └──────────────────────────────────────────────────────────┘
//! ```

use crate::channel::RingSender;
use crate::config::{Config, CHANNEL_CAPACITY};
use crate::core::{
    unix_timestamp, ConfigError, RunFlag, Symbol, Tick, WorkerInitializing, WorkerReport,
};
use crate::perf::PipelineMetrics;
use crate::sink::LogSink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// What happened to the tick generated by one iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PublishOutcome {
    /// Accepted by the channel and visible to the consumer
    Published(Tick),
    /// Channel was full; the tick is gone
    Dropped(Tick),
}

impl PublishOutcome {
    pub fn tick(&self) -> &Tick {
        match self {
            PublishOutcome::Published(tick) | PublishOutcome::Dropped(tick) => tick,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PublishOutcome::Published(_))
    }
}

/// Producer side of the pipeline
///
/// Owns the channel's sending half; shares the sink and metrics with the
/// consumer.
pub struct TickProducer<K: LogSink + ?Sized, const N: usize = CHANNEL_CAPACITY> {
    symbol: Symbol,
    price: f64,
    history: VecDeque<f64>,
    history_size: usize,
    interval: Duration,
    rng: StdRng,
    sender: RingSender<Tick, N>,
    sink: Arc<K>,
    metrics: Arc<PipelineMetrics>,
}

impl<K: LogSink + ?Sized, const N: usize> TickProducer<K, N> {
    /// Build a producer from a validated configuration
    ///
    /// The price history is pre-filled with `price_history_size` points
    /// scattered around the initial price.
    pub fn new(
        config: &Config,
        sender: RingSender<Tick, N>,
        sink: Arc<K>,
        metrics: Arc<PipelineMetrics>,
    ) -> Result<Self, ConfigError> {
        let symbol = config.symbol()?;
        let history_size = config.price_history_size.max(1);

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut history = VecDeque::with_capacity(history_size + 1);
        for _ in 0..history_size {
            let noise: f64 = rng.sample(StandardNormal);
            history.push_back(config.initial_price + noise);
        }

        Ok(Self {
            symbol,
            price: config.initial_price,
            history,
            history_size,
            interval: config.update_interval(),
            rng,
            sender,
            sink,
            metrics,
        })
    }

    /// Run one iteration: advance the walk and try to publish
    #[inline]
    pub fn step(&mut self) -> PublishOutcome {
        let increment: f64 = self.rng.sample(StandardNormal);
        self.price += increment;

        self.history.push_back(self.price);
        if self.history.len() > self.history_size {
            self.history.pop_front();
        }

        let tick = Tick::new(self.symbol, self.price, unix_timestamp());

        match self.sender.try_push(tick) {
            Ok(()) => {
                self.metrics.inc_published();
                self.sink.log(&format!(
                    "Price update - {}: {:.2}",
                    self.symbol, self.price
                ));
                PublishOutcome::Published(tick)
            }
            Err(tick) => {
                self.metrics.inc_dropped();
                tracing::trace!(price = tick.price, "Channel full, tick dropped");
                PublishOutcome::Dropped(tick)
            }
        }
    }

    /// Publish at a fixed cadence until `run_flag` is cleared
    ///
    /// The flag is checked once per iteration; the iteration in progress
    /// always completes.
    pub fn run(&mut self, run_flag: &RunFlag) -> WorkerReport {
        let worker = WorkerInitializing::new("producer");
        self.sink
            .log(&format!("Price feed initialized for {}", self.symbol));

        let mut worker = worker.start();
        while run_flag.is_running() {
            self.step();
            worker.record_iteration();

            if self.interval.is_zero() {
                std::thread::yield_now();
            } else {
                std::thread::sleep(self.interval);
            }
        }

        let report = worker.stop().report();
        tracing::info!(
            "Producer stopped after {} iterations ({:?})",
            report.iterations,
            report.runtime
        );
        report
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn current_price(&self) -> f64 {
        self.price
    }

    /// Most recent prices, oldest first
    pub fn history(&self) -> &VecDeque<f64> {
        &self.history
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::spsc;
    use crate::sink::MemorySink;

    fn seeded_config(seed: u64) -> Config {
        Config {
            seed: Some(seed),
            price_history_size: 10,
            update_interval_ms: 0.0,
            ..Config::default()
        }
    }

    #[test]
    fn test_history_is_seeded_and_bounded() {
        let config = seeded_config(1);
        let (tx, _rx) = spsc::channel::<Tick, 64>();
        let sink = Arc::new(MemorySink::new());
        let mut producer =
            TickProducer::new(&config, tx, sink, Arc::new(PipelineMetrics::new())).unwrap();

        assert_eq!(producer.history().len(), 10);
        for _ in 0..25 {
            producer.step();
        }
        assert_eq!(producer.history().len(), 10);
        assert_eq!(producer.history().back().copied(), Some(producer.current_price()));
    }

    #[test]
    fn test_published_tick_reaches_channel_and_sink() {
        let config = seeded_config(2);
        let (tx, mut rx) = spsc::channel::<Tick, 8>();
        let sink = Arc::new(MemorySink::new());
        let metrics = Arc::new(PipelineMetrics::new());
        let mut producer =
            TickProducer::new(&config, tx, Arc::clone(&sink), Arc::clone(&metrics)).unwrap();

        let outcome = producer.step();
        assert!(outcome.is_published());

        let tick = rx.try_pop().unwrap();
        assert_eq!(&tick, outcome.tick());
        assert_eq!(tick.symbol.as_str(), "BTCUSD");
        assert!(tick.timestamp > 0.0);

        assert_eq!(
            sink.messages(),
            vec![format!("Price update - BTCUSD: {:.2}", tick.price)]
        );
        assert_eq!(metrics.snapshot().ticks_published, 1);
    }

    #[test]
    fn test_full_channel_drops_silently() {
        let config = seeded_config(3);
        let (tx, _rx) = spsc::channel::<Tick, 4>();
        let sink = Arc::new(MemorySink::new());
        let metrics = Arc::new(PipelineMetrics::new());
        let mut producer =
            TickProducer::new(&config, tx, Arc::clone(&sink), Arc::clone(&metrics)).unwrap();

        let outcomes: Vec<bool> = (0..6).map(|_| producer.step().is_published()).collect();
        assert_eq!(outcomes, vec![true, true, true, false, false, false]);

        // Only published ticks are logged
        assert_eq!(sink.len(), 3);
        let snap = metrics.snapshot();
        assert_eq!(snap.ticks_published, 3);
        assert_eq!(snap.ticks_dropped, 3);
    }

    #[test]
    fn test_same_seed_same_walk() {
        let walk = |seed| {
            let (tx, _rx) = spsc::channel::<Tick, 64>();
            let mut producer = TickProducer::new(
                &seeded_config(seed),
                tx,
                Arc::new(MemorySink::new()),
                Arc::new(PipelineMetrics::new()),
            )
            .unwrap();
            (0..20).map(|_| producer.step().tick().price).collect::<Vec<_>>()
        };

        assert_eq!(walk(42), walk(42));
        assert_ne!(walk(42), walk(43));
    }

    #[test]
    fn test_run_stops_on_flag() {
        let config = seeded_config(4);
        let (tx, _rx) = spsc::channel::<Tick, 16>();
        let sink = Arc::new(MemorySink::new());
        let mut producer =
            TickProducer::new(&config, tx, Arc::clone(&sink), Arc::new(PipelineMetrics::new()))
                .unwrap();

        // Cleared before start: the loop body never runs
        let flag = RunFlag::new();
        flag.stop();
        let report = producer.run(&flag);

        assert_eq!(report.name, "producer");
        assert_eq!(report.iterations, 0);
        assert_eq!(sink.messages(), vec!["Price feed initialized for BTCUSD"]);
    }
}

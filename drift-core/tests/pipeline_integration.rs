//! End-to-end pipeline tests: producer, ring, consumer, strategy, sink
//!
//! These tests verify:
//! 1. Under contention (4-slot ring) the strategy sees an in-order
//!    subsequence of the generated ticks, with no duplicates
//! 2. Momentum readings and trades are logged in the documented format
//! 3. A full TradingSystem run produces well-formed, alternating trades

use crossbeam::channel::bounded;
use drift_core::channel::spsc;
use drift_core::config::Config;
use drift_core::core::{PositionState, Signal, Symbol, Tick};
use drift_core::engine::{PollOutcome, SignalConsumer, Strategy, TradingSystem};
use drift_core::feed::{PublishOutcome, TickProducer};
use drift_core::perf::PipelineMetrics;
use drift_core::sink::{FileSink, LogSink, MemorySink, NullSink};
use drift_strategies::Momentum;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Records every price it is handed
#[derive(Default)]
struct RecordingStrategy {
    prices: Vec<f64>,
}

impl Strategy for RecordingStrategy {
    fn on_tick(&mut self, tick: &Tick) -> Option<Signal> {
        self.prices.push(tick.price);
        None
    }

    fn position(&self) -> PositionState {
        PositionState::Flat
    }

    fn name(&self) -> &'static str {
        "RecordingStrategy"
    }
}

fn seeded_config(seed: u64) -> Config {
    Config {
        seed: Some(seed),
        update_interval_ms: 0.0,
        ..Config::default()
    }
}

fn is_subsequence(needle: &[f64], haystack: &[f64]) -> bool {
    let mut it = haystack.iter();
    needle.iter().all(|n| it.any(|h| h == n))
}

#[cfg(test)]
mod stress {
    use super::*;

    #[test]
    fn test_small_ring_delivers_ordered_subsequence() {
        const STEPS: usize = 50_000;
        let config = seeded_config(42);
        let metrics = Arc::new(PipelineMetrics::new());
        let (tx, rx) = spsc::channel::<Tick, 4>();

        let mut producer =
            TickProducer::<NullSink, 4>::new(&config, tx, Arc::new(NullSink), Arc::clone(&metrics))
                .unwrap();
        let mut consumer = SignalConsumer::<_, NullSink, 4>::new(
            &config,
            rx,
            RecordingStrategy::default(),
            Arc::new(NullSink),
            Arc::clone(&metrics),
        )
        .unwrap();

        let done = Arc::new(AtomicBool::new(false));

        let producer_done = Arc::clone(&done);
        let producer_thread = thread::spawn(move || {
            let mut generated = Vec::with_capacity(STEPS);
            let mut published = Vec::new();
            for _ in 0..STEPS {
                match producer.step() {
                    PublishOutcome::Published(tick) => {
                        generated.push(tick.price);
                        published.push(tick.price);
                    }
                    PublishOutcome::Dropped(tick) => generated.push(tick.price),
                }
            }
            producer_done.store(true, Ordering::Release);
            (generated, published)
        });

        let consumer_done = Arc::clone(&done);
        let consumer_thread = thread::spawn(move || {
            loop {
                let finished = consumer_done.load(Ordering::Acquire);
                if consumer.poll_once() == PollOutcome::Empty && finished {
                    break;
                }
            }
            consumer.into_strategy()
        });

        let (generated, published) = producer_thread.join().unwrap();
        let strategy = consumer_thread.join().unwrap();

        assert_eq!(generated.len(), STEPS);
        assert_eq!(strategy.prices, published, "every published tick delivered once, in order");
        assert!(is_subsequence(&strategy.prices, &generated));

        let snap = metrics.snapshot();
        assert_eq!(snap.ticks_generated(), STEPS as u64);
        assert_eq!(snap.ticks_consumed, published.len() as u64);
        assert_eq!(snap.ticks_skipped, 0);
    }
}

#[cfg(test)]
mod momentum_logging {
    use super::*;

    fn tick(price: f64) -> Tick {
        Tick::new(Symbol::new("BTCUSD").unwrap(), price, 1_700_000_000.0)
    }

    #[test]
    fn test_readings_and_trades_are_logged() {
        let config = Config {
            strategy_window: 3,
            strategy_threshold: 0.01,
            ..Config::default()
        };
        let sink = Arc::new(MemorySink::new());
        let (mut tx, rx) = spsc::channel::<Tick, 16>();
        let mut consumer = SignalConsumer::<_, MemorySink, 16>::new(
            &config,
            rx,
            Momentum::from_config(&config),
            Arc::clone(&sink),
            Arc::new(PipelineMetrics::new()),
        )
        .unwrap();

        for price in [100.0, 100.0, 102.0, 103.0, 100.0] {
            tx.try_push(tick(price)).unwrap();
        }
        while consumer.poll_once() != PollOutcome::Empty {}

        assert_eq!(
            sink.messages(),
            vec![
                "Momentum for BTCUSD: 0.0200",
                "BUY BTCUSD at 102.00",
                "Momentum for BTCUSD: 0.0300",
                "Momentum for BTCUSD: -0.0196",
                "SELL BTCUSD at 100.00",
            ]
        );
        assert_eq!(consumer.position(), PositionState::Short);
    }

    #[test]
    fn test_producer_writes_price_lines_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drift.log");
        let config = seeded_config(3);

        {
            let sink = Arc::new(FileSink::open(&path, false).unwrap());
            let (tx, _rx) = spsc::channel::<Tick, 16>();
            let mut producer = TickProducer::<FileSink, 16>::new(
                &config,
                tx,
                Arc::clone(&sink),
                Arc::new(PipelineMetrics::new()),
            )
            .unwrap();

            // 15 fit, the rest are dropped without a line
            for _ in 0..20 {
                producer.step();
            }
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 15);
        for line in lines {
            let (ts, msg) = line.split_once(": ").unwrap();
            assert_eq!(ts.split_once('.').unwrap().1.len(), 6, "six decimal places: {}", line);
            assert!(msg.starts_with("Price update - BTCUSD: "), "{}", line);
        }
    }
}

#[cfg(test)]
mod system {
    use super::*;

    #[test]
    fn test_full_run_with_momentum() {
        let config = Arc::new(Config {
            update_interval_ms: 0.2,
            strategy_window: 5,
            strategy_threshold: 0.001,
            seed: Some(9),
            ..Config::default()
        });
        let sink = Arc::new(MemorySink::new());
        let strategy = Momentum::from_config(&config);

        let system = TradingSystem::new(Arc::clone(&config), strategy, Arc::clone(&sink)).unwrap();
        let (_tx, rx) = bounded::<()>(1);
        let report = system.run_for(Duration::from_millis(300), &rx).unwrap();

        assert_eq!(report.strategy_name, "Momentum");
        assert!(report.metrics.ticks_consumed > 0);
        assert!(report.metrics.momentum_readings <= report.metrics.ticks_consumed);

        // Every line carries a six-decimal timestamp
        for line in sink.lines() {
            let (ts, _) = line.split_once(": ").unwrap();
            assert!(ts.parse::<f64>().is_ok(), "{}", line);
            assert_eq!(ts.split_once('.').unwrap().1.len(), 6, "{}", line);
        }

        // Trades alternate and match the final position
        let trades: Vec<String> = sink
            .messages()
            .into_iter()
            .filter(|m| m.starts_with("BUY ") || m.starts_with("SELL "))
            .collect();
        assert_eq!(trades.len() as u64, report.metrics.trades_emitted);
        assert!(trades
            .windows(2)
            .all(|w| w[0].split(' ').next() != w[1].split(' ').next()));

        let expected = match trades.last().map(|t| t.starts_with("BUY")) {
            Some(true) => PositionState::Long,
            Some(false) => PositionState::Short,
            None => PositionState::Flat,
        };
        assert_eq!(report.final_position, expected);
    }

    #[test]
    fn test_sink_is_shared_by_both_threads() {
        struct Counting(std::sync::atomic::AtomicUsize);
        impl LogSink for Counting {
            fn log(&self, _message: &str) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        let sink = Arc::new(Counting(Default::default()));
        let system = TradingSystem::new(
            Arc::new(seeded_config(1)),
            RecordingStrategy::default(),
            Arc::clone(&sink),
        )
        .unwrap();
        let (_tx, rx) = bounded::<()>(1);
        let report = system.run_for(Duration::from_millis(50), &rx).unwrap();

        // Lifecycle lines plus one per published tick
        let lifecycle = 5;
        assert_eq!(
            sink.0.load(Ordering::Relaxed) as u64,
            lifecycle + report.metrics.ticks_published
        );
    }
}

//! Trading system orchestration
//!
//! Wires the pipeline together and owns the two worker threads:
//!
//! ```text
//!   TradingSystem::new ──► start() ──► RunningSystem ──wait()──► stop() ──► SystemReport
//!        │                   │                                    │
//!        │ validate config   │ spawn drift-producer               │ clear both RunFlags
//!        │ build channel     │ spawn drift-consumer               │ join both threads
//!        │ build workers     │                                    │
//! ```
//!
//! The two workers share nothing but the channel, the sink and the metrics.
//! Each gets its own [`RunFlag`]; shutdown clears both and waits for each
//! worker to finish its current iteration.

use super::generic::{SignalConsumer, Strategy};
use crate::channel::tick_channel;
use crate::config::Config;
use crate::core::{PositionState, RunFlag, WorkerReport};
use crate::feed::TickProducer;
use crate::perf::{pin_worker, MetricsSnapshot, PipelineMetrics};
use crate::sink::LogSink;
use anyhow::{anyhow, Context, Result};
use crossbeam::channel::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A fully built pipeline whose threads have not started yet
pub struct TradingSystem<S: Strategy + 'static, K: LogSink + ?Sized + 'static> {
    config: Arc<Config>,
    producer: TickProducer<K>,
    consumer: SignalConsumer<S, K>,
    sink: Arc<K>,
    metrics: Arc<PipelineMetrics>,
}

impl<S: Strategy + 'static, K: LogSink + ?Sized + 'static> TradingSystem<S, K> {
    /// Validate the configuration and build channel, producer and consumer
    pub fn new(config: Arc<Config>, strategy: S, sink: Arc<K>) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let metrics = Arc::new(PipelineMetrics::new());
        let (sender, receiver) = tick_channel();

        let producer = TickProducer::new(&config, sender, Arc::clone(&sink), Arc::clone(&metrics))?;
        let consumer = SignalConsumer::new(
            &config,
            receiver,
            strategy,
            Arc::clone(&sink),
            Arc::clone(&metrics),
        )?;

        Ok(Self {
            config,
            producer,
            consumer,
            sink,
            metrics,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Spawn both worker threads
    pub fn start(self) -> Result<RunningSystem<S, K>> {
        let started_at = Instant::now();
        self.sink.log("Starting trading system...");

        let Self {
            config,
            mut producer,
            mut consumer,
            sink,
            metrics,
        } = self;

        let producer_flag = RunFlag::new();
        let consumer_flag = RunFlag::new();

        let producer_handle = {
            let flag = producer_flag.clone();
            let core = config.producer_core;
            thread::Builder::new()
                .name("drift-producer".to_string())
                .spawn(move || {
                    pin_worker("producer", core);
                    producer.run(&flag)
                })
                .context("Failed to spawn producer thread")?
        };

        let consumer_handle = {
            let flag = consumer_flag.clone();
            let core = config.consumer_core;
            let spawned = thread::Builder::new()
                .name("drift-consumer".to_string())
                .spawn(move || {
                    pin_worker("consumer", core);
                    let report = consumer.run(&flag);
                    (report, consumer.into_strategy())
                });

            match spawned {
                Ok(handle) => handle,
                Err(e) => {
                    producer_flag.stop();
                    let _ = producer_handle.join();
                    return Err(e).context("Failed to spawn consumer thread");
                }
            }
        };

        let startup_ms = started_at.elapsed().as_secs_f64() * 1000.0;
        sink.log(&format!("Startup completed in {:.2}ms", startup_ms));
        tracing::info!("Trading system started for {}", config.symbol);

        Ok(RunningSystem {
            producer_flag,
            consumer_flag,
            producer_handle: Some(producer_handle),
            consumer_handle: Some(consumer_handle),
            sink,
            metrics,
            started_at,
        })
    }

    /// Start, wait for `duration` (or a shutdown message), then stop
    pub fn run_for(self, duration: Duration, shutdown: &Receiver<()>) -> Result<SystemReport> {
        let running = self.start()?;
        running.wait(duration, shutdown);
        running.stop()
    }
}

/// Pipeline with both worker threads live
///
/// Dropping it without [`stop`](RunningSystem::stop) still clears both run
/// flags, so the workers exit after their current iteration.
pub struct RunningSystem<S: Strategy + 'static, K: LogSink + ?Sized + 'static> {
    producer_flag: RunFlag,
    consumer_flag: RunFlag,
    producer_handle: Option<JoinHandle<WorkerReport>>,
    consumer_handle: Option<JoinHandle<(WorkerReport, S)>>,
    sink: Arc<K>,
    metrics: Arc<PipelineMetrics>,
    started_at: Instant,
}

impl<S: Strategy + 'static, K: LogSink + ?Sized + 'static> RunningSystem<S, K> {
    /// Block until `duration` elapses or a shutdown message arrives
    ///
    /// Returns `true` if the wait was cut short by a shutdown request. A
    /// disconnected shutdown channel just means nobody can interrupt us.
    /// A duration past the clock's range waits for the shutdown message only.
    pub fn wait(&self, duration: Duration, shutdown: &Receiver<()>) -> bool {
        let deadline = Instant::now().checked_add(duration);

        match shutdown.recv_timeout(duration) {
            Ok(()) => {
                tracing::warn!("Shutdown requested before run duration elapsed");
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                let remaining = match deadline {
                    Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                    None => duration,
                };
                thread::sleep(remaining);
                false
            }
        }
    }

    /// Live counters
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Clear both run flags and join both workers
    pub fn stop(mut self) -> Result<SystemReport> {
        self.producer_flag.stop();
        self.consumer_flag.stop();

        // Join both before reporting either failure
        let producer = self.producer_handle.take().map(JoinHandle::join);
        let consumer = self.consumer_handle.take().map(JoinHandle::join);

        let producer = producer
            .ok_or_else(|| anyhow!("producer thread already joined"))?
            .map_err(|_| anyhow!("producer thread panicked"))?;
        let (consumer, strategy) = consumer
            .ok_or_else(|| anyhow!("consumer thread already joined"))?
            .map_err(|_| anyhow!("consumer thread panicked"))?;

        let runtime = self.started_at.elapsed();
        self.sink.log(&format!(
            "Shutting down trading system after {:.2} seconds...",
            runtime.as_secs_f64()
        ));

        let report = SystemReport {
            producer,
            consumer,
            metrics: self.metrics.snapshot(),
            strategy_name: strategy.name(),
            final_position: strategy.position(),
            runtime,
        };
        tracing::info!("Trading system stopped: {:?}", report.metrics);

        Ok(report)
    }
}

impl<S: Strategy + 'static, K: LogSink + ?Sized + 'static> Drop for RunningSystem<S, K> {
    fn drop(&mut self) {
        if self.producer_handle.is_some() || self.consumer_handle.is_some() {
            tracing::warn!("Trading system dropped while running, stopping workers");
        }
        self.producer_flag.stop();
        self.consumer_flag.stop();
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy)]
pub struct SystemReport {
    pub producer: WorkerReport,
    pub consumer: WorkerReport,
    pub metrics: MetricsSnapshot,
    pub strategy_name: &'static str,
    pub final_position: PositionState,
    pub runtime: Duration,
}

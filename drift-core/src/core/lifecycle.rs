//! Worker Lifecycle State Machine - Typestate Pattern
//!
//! Producer and consumer threads move through the same three states.
//!
//! # State Diagram
//!
//! ```text
//!   INITIALIZING ──start()──► RUNNING ──stop()──► STOPPED
//!         │                                        (terminal)
//!         └───────────────stop()──────────────────────▲
//! ```
//!
//! Stop is cooperative: a worker polls its [`RunFlag`] once per iteration and
//! finishes the iteration in progress before transitioning.
//!
//! # Usage
//!
//! ```
//! use drift_core::core::lifecycle::*;
//!
//! let worker = WorkerInitializing::new("producer");
//! let mut worker = worker.start();
//! worker.record_iteration();
//! let report = worker.stop().report();
//! assert_eq!(report.iterations, 1);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative stop flag for one worker
///
/// Each worker owns a clone of its own flag; the orchestrator keeps the other
/// clone and clears it to request a stop.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    /// Create a flag in the running state
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Polled once per loop iteration
    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Request the worker to stop after its current iteration
    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Data shared by all lifecycle states
#[derive(Debug, Clone)]
pub struct WorkerData {
    /// Worker name, used in reports and thread names
    pub name: &'static str,
    pub created_at: Instant,
    pub started_at: Option<Instant>,
    pub stopped_at: Option<Instant>,
    /// Completed loop iterations
    pub iterations: u64,
}

impl WorkerData {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            created_at: Instant::now(),
            started_at: None,
            stopped_at: None,
            iterations: 0,
        }
    }
}

/// Worker has been built but its loop has not started
#[derive(Debug, Clone)]
pub struct WorkerInitializing {
    data: WorkerData,
}

impl WorkerInitializing {
    pub fn new(name: &'static str) -> Self {
        Self {
            data: WorkerData::new(name),
        }
    }

    pub fn data(&self) -> &WorkerData {
        &self.data
    }

    /// Transition: Initializing → Running
    pub fn start(mut self) -> WorkerRunning {
        self.data.started_at = Some(Instant::now());
        WorkerRunning { data: self.data }
    }

    /// Transition: Initializing → Stopped (stop requested before the first iteration)
    pub fn stop(mut self) -> WorkerStopped {
        self.data.stopped_at = Some(Instant::now());
        WorkerStopped { data: self.data }
    }
}

/// Worker loop is executing
#[derive(Debug, Clone)]
pub struct WorkerRunning {
    data: WorkerData,
}

impl WorkerRunning {
    pub fn data(&self) -> &WorkerData {
        &self.data
    }

    #[inline(always)]
    pub fn record_iteration(&mut self) {
        self.data.iterations += 1;
    }

    /// Transition: Running → Stopped
    pub fn stop(mut self) -> WorkerStopped {
        self.data.stopped_at = Some(Instant::now());
        WorkerStopped { data: self.data }
    }
}

/// Worker loop has returned (terminal)
#[derive(Debug, Clone)]
pub struct WorkerStopped {
    data: WorkerData,
}

impl WorkerStopped {
    pub fn data(&self) -> &WorkerData {
        &self.data
    }

    /// Time spent in the Running state
    pub fn runtime(&self) -> Duration {
        match (self.data.started_at, self.data.stopped_at) {
            (Some(started), Some(stopped)) => stopped.saturating_duration_since(started),
            _ => Duration::ZERO,
        }
    }

    pub fn report(&self) -> WorkerReport {
        WorkerReport {
            name: self.data.name,
            iterations: self.data.iterations,
            runtime: self.runtime(),
        }
    }
}

/// Summary of one finished worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub name: &'static str,
    pub iterations: u64,
    pub runtime: Duration,
}

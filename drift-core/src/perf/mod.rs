//! Performance Utilities
//!
//! - **CPU affinity**: pin a worker thread to a specific core
//! - **Lock-free metrics**: cache-aligned relaxed counters shared by both workers

pub mod cpu;
pub mod metrics;

// Re-exports for convenience
pub use cpu::{pin_to_core, pin_worker, set_realtime_priority};
pub use metrics::{MetricsSnapshot, PipelineMetrics};

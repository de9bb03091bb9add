//! Serialized, timestamped log line sink
//!
//! Both pipeline threads write their domain records (price updates, momentum
//! readings, trades) through a [`LogSink`]. Every call captures the current
//! wall-clock time and emits exactly one line:
//!
//! ```text
//! <seconds since epoch, 6 decimals>: <message>
//! ```
//!
//! Implementations serialize calls with one mutex acquisition per line, so
//! lines from different threads may interleave but are never torn.
//!
//! Diagnostics (startup, drops, warnings) go through `tracing`, not here.

pub mod file;
pub mod memory;

pub use file::FileSink;
pub use memory::{MemorySink, NullSink};

use crate::core::unix_timestamp;

/// Thread-safe sink for timestamped text lines
pub trait LogSink: Send + Sync {
    /// Record one pre-formatted message stamped with the current time
    fn log(&self, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}

/// Render a sink line (without trailing newline)
#[inline]
pub fn format_line(timestamp: f64, message: &str) -> String {
    format!("{:.6}: {}", timestamp, message)
}

/// Render a sink line stamped with the current time
#[inline]
pub fn stamp(message: &str) -> String {
    format_line(unix_timestamp(), message)
}

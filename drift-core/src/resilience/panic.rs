//! Process-wide panic hook
//!
//! The pipeline has no way to recover a dead worker: a panicked feed leaves
//! the strategy polling an empty ring forever. The hook records which worker
//! died and where, then exits with status 1.

use std::any::Any;
use std::panic::{self, Location};
use std::process;
use tracing::error;

/// Install the hook; call once at the top of `main`
pub fn install_panic_handler() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let report = PanicReport::new(info.location(), info.payload());
        error!(
            thread = %report.thread,
            location = %report.location,
            message = %report.message,
            "Worker panicked, exiting"
        );
        previous(info);
        process::exit(1);
    }));

    tracing::debug!("Panic hook installed");
}

/// Fields logged for a panic
#[derive(Debug, Clone, PartialEq, Eq)]
struct PanicReport {
    thread: String,
    location: String,
    message: String,
}

impl PanicReport {
    fn new(location: Option<&Location<'_>>, payload: &(dyn Any + Send)) -> Self {
        Self {
            thread: std::thread::current()
                .name()
                .unwrap_or("<unnamed>")
                .to_string(),
            location: location
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "<unknown>".to_string()),
            message: payload_message(payload),
        }
    }
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string payload>".to_string()
    }
}

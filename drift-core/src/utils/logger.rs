use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for diagnostics
///
/// `RUST_LOG` takes precedence over `log_level`. Pipeline records (price
/// updates, momentum, trades) do not go through here; they use the log sink.
pub fn init_logger(log_level: &str, json_logs: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_names(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

//! Momentum Strategy on a Simulated Random-Walk Feed
//!
//! This binary combines:
//! - TickProducer (Gaussian random walk, drop-on-full publishing)
//! - SPSC ring (wait-free, pre-allocated slots)
//! - Momentum strategy (sliding window, Flat/Long/Short)
//! - FileSink (timestamped, append-only log lines)
//!
//! Runs for the configured duration, or until Ctrl-C.

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam::channel::bounded;
use drift_bins::common::{build_config, init_logging, print_stats, setup_realtime, CommonArgs};
use drift_core::engine::TradingSystem;
use drift_core::resilience::install_panic_handler;
use drift_core::sink::FileSink;
use drift_strategies::Momentum;
use std::sync::Arc;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = CommonArgs::parse();

    // Initialize logging
    init_logging(&args)?;

    // Install panic handler for graceful shutdown
    install_panic_handler();

    let config = build_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    tracing::info!("=== Drift: Momentum + Simulated Feed ===");
    tracing::info!(
        "Symbol: {}, window: {}, threshold: {}, interval: {}ms",
        config.symbol,
        config.strategy_window,
        config.strategy_threshold,
        config.update_interval_ms
    );

    setup_realtime(args.realtime)?;

    let sink = Arc::new(FileSink::open(&config.log_file, config.echo_stdout)?);
    tracing::info!("Logging to {}", sink.path().display());

    let strategy = Momentum::from_config(&config);
    let run_duration = config.run_duration();
    let system = TradingSystem::new(Arc::new(config), strategy, sink)?;

    // Ctrl-C cuts the run short
    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
    })
    .context("Failed to install Ctrl-C handler")?;

    let report = system.run_for(run_duration, &shutdown_rx)?;

    // Print final statistics
    print_stats(&report);

    Ok(())
}

//! Common utilities for all binaries
//!
//! Shared initialization, CLI parsing, and setup code.

use anyhow::{Context, Result};
use clap::Parser;
use drift_core::config::Config;
use drift_core::engine::SystemReport;
use std::path::PathBuf;

/// Common CLI arguments for all binaries
///
/// Command-line values override `DRIFT__<FIELD>` environment variables,
/// which override the config file (JSON, or TOML for a `.toml` path), which
/// overrides the built-in defaults.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CommonArgs {
    /// Configuration file (JSON, or TOML with a .toml extension)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Instrument to simulate
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Starting price of the random walk
    #[arg(long)]
    pub initial_price: Option<f64>,

    /// Feed cadence in milliseconds
    #[arg(long)]
    pub update_interval: Option<f64>,

    /// Momentum window length
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Momentum threshold (fractional return)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Log file for price, momentum and trade lines
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Run time before shutdown
    #[arg(short, long)]
    pub duration_secs: Option<u64>,

    /// RNG seed for a reproducible random walk
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not mirror log lines to stdout
    #[arg(long)]
    pub no_echo: bool,

    /// CPU core for the feed thread
    #[arg(long)]
    pub producer_core: Option<usize>,

    /// CPU core for the strategy thread
    #[arg(long)]
    pub consumer_core: Option<usize>,

    /// Enable real-time priority (requires privileges)
    #[arg(long)]
    pub realtime: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Emit diagnostics as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Resolve the effective configuration: defaults, file, environment, flags
pub fn build_config(args: &CommonArgs) -> Result<Config> {
    let mut config =
        Config::from_sources(args.config.as_deref()).with_context(|| match &args.config {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Failed to load config from environment".to_string(),
        })?;

    if let Some(symbol) = &args.symbol {
        config.symbol = symbol.clone();
    }
    if let Some(price) = args.initial_price {
        config.initial_price = price;
    }
    if let Some(interval) = args.update_interval {
        config.update_interval_ms = interval;
    }
    if let Some(window) = args.window {
        config.strategy_window = window;
    }
    if let Some(threshold) = args.threshold {
        config.strategy_threshold = threshold;
    }
    if let Some(path) = &args.log_file {
        config.log_file = path.clone();
    }
    if let Some(secs) = args.duration_secs {
        config.run_duration_secs = secs;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_echo {
        config.echo_stdout = false;
    }
    if args.producer_core.is_some() {
        config.producer_core = args.producer_core;
    }
    if args.consumer_core.is_some() {
        config.consumer_core = args.consumer_core;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Initialize tracing/logging
pub fn init_logging(args: &CommonArgs) -> Result<()> {
    drift_core::utils::init_logger(&args.log_level, args.json_logs)
}

/// Set real-time priority for the process if requested
pub fn setup_realtime(realtime: bool) -> Result<()> {
    #[cfg(target_os = "linux")]
    if realtime {
        drift_core::perf::set_realtime_priority(50)?;
        tracing::info!("Enabled real-time priority");
    }

    #[cfg(not(target_os = "linux"))]
    if realtime {
        tracing::warn!("Real-time priority only supported on Linux");
    }

    Ok(())
}

/// Print final statistics
pub fn print_stats(report: &SystemReport) {
    let m = &report.metrics;

    tracing::info!("=== Final Statistics ===");
    tracing::info!("Runtime: {:.2}s", report.runtime.as_secs_f64());
    tracing::info!(
        "Ticks published: {} (dropped {}, {:.2}%)",
        m.ticks_published,
        m.ticks_dropped,
        m.drop_rate() * 100.0
    );
    tracing::info!("Ticks consumed: {}", m.ticks_consumed);
    if m.ticks_skipped > 0 {
        tracing::info!("Ticks skipped: {}", m.ticks_skipped);
    }
    tracing::info!("Momentum readings: {}", m.momentum_readings);
    tracing::info!("Trades emitted: {}", m.trades_emitted);
    tracing::info!(
        "Final position: {} ({})",
        report.final_position,
        report.strategy_name
    );
    tracing::info!(
        "Producer iterations: {}, consumer polls: {}",
        report.producer.iterations,
        report.consumer.iterations
    );

    if m.momentum_readings > 0 {
        tracing::info!("Trade rate: {:.2}%", m.trade_rate() * 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // build_config reads DRIFT__* variables, which are process-wide
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn parse(argv: &[&str]) -> CommonArgs {
        CommonArgs::try_parse_from(std::iter::once("drift").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let _env = env_lock();
        let config = build_config(&parse(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let _env = env_lock();
        let args = parse(&[
            "--symbol",
            "ETHUSD",
            "--window",
            "5",
            "--threshold",
            "0.01",
            "--seed",
            "7",
            "--no-echo",
            "--duration-secs",
            "3",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.symbol, "ETHUSD");
        assert_eq!(config.strategy_window, 5);
        assert_eq!(config.strategy_threshold, 0.01);
        assert_eq!(config.seed, Some(7));
        assert!(!config.echo_stdout);
        assert_eq!(config.run_duration_secs, 3);
    }

    #[test]
    fn test_flags_override_file() {
        let _env = env_lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"symbol": "SOLUSD", "strategy_window": 8}}"#).unwrap();

        let path = file.path().to_str().unwrap();
        let config = build_config(&parse(&["--config", path, "--window", "4"])).unwrap();

        assert_eq!(config.symbol, "SOLUSD");
        assert_eq!(config.strategy_window, 4);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let _env = env_lock();
        assert!(build_config(&parse(&["--window", "0"])).is_err());
        let too_long = "X".repeat(40);
        assert!(build_config(&parse(&["--symbol", too_long.as_str()])).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let _env = env_lock();
        assert!(build_config(&parse(&["--config", "/nonexistent/drift.json"])).is_err());
    }

    #[test]
    fn test_environment_overrides_defaults_without_file() {
        let _env = env_lock();
        std::env::set_var("DRIFT__SYMBOL", "ETHUSD");
        std::env::set_var("DRIFT__STRATEGY_WINDOW", "7");
        let config = build_config(&parse(&[]));
        std::env::remove_var("DRIFT__SYMBOL");
        std::env::remove_var("DRIFT__STRATEGY_WINDOW");

        let config = config.unwrap();
        assert_eq!(config.symbol, "ETHUSD");
        assert_eq!(config.strategy_window, 7);
    }

    #[test]
    fn test_flags_override_environment() {
        let _env = env_lock();
        std::env::set_var("DRIFT__SYMBOL", "ETHUSD");
        let config = build_config(&parse(&["--symbol", "SOLUSD"]));
        std::env::remove_var("DRIFT__SYMBOL");

        assert_eq!(config.unwrap().symbol, "SOLUSD");
    }

    #[test]
    fn test_flag_can_repair_file_value() {
        let _env = env_lock();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"strategy_window": 0}}"#).unwrap();

        let path = file.path().to_str().unwrap();
        assert!(build_config(&parse(&["--config", path])).is_err());
        let config = build_config(&parse(&["--config", path, "--window", "3"])).unwrap();
        assert_eq!(config.strategy_window, 3);
    }
}

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::Config;

use crate::core::{ConfigError, Symbol};
use anyhow::{Context, Result};
use config::{Config as ConfigLoader, Environment, File, FileFormat};
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load configuration from file with optional environment variable overrides
    ///
    /// The file is TOML when its extension is `.toml`, JSON otherwise.
    /// Fields absent from the file keep their defaults; `DRIFT__<FIELD>`
    /// environment variables override the file. The result is validated
    /// before it is returned.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let cfg = Self::from_sources(Some(path.as_ref()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults, then the optional file, then `DRIFT__<FIELD>` variables
    ///
    /// Not validated: callers layer further overrides on top first.
    pub fn from_sources(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigLoader::builder();

        if let Some(config_path) = path {
            let format = match config_path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                _ => FileFormat::Json,
            };
            builder = builder.add_source(File::from(config_path).format(format));
        }

        let config = builder
            // Override with environment variables (DRIFT__)
            .add_source(
                Environment::with_prefix("DRIFT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| match path {
                Some(p) => format!("Failed to read config file {:?}", p),
                None => "Failed to read configuration from environment".to_string(),
            })?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Pretty JSON rendering (used by `--print-config`)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        Symbol::new(&self.symbol)?;

        if !self.initial_price.is_finite() || self.initial_price <= 0.0 {
            return Err(ConfigError::InitialPrice(self.initial_price));
        }

        if self.price_history_size == 0 {
            return Err(ConfigError::ZeroSize {
                field: "price_history_size",
            });
        }

        if self.strategy_window == 0 {
            return Err(ConfigError::ZeroSize {
                field: "strategy_window",
            });
        }

        if self.run_duration_secs == 0 {
            return Err(ConfigError::ZeroSize {
                field: "run_duration_secs",
            });
        }

        if self.channel_capacity != CHANNEL_CAPACITY {
            return Err(ConfigError::ChannelCapacity {
                expected: CHANNEL_CAPACITY,
                actual: self.channel_capacity,
            });
        }

        if !self.update_interval_ms.is_finite() || self.update_interval_ms < 0.0 {
            return Err(ConfigError::UpdateInterval(self.update_interval_ms));
        }

        if !self.strategy_threshold.is_finite() || self.strategy_threshold < 0.0 {
            return Err(ConfigError::Threshold(self.strategy_threshold));
        }

        Ok(())
    }

    /// Parsed symbol (call after `validate`)
    pub fn symbol(&self) -> Result<Symbol, ConfigError> {
        Ok(Symbol::new(&self.symbol)?)
    }

    /// Feed sleep between iterations
    pub fn update_interval(&self) -> Duration {
        Duration::from_nanos((self.update_interval_ms.max(0.0) * 1_000_000.0).round() as u64)
    }

    pub fn run_duration(&self) -> Duration {
        Duration::from_secs(self.run_duration_secs)
    }
}

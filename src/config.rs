//! # Configuration Module
//!
//! Loads engine settings from the environment (and an optional `.env` file)
//! and turns them into a [`gps_core::EngineConfig`].

use anyhow::{Context, Result};
use std::env;

use gps_core::EngineConfig;

// =============================================================================
// CONFIGURATION STRUCT
// =============================================================================
/// Runtime configuration for the CLI.
///
/// # Rust Concept: Layered Defaults
/// Values start from [`Default`], are overridden by environment variables,
/// and finally by command-line flags in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker threads for per-round vertex computation (1 = sequential)
    pub parallelism: usize,

    /// Superstep cap for run-until-halt loops
    pub max_supersteps: usize,

    /// Partitions used for per-round statistics (1 = disabled)
    pub partitions: usize,

    /// Log filter for the application
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            parallelism: engine.parallelism,
            max_supersteps: engine.max_supersteps,
            partitions: engine.partitions,
            log_level: "info".to_string(),
        }
    }
}

// =============================================================================
// CONFIGURATION LOADING
// =============================================================================
impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognised: `GPS_PARALLELISM`, `GPS_MAX_SUPERSTEPS`, `GPS_PARTITIONS`
    /// and `RUST_LOG`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (silently ignore if not found)
        let _ = dotenvy::dotenv();

        let mut config = Config::default();

        if let Ok(val) = env::var("GPS_PARALLELISM") {
            config.parallelism = val
                .parse()
                .context("GPS_PARALLELISM must be a positive integer")?;
        }

        if let Ok(val) = env::var("GPS_MAX_SUPERSTEPS") {
            config.max_supersteps = val
                .parse()
                .context("GPS_MAX_SUPERSTEPS must be a positive integer")?;
        }

        if let Ok(val) = env::var("GPS_PARTITIONS") {
            config.partitions = val
                .parse()
                .context("GPS_PARTITIONS must be a positive integer")?;
        }

        if let Ok(val) = env::var("RUST_LOG") {
            config.log_level = val;
        }

        Ok(config)
    }

    /// Validate the configuration before building an engine.
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == 0 {
            anyhow::bail!("GPS_PARALLELISM must be at least 1");
        }

        if self.max_supersteps == 0 {
            anyhow::bail!("GPS_MAX_SUPERSTEPS must be at least 1");
        }

        if self.partitions == 0 {
            anyhow::bail!("GPS_PARTITIONS must be at least 1");
        }

        self.engine_config()
            .validate()
            .context("Invalid engine configuration")?;

        Ok(())
    }

    /// Engine configuration for this run
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_parallelism(self.parallelism)
            .with_max_supersteps(self.max_supersteps)
            .with_partitions(self.partitions)
    }
}

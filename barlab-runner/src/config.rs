//! Serializable run configuration, loadable from TOML.

use barlab_core::engine::{InputError, SimConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] InputError),
}

/// Configuration for a single backtest run.
///
/// Captures everything needed to reproduce the run besides the data itself;
/// `run_id()` is a content hash over the serialized form, so identical
/// configs share cache entries and sweep slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub initial_capital: f64,
    pub stop_fraction: f64,
    pub take_fraction: f64,
    #[serde(default)]
    pub fee_rate: f64,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default = "default_allow_short")]
    pub allow_short: bool,
}

fn default_allow_short() -> bool {
    true
}

impl RunConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(text)?;
        config.to_sim_config().validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn to_sim_config(&self) -> SimConfig {
        SimConfig {
            initial_capital: self.initial_capital,
            stop_fraction: self.stop_fraction,
            take_fraction: self.take_fraction,
            fee_rate: self.fee_rate,
            tax_rate: self.tax_rate,
            allow_short: self.allow_short,
        }
    }

    /// Deterministic content hash of this configuration.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("RunConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

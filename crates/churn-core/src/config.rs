//! Configuration for the churn dashboard
//!
//! Defaults work out of the box; a TOML file and environment variables can
//! override them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::charts::HIGH_TOTAL_CHARGES_THRESHOLD;
use crate::error::ConfigError;

/// Environment variable naming the TOML config file
pub const CONFIG_ENV: &str = "CHURN_CONFIG";
/// Environment variable overriding the listen address
pub const ADDR_ENV: &str = "CHURN_ADDR";
/// Environment variable overriding the dataset path
pub const DATA_ENV: &str = "CHURN_DATA";

/// Dashboard-wide configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Input dataset settings
    pub data: DataConfig,
    /// Chart settings
    pub charts: ChartConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8050".to_string(),
        }
    }
}

/// Dataset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the delimited customer file
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("WA_Fn-UseC_-Telco-Customer-Churn.csv"),
        }
    }
}

/// Chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Column the dropdown starts on
    pub default_column: String,
    /// Lower bound (exclusive) for the high total-charges histogram
    pub high_charges_threshold: f64,
    /// Where the page loads Plotly.js from
    pub plotly_cdn: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_column: "gender".to_string(),
            high_charges_threshold: HIGH_TOTAL_CHARGES_THRESHOLD,
            plotly_cdn: "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&text)?)
    }

    /// Apply `CHURN_ADDR` / `CHURN_DATA` style overrides
    ///
    /// `lookup` is usually `std::env::var(..).ok()`; tests pass a map.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup(ADDR_ENV) {
            self.server.addr = addr;
        }
        if let Some(path) = lookup(DATA_ENV) {
            self.data.path = PathBuf::from(path);
        }
        self
    }

    /// Resolve configuration from the process environment
    ///
    /// Reads the file named by `CHURN_CONFIG` if set, then applies the
    /// address and data overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        let config = base.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.addr.trim().is_empty() {
            return Err(ConfigError::Missing("server.addr".to_string()));
        }

        if self.data.path.as_os_str().is_empty() {
            return Err(ConfigError::Missing("data.path".to_string()));
        }

        if self.charts.default_column.trim().is_empty() {
            return Err(ConfigError::Missing("charts.default_column".to_string()));
        }

        let threshold = self.charts.high_charges_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::OutOfRange(
                "charts.high_charges_threshold must be a non-negative number".to_string(),
            ));
        }

        Ok(())
    }
}

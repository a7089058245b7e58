//! Error types for churn-core
//!
//! Covers:
//! - Event dispatch (unknown panels, unsupported events)
//! - Aggregation failures surfaced while rebuilding a chart
//! - Configuration loading ([`ConfigError`])

use churn_stats::StatsError;
use thiserror::Error;

use crate::event::EventKind;
use crate::panel::PanelId;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// No panel with this identifier exists
    #[error("Unknown panel: {0}")]
    UnknownPanel(String),

    /// The panel does not react to this kind of event
    #[error("Panel '{panel}' does not handle {kind} events")]
    UnsupportedEvent { panel: PanelId, kind: EventKind },

    /// Dropdown selected something that is not a categorical column
    #[error("Column '{0}' is not available for analysis")]
    UnknownColumn(String),

    /// Aggregation failed
    #[error("Aggregation failed: {0}")]
    Stats(#[from] StatsError),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value is outside its allowed range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// A required value is empty
    #[error("Missing value: {0}")]
    Missing(String),

    /// The config file could not be read
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// The config file is not valid TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

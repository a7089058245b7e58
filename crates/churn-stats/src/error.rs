//! Error types for churn-stats

use thiserror::Error;

/// Errors raised while aggregating the customer table
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// The requested column is not a categorical column
    #[error("Column '{0}' is not a categorical column")]
    UnknownColumn(String),

    /// Bin widths must be finite and positive
    #[error("Invalid bin width: {0}")]
    InvalidBinWidth(f64),
}

/// Result type for aggregation operations
pub type StatsResult<T> = Result<T, StatsError>;

//! Server error types

use axum::http::StatusCode;
use churn_core::{ConfigError, DashboardError};
use churn_io::IoError;
use thiserror::Error;

/// Errors that stop the server from starting or running
#[derive(Error, Debug)]
pub enum ServerError {
    /// The dataset could not be loaded
    #[error("Failed to load dataset: {0}")]
    Load(#[from] IoError),

    /// Configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Initial render failed
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    /// Could not bind the listen address
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// HTTP status for a dashboard error
pub fn status_for(err: &DashboardError) -> StatusCode {
    match err {
        DashboardError::UnknownPanel(_) => StatusCode::NOT_FOUND,
        DashboardError::UnsupportedEvent { .. }
        | DashboardError::UnknownColumn(_)
        | DashboardError::Stats(_) => StatusCode::BAD_REQUEST,
    }
}

/// Map a dashboard error into a handler error
pub fn reject(err: DashboardError) -> (StatusCode, String) {
    (status_for(&err), err.to_string())
}

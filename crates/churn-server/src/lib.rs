//! Churn Server - dashboard web server
//!
//! Serves the dashboard page and the JSON API the page talks to.

pub mod error;
pub mod http;
pub mod page;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use churn_core::{Controller, DashboardConfig};
use churn_io::CustomerTable;

pub use error::{ServerError, ServerResult};

/// Shared application state
pub struct AppState {
    /// Loaded once at startup, read-only afterwards
    pub table: Arc<CustomerTable>,
    /// Per-panel interaction state; one event at a time
    pub controller: Mutex<Controller>,
    pub config: DashboardConfig,
    /// Show the debug banner on the page
    pub debug: bool,
}

impl AppState {
    /// Render every panel and wrap the controller
    pub fn new(table: Arc<CustomerTable>, config: DashboardConfig) -> ServerResult<Self> {
        let controller = Controller::new(Arc::clone(&table), config.charts.clone())?;
        Ok(Self {
            table,
            controller: Mutex::new(controller),
            config,
            debug: false,
        })
    }

    /// Toggle the debug banner
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Create the dashboard router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Page
        .route("/", get(http::index))
        // Dashboard API
        .route("/api/layout", get(http::get_layout))
        .route("/api/dataset", get(http::get_dataset))
        .route("/api/panels/{id}", get(http::get_panel))
        .route("/api/panels/{id}/events", post(http::post_event))
        // System
        .route("/health", get(http::health))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> ServerResult<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    tracing::info!("Dashboard listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

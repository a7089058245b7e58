//! Churn Dashboard Binary
//!
//! Loads the Telco customer file and serves the dashboard.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use churn_core::DashboardConfig;
use churn_server::{serve, AppState, ServerResult};
use churn_stats::TableSummary;

#[derive(Parser, Debug)]
#[command(author, version, about = "Telco customer churn dashboard", long_about = None)]
struct Cli {
    /// Verbose logging and a debug banner on the page
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ServerResult<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = DashboardConfig::from_env()?;
    tracing::debug!(?config, "configuration resolved");

    let table = Arc::new(churn_io::open_file(&config.data.path)?);
    let summary = TableSummary::from_table(&table);
    tracing::info!(
        path = %config.data.path.display(),
        customers = summary.customers,
        missing_total_charges = summary.total_charges.missing,
        "dataset loaded"
    );

    let addr = config.server.addr.clone();
    let state = Arc::new(AppState::new(table, config)?.with_debug(cli.debug));
    serve(&addr, state).await
}

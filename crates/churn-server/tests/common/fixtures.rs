//! Shared fixtures for router tests

use std::path::PathBuf;
use std::sync::Arc;

use churn_core::DashboardConfig;
use churn_server::AppState;

/// Path to a fixture shipped with churn-io
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("churn-io")
        .join("test_fixtures")
        .join(name)
}

/// App state over the 25-row Telco sample
pub fn sample_state() -> Arc<AppState> {
    let mut config = DashboardConfig::default();
    config.data.path = fixture_path("telco_sample.csv");

    let table = churn_io::open_file(&config.data.path).expect("sample fixture loads");
    Arc::new(AppState::new(Arc::new(table), config).expect("initial render succeeds"))
}

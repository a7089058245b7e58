//! Shared fixtures for controller tests

use std::path::PathBuf;
use std::sync::Arc;

use churn_core::{ChartConfig, Controller};
use churn_io::{open_file, CustomerTable};

/// Path to a fixture shipped with churn-io
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("churn-io")
        .join("test_fixtures")
        .join(name)
}

/// The 25-row Telco sample
pub fn sample_table() -> Arc<CustomerTable> {
    Arc::new(open_file(fixture_path("telco_sample.csv")).expect("sample fixture loads"))
}

/// A controller over the sample with default settings
#[allow(dead_code)]
pub fn sample_controller() -> Controller {
    Controller::new(sample_table(), ChartConfig::default()).expect("controller renders")
}

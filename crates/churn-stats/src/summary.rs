//! Summary statistics for numeric columns
//!
//! Used for the load-time data-quality report and the dataset endpoint.

use churn_io::CustomerTable;
use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of usable values
    pub count: usize,
    /// Number of missing/non-finite values
    pub missing: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data
    pub fn from_data(data: &[f64]) -> Self {
        let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = data.len() - finite.len();

        if finite.is_empty() {
            return Self::empty(missing);
        }

        let count = finite.len();
        let mean = finite.iter().sum::<f64>() / count as f64;
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count,
            missing,
            min,
            max,
            mean,
        }
    }

    /// Compute summary statistics where `None` marks a missing value
    pub fn from_optional(data: &[Option<f64>]) -> Self {
        let values: Vec<f64> = data.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        Self::from_data(&values)
    }

    /// Create empty statistics (all NaN)
    fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
        }
    }
}

/// Summaries of the three numeric columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub customers: usize,
    pub tenure: SummaryStats,
    pub monthly_charges: SummaryStats,
    pub total_charges: SummaryStats,
}

impl TableSummary {
    /// Summarize a customer table
    pub fn from_table(table: &CustomerTable) -> Self {
        let records = table.records();
        let tenure: Vec<f64> = records.iter().map(|r| r.tenure as f64).collect();
        let monthly: Vec<f64> = records.iter().map(|r| r.monthly_charges).collect();
        let total: Vec<Option<f64>> = records.iter().map(|r| r.total_charges).collect();

        Self {
            customers: table.len(),
            tenure: SummaryStats::from_data(&tenure),
            monthly_charges: SummaryStats::from_data(&monthly),
            total_charges: SummaryStats::from_optional(&total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats_basic() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let stats = SummaryStats::from_data(&data);

        assert_eq!(stats.count, 10);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert!((stats.mean - 5.5).abs() < 1e-10);
    }

    #[test]
    fn test_summary_stats_with_missing() {
        let stats = SummaryStats::from_optional(&[Some(1.0), None, Some(5.0), None]);

        assert_eq!(stats.count, 2);
        assert_eq!(stats.missing, 2);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_summary_stats_empty() {
        let stats = SummaryStats::from_data(&[f64::NAN]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.missing, 1);
        assert!(stats.mean.is_nan());
    }
}

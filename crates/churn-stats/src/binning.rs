//! Histogram binning
//!
//! The aggregation layer never computes bin edges. A histogram is a numeric
//! series plus a bin width; placing the bins is left to the chart renderer.
//!
//! The bin width itself comes from a [`BinPolicy`]: a default used before the
//! user has zoomed, and an ordered table of span thresholds consulted once a
//! visible x-axis range is known.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Visible x-axis bounds reported by a zoom or pan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub lower: f64,
    pub upper: f64,
}

impl VisibleRange {
    /// Create a new range
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Width of the visible window
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Bin-width selection policy for one histogram
///
/// `steps` holds `(threshold, width)` pairs, smallest threshold first. The
/// first threshold the span is strictly below wins; spans beyond every
/// threshold get `fallback`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinPolicy {
    pub default_width: f64,
    pub steps: &'static [(f64, f64)],
    pub fallback: f64,
}

impl BinPolicy {
    /// Tenure histogram: months
    pub const TENURE: BinPolicy = BinPolicy {
        default_width: 5.0,
        steps: &[(20.0, 1.0), (50.0, 2.0), (100.0, 5.0)],
        fallback: 10.0,
    };

    /// Charge histograms: dollars
    pub const CHARGES: BinPolicy = BinPolicy {
        default_width: 100.0,
        steps: &[(500.0, 50.0), (1000.0, 100.0)],
        fallback: 200.0,
    };

    /// Bin width for a visible span
    pub fn width_for_span(&self, span: f64) -> f64 {
        self.steps
            .iter()
            .find(|(threshold, _)| span < *threshold)
            .map(|&(_, width)| width)
            .unwrap_or(self.fallback)
    }

    /// Bin width for the most recent visible range, if any
    pub fn width_for_range(&self, range: Option<VisibleRange>) -> f64 {
        match range {
            Some(range) => self.width_for_span(range.span()),
            None => self.default_width,
        }
    }
}

/// A numeric series ready for histogram display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedSeries {
    /// Finite values in input order
    pub values: Vec<f64>,
    /// Width of every bin
    pub bin_width: f64,
}

impl BinnedSeries {
    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Pair a numeric series with a bin width
///
/// Non-finite values are dropped.
pub fn bin_numeric(values: &[f64], bin_width: f64) -> StatsResult<BinnedSeries> {
    if !bin_width.is_finite() || bin_width <= 0.0 {
        return Err(StatsError::InvalidBinWidth(bin_width));
    }

    Ok(BinnedSeries {
        values: values.iter().copied().filter(|v| v.is_finite()).collect(),
        bin_width,
    })
}

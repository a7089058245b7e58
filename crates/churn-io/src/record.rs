//! Customer records and the churn label

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary churn label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChurnLabel {
    /// Customer stayed ("No")
    #[serde(rename = "No")]
    Retained,
    /// Customer left ("Yes")
    #[serde(rename = "Yes")]
    Churned,
}

impl ChurnLabel {
    /// Both labels, churned first as the histograms overlay them
    pub const OVERLAY_ORDER: [ChurnLabel; 2] = [ChurnLabel::Churned, ChurnLabel::Retained];

    /// Parse the dataset's Yes/No text
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Yes" => Some(ChurnLabel::Churned),
            "No" => Some(ChurnLabel::Retained),
            _ => None,
        }
    }

    /// Text form used in the dataset and on the charts
    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnLabel::Churned => "Yes",
            ChurnLabel::Retained => "No",
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One customer row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Customer identifier
    pub customer_id: String,

    /// Categorical values, aligned with the table's categorical columns
    pub categories: Vec<String>,

    /// Tenure in months
    pub tenure: u32,

    /// Monthly charge amount
    pub monthly_charges: f64,

    /// Total charge amount; `None` when the source text was not a number
    pub total_charges: Option<f64>,

    /// Churn label
    pub churn: ChurnLabel,
}

impl CustomerRecord {
    /// Get a categorical value by its position in the categorical column list
    pub fn category(&self, index: usize) -> Option<&str> {
        self.categories.get(index).map(|s| s.as_str())
    }
}

/// Coerce numeric text, treating blanks and garbage as missing
pub fn parse_numeric_text(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Map a 0/1 flag to its No/Yes label
pub fn flag_label(raw: &str) -> Option<&'static str> {
    match raw.trim() {
        "1" => Some("Yes"),
        "0" => Some("No"),
        _ => None,
    }
}

//! Panels and the page layout
//!
//! The page is a fixed vertical stack of five chart panels and one dropdown.

use std::fmt;
use std::str::FromStr;

use churn_io::CustomerTable;
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Identifier of a chart panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PanelId {
    /// Donut of churn share
    ChurnPie,
    /// Grouped bars driven by the dropdown
    CategoryBars,
    /// Tenure histogram with zoom-driven bins
    TenureHistogram,
    /// Monthly-charges histogram
    MonthlyCharges,
    /// High total-charges histogram with zoom-driven bins
    HighTotalCharges,
}

impl PanelId {
    /// Panels in page order
    pub const ALL: [PanelId; 5] = [
        PanelId::ChurnPie,
        PanelId::CategoryBars,
        PanelId::TenureHistogram,
        PanelId::MonthlyCharges,
        PanelId::HighTotalCharges,
    ];

    /// Element id used on the page and in URLs
    pub fn dom_id(&self) -> &'static str {
        match self {
            PanelId::ChurnPie => "churn-pie-chart",
            PanelId::CategoryBars => "bar-graph",
            PanelId::TenureHistogram => "dynamic-histogram",
            PanelId::MonthlyCharges => "monthly-charges-churn",
            PanelId::HighTotalCharges => "high-totalcharges-graph",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

impl FromStr for PanelId {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelId::ALL
            .into_iter()
            .find(|p| p.dom_id() == s)
            .ok_or_else(|| DashboardError::UnknownPanel(s.to_string()))
    }
}

impl From<PanelId> for String {
    fn from(panel: PanelId) -> Self {
        panel.dom_id().to_string()
    }
}

impl TryFrom<String> for PanelId {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One panel on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub id: PanelId,
    /// Heading shown above the chart
    pub heading: Option<String>,
    /// Whether the mouse wheel zooms the chart
    pub scroll_zoom: bool,
    /// Whether the panel owns the dropdown
    pub has_dropdown: bool,
}

/// The dropdown that selects the bar chart's column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownSpec {
    pub id: String,
    pub label: String,
    pub placeholder: String,
    pub options: Vec<String>,
    pub value: String,
}

/// The whole page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub title: String,
    pub dropdown: DropdownSpec,
    pub panels: Vec<PanelSpec>,
}

impl PageLayout {
    /// Build the page for a table, preselecting `default_column`
    pub fn new(table: &CustomerTable, default_column: &str) -> Self {
        let panel = |id, heading: Option<&str>, scroll_zoom| PanelSpec {
            id,
            heading: heading.map(String::from),
            scroll_zoom,
            has_dropdown: id == PanelId::CategoryBars,
        };

        Self {
            title: "Telco Customer Churn".to_string(),
            dropdown: DropdownSpec {
                id: "dropdown".to_string(),
                label: "Select a column for analysis".to_string(),
                placeholder: "Select a column for analysis".to_string(),
                options: table.categorical_columns().to_vec(),
                value: default_column.to_string(),
            },
            panels: vec![
                panel(PanelId::ChurnPie, None, false),
                panel(PanelId::CategoryBars, None, false),
                panel(
                    PanelId::TenureHistogram,
                    Some("Customer Tenure Histogram"),
                    true,
                ),
                panel(PanelId::MonthlyCharges, Some("Churn by Monthly Charges"), false),
                panel(
                    PanelId::HighTotalCharges,
                    Some("High TotalCharges Customer Retention Analysis"),
                    true,
                ),
            ],
        }
    }
}

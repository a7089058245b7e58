//! UI events delivered by the page
//!
//! The browser forwards two kinds of events: a dropdown selection and
//! Plotly's `relayoutData` after a zoom, pan or reset. Relayout payloads are
//! loose key/value maps; [`RangeUpdate::from_relayout`] extracts the one
//! thing the histograms care about.

use std::fmt;

use churn_stats::VisibleRange;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const RANGE_LOWER: &str = "xaxis.range[0]";
const RANGE_UPPER: &str = "xaxis.range[1]";
const AUTORANGE: &str = "xaxis.autorange";

/// An event targeted at one panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UiEvent {
    /// The dropdown selected a new column
    Dropdown { value: String },
    /// The chart's axes were changed by the user
    Relayout {
        #[serde(default)]
        data: Map<String, Value>,
    },
}

impl UiEvent {
    /// Kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Dropdown { .. } => EventKind::Dropdown,
            UiEvent::Relayout { .. } => EventKind::Relayout,
        }
    }

    /// Convenience constructor for a zoom to `[lower, upper]`
    pub fn zoom(lower: f64, upper: f64) -> Self {
        let mut data = Map::new();
        data.insert(RANGE_LOWER.to_string(), Value::from(lower));
        data.insert(RANGE_UPPER.to_string(), Value::from(upper));
        UiEvent::Relayout { data }
    }
}

/// Event kind, used as half of the handler registry key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Dropdown,
    Relayout,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Dropdown => f.write_str("dropdown"),
            EventKind::Relayout => f.write_str("relayout"),
        }
    }
}

/// What a relayout payload means for the x-axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeUpdate {
    /// Both bounds present: a new visible range
    Zoomed(VisibleRange),
    /// Zoom was reset to the full data range
    Reset,
    /// Nothing usable (one bound missing, non-numeric bounds, other keys)
    Ignored,
}

impl RangeUpdate {
    /// Interpret a Plotly `relayoutData` map
    pub fn from_relayout(data: &Map<String, Value>) -> Self {
        let lower = data.get(RANGE_LOWER).and_then(Value::as_f64);
        let upper = data.get(RANGE_UPPER).and_then(Value::as_f64);

        match (lower, upper) {
            (Some(lower), Some(upper)) => RangeUpdate::Zoomed(VisibleRange::new(lower, upper)),
            _ if data.get(AUTORANGE).and_then(Value::as_bool) == Some(true) => RangeUpdate::Reset,
            _ => RangeUpdate::Ignored,
        }
    }
}

//! Declarative chart specifications
//!
//! A [`Figure`] is a trace list plus layout metadata. It serializes to the
//! JSON shape Plotly.js accepts in `Plotly.newPlot`/`Plotly.react`, so the
//! browser only has to hand it over. Figures are plain values: every
//! recomputation builds a new one and replaces the old wholesale.

use serde::{Deserialize, Serialize};

use crate::palette::Color;

/// A complete chart: traces plus layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Create an empty figure
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trace
    pub fn with_trace(mut self, trace: impl Into<Trace>) -> Self {
        self.data.push(trace.into());
        self
    }

    /// Replace the layout
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Serialize to Plotly JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One trace of a figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Bar(BarTrace),
    Histogram(HistogramTrace),
}

impl From<PieTrace> for Trace {
    fn from(trace: PieTrace) -> Self {
        Trace::Pie(trace)
    }
}

impl From<BarTrace> for Trace {
    fn from(trace: BarTrace) -> Self {
        Trace::Bar(trace)
    }
}

impl From<HistogramTrace> for Trace {
    fn from(trace: HistogramTrace) -> Self {
        Trace::Histogram(trace)
    }
}

/// Pie or donut slices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieTrace {
    pub values: Vec<usize>,
    pub labels: Vec<String>,
    /// Fraction of the radius cut out of the middle; 0 is a full pie
    pub hole: f64,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
}

/// Bars of one legend group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<usize>,
    pub name: String,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offsetgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

/// Raw values binned by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramTrace {
    pub x: Vec<f64>,
    pub name: String,
    pub marker: Marker,
    /// `None` lets the renderer choose the bins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xbins: Option<XBins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Fixed-width histogram bins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XBins {
    pub size: f64,
}

/// Trace coloring
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Per-slice colors (pie traces)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl Marker {
    /// Single color for the whole trace
    pub fn solid(color: Color) -> Self {
        Self {
            color: Some(color.to_hex()),
            colors: None,
        }
    }

    /// One color per slice
    pub fn per_slice(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            color: None,
            colors: Some(colors.into_iter().map(|c| c.to_hex()).collect()),
        }
    }
}

/// How bars of different traces share an x position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
    Overlay,
}

/// Text with optional styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Axis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

impl Axis {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
        }
    }
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: u32,
    pub color: String,
}

/// Free-floating text placed in paper coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub showarrow: bool,
    pub font: Font,
}

/// Legend metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: Title,
}

/// Figure layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<BarMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    /// Keeps the user's zoom across `Plotly.react` calls while it is unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uirevision: Option<String>,
}

impl Layout {
    /// Layout with a title and both axis titles
    pub fn titled(title: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            title: Some(Title::new(title)),
            xaxis: Some(Axis::titled(x)),
            yaxis: Some(Axis::titled(y)),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trace_serializes_with_type_tag() {
        let trace: Trace = HistogramTrace {
            x: vec![1.0, 2.0],
            name: "Yes - Churn".to_string(),
            marker: Marker::solid(Color::rgb(0xFF, 0x7F, 0x50)),
            xbins: Some(XBins { size: 5.0 }),
            opacity: Some(0.6),
        }
        .into();

        assert_eq!(
            serde_json::to_value(&trace).unwrap(),
            json!({
                "type": "histogram",
                "x": [1.0, 2.0],
                "name": "Yes - Churn",
                "marker": {"color": "#FF7F50"},
                "xbins": {"size": 5.0},
                "opacity": 0.6
            })
        );
    }

    #[test]
    fn test_empty_layout_fields_are_omitted() {
        let layout = Layout {
            barmode: Some(BarMode::Overlay),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&layout).unwrap(),
            json!({"barmode": "overlay"})
        );
    }

    #[test]
    fn test_titled_layout() {
        let layout = Layout::titled("Title", "X", "Y");
        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value["title"]["text"], "Title");
        assert_eq!(value["xaxis"]["title"]["text"], "X");
        assert_eq!(value["yaxis"]["title"]["text"], "Y");
    }
}

//! Fixed color palette shared by every chart
//!
//! Churned customers are drawn in a warm coral, retained customers in a cool
//! steel blue, and group totals in neutral gray.

use churn_io::ChurnLabel;
use churn_stats::ChurnCategory;
use serde::{Deserialize, Serialize};

/// An opaque RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Churned customers (#FF7F50)
pub const CHURNED: Color = Color::rgb(0xFF, 0x7F, 0x50);
/// Retained customers (#4682B4)
pub const RETAINED: Color = Color::rgb(0x46, 0x82, 0xB4);
/// Group totals (#808080)
pub const TOTAL: Color = Color::rgb(0x80, 0x80, 0x80);
/// Donut center annotation (#000080)
pub const ANNOTATION: Color = Color::rgb(0x00, 0x00, 0x80);

/// Color for a churn label
pub fn label_color(label: ChurnLabel) -> Color {
    match label {
        ChurnLabel::Churned => CHURNED,
        ChurnLabel::Retained => RETAINED,
    }
}

/// Color for a display category
pub fn category_color(category: ChurnCategory) -> Color {
    match category {
        ChurnCategory::Total => TOTAL,
        ChurnCategory::Retained => RETAINED,
        ChurnCategory::Churned => CHURNED,
    }
}

//! churn-core - Charts and interaction for the churn dashboard
//!
//! This crate turns the customer table into Plotly figures and keeps them
//! current as the user interacts with the page.
//!
//! # Key Components
//!
//! - **Figure**: declarative chart specification (traces + layout) serialized
//!   as Plotly JSON
//! - **Charts**: one pure builder per panel
//! - **Palette**: fixed churn/retained/total colors shared by every chart
//! - **Panel**: panel identifiers and the page layout
//! - **Event**: dropdown and relayout events from the browser
//! - **Controller**: per-panel state plus the `(panel, event kind)` handler
//!   registry
//! - **Config**: TOML/env configuration
//!
//! # Interaction
//!
//! Only three panels react to events:
//!
//! - the category bars, to the dropdown
//! - the tenure histogram, to zoom and pan
//! - the high total-charges histogram, to zoom and pan
//!
//! The donut and the monthly-charges histogram are rendered once.

pub mod charts;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod figure;
pub mod palette;
pub mod panel;

pub use charts::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use event::*;
pub use figure::*;
pub use palette::{Color, ANNOTATION, CHURNED, RETAINED, TOTAL};
pub use panel::*;

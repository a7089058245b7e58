//! churn-stats - Aggregation layer for the churn dashboard
//!
//! This crate turns the customer table into the numbers the charts draw:
//!
//! - **Grouped counts**: customers per (category value, churn label), plus totals
//! - **Binning**: numeric series paired with a bin width, and the zoom-driven
//!   bin-width policies
//! - **Summary**: count/missing/min/max/mean of a numeric column
//!
//! # Design
//!
//! Every function here is a pure function of the table. Results are
//! recomputed on demand and never cached.

pub mod aggregate;
pub mod binning;
pub mod error;
pub mod summary;

pub use aggregate::*;
pub use binning::*;
pub use error::*;
pub use summary::*;

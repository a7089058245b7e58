//! churn-io - Data I/O for the churn dashboard
//!
//! This crate loads the Telco customer table into memory:
//!
//! - **Schema**: an explicit declared schema giving every column a semantic role
//! - **CSV**: comma- or tab-delimited reader that coerces values at load time
//! - **Table**: the immutable, in-memory `CustomerTable` shared by the dashboard
//!
//! # Design
//!
//! Column discovery never inspects runtime types. The categorical columns
//! offered for analysis are exactly those the schema declares as categorical,
//! and the total-charges text is coerced to a numeric-or-missing value once,
//! while the file is read.

pub mod csv_reader;
pub mod reader;
pub mod record;
pub mod schema;
pub mod table;

pub use csv_reader::CsvReader;
pub use reader::*;
pub use record::*;
pub use schema::*;
pub use table::*;

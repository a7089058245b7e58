//! The in-memory customer table

use crate::record::{ChurnLabel, CustomerRecord};
use crate::schema::TableSchema;

/// Immutable table of customer records
///
/// Built once at load time. The record count never changes afterwards.
#[derive(Debug, Clone)]
pub struct CustomerTable {
    schema: TableSchema,
    categorical: Vec<String>,
    records: Vec<CustomerRecord>,
    source: Option<String>,
}

impl CustomerTable {
    /// Create a table from already-coerced records
    pub fn new(schema: TableSchema, records: Vec<CustomerRecord>) -> Self {
        let categorical = schema
            .categorical_columns()
            .into_iter()
            .map(String::from)
            .collect();

        Self {
            schema,
            categorical,
            records,
            source: None,
        }
    }

    /// Remember where the table was read from
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the schema
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Get the source path (if loaded from a file)
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Number of customers
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in file order
    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    /// Names of the columns available for grouped analysis
    pub fn categorical_columns(&self) -> &[String] {
        &self.categorical
    }

    /// Position of a categorical column, if it is one
    pub fn categorical_index(&self, column: &str) -> Option<usize> {
        self.categorical.iter().position(|c| c == column)
    }

    /// Value of a categorical `column` for one record
    ///
    /// `None` when `column` is not a categorical column.
    pub fn category_value<'a>(&self, record: &'a CustomerRecord, column: &str) -> Option<&'a str> {
        self.categorical_index(column)
            .and_then(|index| record.category(index))
    }

    /// Records with the given churn label
    pub fn with_churn(&self, label: ChurnLabel) -> impl Iterator<Item = &CustomerRecord> {
        self.records.iter().filter(move |r| r.churn == label)
    }

    /// Tenure of every customer with the given churn label
    pub fn tenure_by_churn(&self, label: ChurnLabel) -> Vec<f64> {
        self.with_churn(label).map(|r| r.tenure as f64).collect()
    }

    /// Monthly charges of every customer with the given churn label
    pub fn monthly_charges_by_churn(&self, label: ChurnLabel) -> Vec<f64> {
        self.with_churn(label).map(|r| r.monthly_charges).collect()
    }

    /// Total charges above `threshold` for the given churn label
    ///
    /// Missing total charges never pass the filter.
    pub fn total_charges_above(&self, label: ChurnLabel, threshold: f64) -> Vec<f64> {
        self.with_churn(label)
            .filter_map(|r| r.total_charges)
            .filter(|&v| v > threshold)
            .collect()
    }

    /// Number of customers whose total charges could not be parsed
    pub fn missing_total_charges(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.total_charges.is_none())
            .count()
    }
}

//! Declared schema for the customer table

use serde::{Deserialize, Serialize};

/// Customer identifier column
pub const CUSTOMER_ID: &str = "customerID";
/// Senior-citizen 0/1 flag column
pub const SENIOR_CITIZEN: &str = "SeniorCitizen";
/// Tenure in months
pub const TENURE: &str = "tenure";
/// Monthly charge amount
pub const MONTHLY_CHARGES: &str = "MonthlyCharges";
/// Total charge amount, stored as text in the source file
pub const TOTAL_CHARGES: &str = "TotalCharges";
/// Churn label column
pub const CHURN: &str = "Churn";

/// Schema describing the structure of the customer table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Column descriptors in file order
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Create a new schema
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// The fixed schema of the Telco customer churn dataset
    pub fn telco() -> Self {
        use ColumnRole::*;

        Self::new(vec![
            ColumnDescriptor::new(CUSTOMER_ID, Identifier),
            ColumnDescriptor::new("gender", Categorical),
            ColumnDescriptor::new(SENIOR_CITIZEN, BinaryFlag),
            ColumnDescriptor::new("Partner", Categorical),
            ColumnDescriptor::new("Dependents", Categorical),
            ColumnDescriptor::new(TENURE, Integer),
            ColumnDescriptor::new("PhoneService", Categorical),
            ColumnDescriptor::new("MultipleLines", Categorical),
            ColumnDescriptor::new("InternetService", Categorical),
            ColumnDescriptor::new("OnlineSecurity", Categorical),
            ColumnDescriptor::new("OnlineBackup", Categorical),
            ColumnDescriptor::new("DeviceProtection", Categorical),
            ColumnDescriptor::new("TechSupport", Categorical),
            ColumnDescriptor::new("StreamingTV", Categorical),
            ColumnDescriptor::new("StreamingMovies", Categorical),
            ColumnDescriptor::new("Contract", Categorical),
            ColumnDescriptor::new("PaperlessBilling", Categorical),
            ColumnDescriptor::new("PaymentMethod", Categorical),
            ColumnDescriptor::new(MONTHLY_CHARGES, Numeric),
            ColumnDescriptor::new(TOTAL_CHARGES, NumericText),
            ColumnDescriptor::new(CHURN, ChurnLabel),
        ])
    }

    /// Columns available for grouped analysis, in file order
    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.role.is_categorical())
            .map(|c| c.name.as_str())
            .collect()
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::telco()
    }
}

/// Descriptor for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name as it appears in the header
    pub name: String,

    /// Semantic role
    pub role: ColumnRole,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, role: ColumnRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Semantic role of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Row identifier, never analyzed
    Identifier,
    /// Free text category
    Categorical,
    /// 0/1 flag exposed as a No/Yes category
    BinaryFlag,
    /// Whole number
    Integer,
    /// Floating point number
    Numeric,
    /// Number stored as text that may be blank
    NumericText,
    /// The two-valued churn label
    ChurnLabel,
}

impl ColumnRole {
    /// Check if values of this role are offered as categories
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            ColumnRole::Categorical | ColumnRole::BinaryFlag | ColumnRole::ChurnLabel
        )
    }
}

//! CSV file reader driven by the declared schema

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::reader::{IoError, IoResult};
use crate::record::{flag_label, parse_numeric_text, ChurnLabel, CustomerRecord};
use crate::schema::{
    ColumnRole, TableSchema, CHURN, CUSTOMER_ID, MONTHLY_CHARGES, TENURE, TOTAL_CHARGES,
};
use crate::table::CustomerTable;

/// CSV file reader
pub struct CsvReader {
    path: String,
    schema: TableSchema,
    delimiter: u8,
}

impl CsvReader {
    /// Open a delimited file with the given delimiter
    pub fn open_with_options(path: impl AsRef<Path>, delimiter: u8) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound(path.display().to_string()));
        }

        Ok(Self {
            path: path.display().to_string(),
            schema: TableSchema::telco(),
            delimiter,
        })
    }

    /// Read every row into a customer table
    pub fn read_table(&self) -> IoResult<CustomerTable> {
        let file = File::open(&self.path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        let table = read_records(BufReader::new(file), self.delimiter, self.schema.clone())?;
        Ok(table.with_source(self.path.clone()))
    }

    /// Parse an in-memory comma-delimited document
    pub fn parse_str(text: &str) -> IoResult<CustomerTable> {
        read_records(text.as_bytes(), b',', TableSchema::telco())
    }
}

/// Header positions of every column the loader needs
struct ColumnLayout {
    id: usize,
    tenure: usize,
    monthly_charges: usize,
    total_charges: usize,
    churn: usize,
    categorical: Vec<(usize, ColumnRole)>,
}

impl ColumnLayout {
    fn resolve(schema: &TableSchema, headers: &csv::StringRecord) -> IoResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| IoError::MissingColumn(name.to_string()))
        };

        // Every declared column must be present, even ones we only skip
        for column in &schema.columns {
            find(&column.name)?;
        }

        let categorical = schema
            .columns
            .iter()
            .filter(|c| c.role.is_categorical())
            .map(|c| Ok((find(&c.name)?, c.role)))
            .collect::<IoResult<Vec<_>>>()?;

        Ok(Self {
            id: find(CUSTOMER_ID)?,
            tenure: find(TENURE)?,
            monthly_charges: find(MONTHLY_CHARGES)?,
            total_charges: find(TOTAL_CHARGES)?,
            churn: find(CHURN)?,
            categorical,
        })
    }
}

fn read_records<R: Read>(
    input: R,
    delimiter: u8,
    schema: TableSchema,
) -> IoResult<CustomerTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| IoError::InvalidFormat(e.to_string()))?
        .clone();
    let layout = ColumnLayout::resolve(&schema, &headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| IoError::InvalidRecord {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        records.push(parse_row(&row, &layout, line)?);
    }

    Ok(CustomerTable::new(schema, records))
}

fn parse_row(row: &csv::StringRecord, layout: &ColumnLayout, line: u64) -> IoResult<CustomerRecord> {
    let field = |index: usize| row.get(index).unwrap_or("");
    let invalid = |message: String| IoError::InvalidRecord { line, message };

    let tenure = field(layout.tenure)
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid(format!("{}: {}", TENURE, e)))?;

    let monthly_charges = field(layout.monthly_charges)
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(format!("{}: {}", MONTHLY_CHARGES, e)))?;

    let churn = ChurnLabel::parse(field(layout.churn))
        .ok_or_else(|| invalid(format!("{}: unexpected label {:?}", CHURN, field(layout.churn))))?;

    let categories = layout
        .categorical
        .iter()
        .map(|&(index, role)| {
            let raw = field(index);
            match role {
                ColumnRole::BinaryFlag => flag_label(raw)
                    .map(String::from)
                    .ok_or_else(|| invalid(format!("expected 0/1 flag, got {:?}", raw))),
                _ => Ok(raw.trim().to_string()),
            }
        })
        .collect::<IoResult<Vec<_>>>()?;

    Ok(CustomerRecord {
        customer_id: field(layout.id).trim().to_string(),
        categories,
        tenure,
        monthly_charges,
        total_charges: parse_numeric_text(field(layout.total_charges)),
        churn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "customerID,gender,SeniorCitizen,Partner,Dependents,tenure,PhoneService,MultipleLines,InternetService,OnlineSecurity,OnlineBackup,DeviceProtection,TechSupport,StreamingTV,StreamingMovies,Contract,PaperlessBilling,PaymentMethod,MonthlyCharges,TotalCharges,Churn";

    fn doc(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_parse_rows_and_normalize_flag() {
        let text = doc(&[
            "7590-VHVEG,Female,0,Yes,No,1,No,No phone service,DSL,No,Yes,No,No,No,No,Month-to-month,Yes,Electronic check,29.85,29.85,No",
            "8779-QRDMV,Male,1,No,No,1,No,No phone service,DSL,No,No,Yes,No,No,Yes,Month-to-month,Yes,Electronic check,39.65,39.65,Yes",
        ]);
        let table = CsvReader::parse_str(&text).unwrap();

        assert_eq!(table.len(), 2);
        let senior = table.categorical_index("SeniorCitizen").unwrap();
        assert_eq!(table.records()[0].category(senior), Some("No"));
        assert_eq!(table.records()[1].category(senior), Some("Yes"));
        assert_eq!(table.records()[1].churn, ChurnLabel::Churned);

        let churn = table.categorical_index("Churn").unwrap();
        assert_eq!(table.records()[1].category(churn), Some("Yes"));
    }

    #[test]
    fn test_blank_total_charges_become_missing() {
        let text = doc(&[
            "4472-LVYGI,Female,0,Yes,Yes,0,No,No phone service,DSL,Yes,No,Yes,Yes,Yes,No,Two year,Yes,Bank transfer (automatic),52.55, ,No",
        ]);
        let table = CsvReader::parse_str(&text).unwrap();

        assert_eq!(table.records()[0].total_charges, None);
        assert_eq!(table.records()[0].tenure, 0);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let text = "customerID,gender\n1,Male";
        let result = CsvReader::parse_str(text);
        assert!(matches!(result, Err(IoError::MissingColumn(_))));
    }

    #[test]
    fn test_bad_tenure_reports_line() {
        let text = doc(&[
            "7590-VHVEG,Female,0,Yes,No,one,No,No phone service,DSL,No,Yes,No,No,No,No,Month-to-month,Yes,Electronic check,29.85,29.85,No",
        ]);
        match CsvReader::parse_str(&text) {
            Err(IoError::InvalidRecord { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("tenure"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_bad_flag_and_label_are_rejected() {
        let bad_flag = doc(&[
            "7590-VHVEG,Female,2,Yes,No,1,No,No phone service,DSL,No,Yes,No,No,No,No,Month-to-month,Yes,Electronic check,29.85,29.85,No",
        ]);
        assert!(CsvReader::parse_str(&bad_flag).is_err());

        let bad_label = doc(&[
            "7590-VHVEG,Female,0,Yes,No,1,No,No phone service,DSL,No,Yes,No,No,No,No,Month-to-month,Yes,Electronic check,29.85,29.85,Maybe",
        ]);
        assert!(CsvReader::parse_str(&bad_label).is_err());
    }

    #[test]
    fn test_ragged_row_is_rejected() {
        let text = doc(&["7590-VHVEG,Female,0"]);
        assert!(matches!(
            CsvReader::parse_str(&text),
            Err(IoError::InvalidRecord { .. })
        ));
    }
}

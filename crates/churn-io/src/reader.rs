//! Error types and format detection for table loading

use std::path::Path;

use thiserror::Error;

use crate::csv_reader::CsvReader;
use crate::table::CustomerTable;

/// Errors that can occur while loading the customer table
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Missing column in header: {0}")]
    MissingColumn(String),

    #[error("Invalid record at line {line}: {message}")]
    InvalidRecord { line: u64, message: String },
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Open a delimited file and load it as a customer table
///
/// The delimiter is chosen from the file extension.
pub fn open_file(path: impl AsRef<Path>) -> IoResult<CustomerTable> {
    let path = path.as_ref();
    let delimiter = delimiter_for(path)?;
    CsvReader::open_with_options(path, delimiter)?.read_table()
}

/// Map a file extension to its field delimiter
pub fn delimiter_for(path: &Path) -> IoResult<u8> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(b','),
        "tsv" => Ok(b'\t'),
        _ => Err(IoError::InvalidFormat(format!(
            "Unknown file extension: {}",
            extension
        ))),
    }
}

/// List supported file extensions
pub fn supported_extensions() -> Vec<&'static str> {
    vec!["csv", "tsv"]
}

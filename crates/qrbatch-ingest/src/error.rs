//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort reading a dataset. All of them are fatal to a run.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Input Checks ===
    /// Extension is not `.xlsx`, `.xls` or `.csv`.
    #[error("unsupported file format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input file has zero bytes.
    #[error("input file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// Input file exceeds the configured size limit.
    #[error("input file {path} is {size} bytes, limit is {max_size} bytes")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Failed to read file metadata or contents.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing ===
    /// The CSV reader failed outside of a single data row.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The workbook could not be opened or its first sheet read.
    #[error("failed to read spreadsheet {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// The workbook has no worksheets.
    #[error("spreadsheet has no worksheets: {path}")]
    NoWorksheet { path: PathBuf },

    // === Dataset Shape ===
    /// Header present but no data rows.
    #[error("dataset has no data rows: {path}")]
    EmptyDataset { path: PathBuf },

    /// Header lacks columns the generator needs.
    #[error("required columns missing from {path}: {}", columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            path: PathBuf::from("/uploads/data.txt"),
            extension: "txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file format 'txt': /uploads/data.txt"
        );
    }

    #[test]
    fn test_missing_columns_display() {
        let err = IngestError::MissingColumns {
            path: PathBuf::from("data.csv"),
            columns: vec!["NOMOR KK".to_string(), "KODE QR".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "required columns missing from data.csv: NOMOR KK, KODE QR"
        );
    }
}

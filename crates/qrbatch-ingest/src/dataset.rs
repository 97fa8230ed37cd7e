//! Format dispatch and record assembly.

use std::path::Path;
use std::time::Instant;

use qrbatch_model::{FieldNames, InputFormat, Record};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::guard::{DEFAULT_MAX_FILE_SIZE, check_input_file};
use crate::{delimited, spreadsheet};

/// Header and data rows as read from the file, before pairing into records.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Data rows dropped as malformed.
    pub skipped_rows: usize,
}

/// Options controlling how a dataset is read.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Upper bound on input size in bytes.
    pub max_file_size: u64,
    /// Header names that must be present.
    pub required_columns: Vec<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            required_columns: Vec::new(),
        }
    }
}

impl ReadOptions {
    /// Requires the columns the generator cannot work without.
    #[must_use]
    pub fn requiring_fields(mut self, fields: &FieldNames) -> Self {
        self.required_columns = fields.required().into_iter().map(String::from).collect();
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// A fully materialized dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub format: InputFormat,
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    /// Malformed or blank data rows that were dropped while reading.
    pub skipped_rows: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads a dataset file into records, using the first row as the header.
///
/// The format is chosen from the extension alone. Fails before reading any
/// content when the extension is not recognized.
pub fn read_records(path: &Path, options: &ReadOptions) -> Result<Dataset> {
    let format = InputFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_string(),
    })?;
    let size = check_input_file(path, options.max_file_size)?;
    debug!(path = %path.display(), %format, size, "reading dataset");

    let start = Instant::now();
    let raw = match format {
        InputFormat::Delimited => delimited::read_table(path)?,
        InputFormat::Spreadsheet => spreadsheet::read_table(path)?,
    };

    if raw.skipped_rows > 0 {
        warn!(
            path = %path.display(),
            skipped_rows = raw.skipped_rows,
            "skipped unreadable rows"
        );
    }

    let headers: Vec<String> = raw.headers.iter().map(|h| normalize_header(h)).collect();
    if raw.rows.is_empty() {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    let missing: Vec<String> = options
        .required_columns
        .iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    let records: Vec<Record> = raw
        .rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|cell| normalize_cell(cell)).collect();
            Record::from_row(&headers, &cells)
        })
        .collect();

    info!(
        path = %path.display(),
        %format,
        record_count = records.len(),
        column_count = headers.len(),
        skipped_rows = raw.skipped_rows,
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );

    Ok(Dataset {
        format,
        headers,
        records,
        skipped_rows: raw.skipped_rows,
    })
}

/// Trims, drops a UTF-8 BOM, and collapses internal whitespace runs.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_header_whitespace_and_bom() {
        assert_eq!(normalize_header("\u{feff}NO IDENTITAS"), "NO IDENTITAS");
        assert_eq!(normalize_header("  NOMOR   KK "), "NOMOR KK");
        assert_eq!(normalize_header("KODE\tQR"), "KODE QR");
    }

    #[test]
    fn unsupported_extension_fails_before_io() {
        let err = read_records(Path::new("/does/not/exist.txt"), &ReadOptions::default())
            .expect_err("txt is rejected");
        match err {
            IngestError::UnsupportedFormat { extension, .. } => assert_eq!(extension, "txt"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

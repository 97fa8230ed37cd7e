//! Delimited text reading.
//!
//! Rows whose field count differs from the header are dropped and counted
//! instead of failing the whole read. Fields that are not valid UTF-8 are
//! decoded as Windows-1252.

use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use encoding_rs::WINDOWS_1252;
use tracing::debug;

use crate::dataset::RawTable;
use crate::error::{IngestError, Result};

pub fn read_table(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = decode_record(reader.byte_headers().map_err(|source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    })?);

    let mut rows = Vec::new();
    let mut skipped_rows = 0usize;
    for result in reader.byte_records() {
        match result {
            Ok(record) => rows.push(decode_record(&record)),
            Err(error) if is_row_error(&error) => {
                skipped_rows += 1;
                debug!(
                    path = %path.display(),
                    line = error.position().map(csv::Position::line),
                    %error,
                    "skipping malformed row"
                );
            }
            Err(source) => {
                return Err(IngestError::Csv {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    Ok(RawTable {
        headers,
        rows,
        skipped_rows,
    })
}

/// Row-level errors are recoverable; I/O errors are not.
fn is_row_error(error: &csv::Error) -> bool {
    !matches!(error.kind(), csv::ErrorKind::Io(_))
}

fn decode_record(record: &ByteRecord) -> Vec<String> {
    record.iter().map(decode_field).collect()
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

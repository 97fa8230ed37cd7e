//! Workbook reading via `calamine`.
//!
//! Only the first worksheet is read. Any read error aborts the whole
//! operation; there is no partial fallback. Entirely blank rows are dropped
//! and counted as skipped.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::dataset::RawTable;
use crate::error::{IngestError, Result};

pub fn read_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|source| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|source| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
        });
    };
    let headers = row_cells(header_row);

    let mut skipped_rows = 0usize;
    let rows: Vec<Vec<String>> = rows
        .map(row_cells)
        .filter(|cells| {
            let blank = cells.is_empty();
            skipped_rows += usize::from(blank);
            !blank
        })
        .collect();

    Ok(RawTable {
        headers,
        rows,
        skipped_rows,
    })
}

/// Converts a sheet row to strings, dropping trailing empty cells so a short
/// row maps only the cells it actually has.
fn row_cells(row: &[Data]) -> Vec<String> {
    let mut cells: Vec<String> = row.iter().map(cell_to_string).collect();
    while cells.last().is_some_and(|cell| cell.trim().is_empty()) {
        cells.pop();
    }
    cells
}

pub(crate) fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        // Identity numbers typed into Excel arrive as floats.
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e17 => format!("{value:.0}"),
        other => other.to_string(),
    }
}

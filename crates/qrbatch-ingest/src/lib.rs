//! Dataset ingestion for the QR batch generator.
//!
//! Reads a `.csv`, `.xlsx` or `.xls` file into an ordered list of
//! [`Record`](qrbatch_model::Record)s keyed by the first row's header names.

pub mod dataset;
pub mod delimited;
pub mod error;
pub mod guard;
pub mod spreadsheet;

pub use dataset::{Dataset, ReadOptions, read_records};
pub use error::{IngestError, Result};
pub use guard::{DEFAULT_MAX_FILE_SIZE, check_input_file};

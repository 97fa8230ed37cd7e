use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::outcome::OutcomeTally;

/// Final summary of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    #[serde(flatten)]
    pub tally: OutcomeTally,
    /// Number of records read from the dataset.
    pub records: usize,
    /// Data rows the reader dropped as malformed.
    pub skipped_rows: usize,
    pub output_dir: PathBuf,
    /// Archive file name, `<output basename>.zip`.
    pub archive_filename: String,
    pub archive_path: PathBuf,
}

impl BatchResult {
    pub fn generated(&self) -> usize {
        self.tally.generated
    }

    pub fn skipped(&self) -> usize {
        self.tally.skipped
    }

    pub fn invalid(&self) -> usize {
        self.tally.invalid
    }

    pub fn errors(&self) -> &[String] {
        &self.tally.errors
    }

    pub fn has_errors(&self) -> bool {
        self.tally.has_errors()
    }
}

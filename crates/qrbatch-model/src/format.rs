use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Input dataset format, chosen purely from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `.xlsx` or `.xls` workbook; the first worksheet is read.
    Spreadsheet,
    /// `.csv` delimited text.
    Delimited,
}

impl InputFormat {
    pub const EXTENSIONS: [&'static str; 3] = ["xlsx", "xls", "csv"];

    /// Detects the format from the extension (case-insensitive).
    ///
    /// Returns `None` for anything other than `.xlsx`, `.xls` or `.csv`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls") {
            Some(Self::Spreadsheet)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Delimited)
        } else {
            None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Spreadsheet => "spreadsheet",
            Self::Delimited => "csv",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

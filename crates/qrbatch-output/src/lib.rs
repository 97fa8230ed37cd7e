//! Output packaging for the QR batch generator.
//!
//! - **Archive**: zip of the whole output tree, written next to it as
//!   `<output basename>.zip`

mod archive;
mod error;

pub use archive::{ArchiveSummary, archive_directory, archive_location};
pub use error::{ArchiveError, Result};

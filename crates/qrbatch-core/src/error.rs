use std::path::PathBuf;

use qrbatch_ingest::IngestError;
use qrbatch_output::ArchiveError;
use thiserror::Error;

use crate::batch::BatchError;

/// Fatal errors for a generation run. Per-record problems are outcomes, not errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open audit log {path}: {source}")]
    AuditLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("failed to archive output: {0}")]
    Archive(#[from] ArchiveError),

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, GenerateError>;

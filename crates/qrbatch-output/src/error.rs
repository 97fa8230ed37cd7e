use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort archive creation. No partial archive is kept.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Root has no usable final path component (e.g. `/` or `..`).
    #[error("cannot derive an archive name from {path}")]
    InvalidRoot { path: PathBuf },

    #[error("output root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("failed to walk output tree: {source}")]
    Walk {
        #[source]
        source: walkdir::Error,
    },

    #[error("archive I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write zip entry: {source}")]
    Zip {
        #[source]
        source: zip::result::ZipError,
    },
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(source: zip::result::ZipError) -> Self {
        Self::Zip { source }
    }
}

impl From<walkdir::Error> for ArchiveError {
    fn from(source: walkdir::Error) -> Self {
        Self::Walk { source }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

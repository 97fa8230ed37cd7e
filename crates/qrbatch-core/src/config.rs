//! Run configuration for [`run_generate`](crate::run_generate).

use std::num::NonZeroUsize;
use std::path::PathBuf;

use qrbatch_ingest::ReadOptions;
use qrbatch_model::FieldNames;
use qrbatch_render::RasterOptions;

use crate::error::{GenerateError, Result};

/// Upper bound on records processed at the same time.
pub const DEFAULT_MAX_WORKERS: usize = 6;

/// Longest accepted QR payload, in characters.
pub const DEFAULT_MAX_PAYLOAD_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub max_workers: usize,
    pub max_payload_chars: usize,
    pub fields: FieldNames,
    pub raster: RasterOptions,
    pub read: ReadOptions,
    /// JSON-lines audit trail, appended to when set.
    pub audit_log: Option<PathBuf>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        let fields = FieldNames::default();
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            max_payload_chars: DEFAULT_MAX_PAYLOAD_CHARS,
            read: ReadOptions::default().requiring_fields(&fields),
            fields,
            raster: RasterOptions::default(),
            audit_log: None,
        }
    }
}

impl GenerateConfig {
    /// Replaces the consumed column names and the columns the reader requires.
    #[must_use]
    pub fn with_fields(mut self, fields: FieldNames) -> Self {
        self.read = self.read.requiring_fields(&fields);
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    #[must_use]
    pub fn with_max_payload_chars(mut self, max_payload_chars: usize) -> Self {
        self.max_payload_chars = max_payload_chars;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.read = self.read.with_max_file_size(max_file_size);
        self
    }

    #[must_use]
    pub fn with_audit_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.audit_log = Some(path.into());
        self
    }

    /// Worker ceiling as a non-zero count.
    pub fn worker_limit(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.max_workers).ok_or_else(|| GenerateError::InvalidConfig {
            message: "max_workers must be at least 1".to_string(),
        })
    }
}

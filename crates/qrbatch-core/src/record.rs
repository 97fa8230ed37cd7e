//! Per-record processing against the output tree.

use std::fs;
use std::path::Path;

use qrbatch_model::{FieldNames, Record, RecordOutcome, redact_value};
use qrbatch_render::{RasterOptions, render_to_file};
use tracing::{debug, warn};

use crate::naming::{InvalidReason, clean_number, identify_record};

/// Outcome of one record plus the cleaned identifiers, for auditing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub outcome: RecordOutcome,
    /// Cleaned national ID digits; may be the wrong length when invalid.
    pub national_id: String,
    /// Cleaned household ID digits; empty when the national ID failed first.
    pub household_id: String,
    /// Identity-free description of what happened.
    pub code: &'static str,
}

impl RecordReport {
    fn new(outcome: RecordOutcome, code: &'static str) -> Self {
        Self {
            outcome,
            national_id: String::new(),
            household_id: String::new(),
            code,
        }
    }

    fn with_ids(mut self, national_id: &str, household_id: &str) -> Self {
        self.national_id = national_id.to_string();
        self.household_id = household_id.to_string();
        self
    }
}

/// Validates one record and renders its image under `output_dir`.
///
/// Order matters: the target directory is created and an existing image is
/// reported as skipped before the payload length is checked.
pub fn process_record(
    record: &Record,
    output_dir: &Path,
    fields: &FieldNames,
    raster: &RasterOptions,
    max_payload_chars: usize,
) -> RecordReport {
    let identified = match identify_record(record, fields) {
        Ok(identified) => identified,
        Err(reason) => {
            let (national_id, household_id) = match &reason {
                InvalidReason::NationalId { digits } => (digits.clone(), String::new()),
                InvalidReason::HouseholdId { digits } => (
                    clean_number(record.value(&fields.national_id)),
                    digits.clone(),
                ),
                InvalidReason::PayloadTooLong { .. } => (String::new(), String::new()),
            };
            debug!(reason = reason.code(), "record rejected");
            return RecordReport::new(RecordOutcome::Invalid(reason.to_string()), reason.code())
                .with_ids(&national_id, &household_id);
        }
    };
    let national_id = identified.national_id.as_str();
    let household_id = identified.household_id.as_str();
    let location = &identified.location;

    let directory = location.directory(output_dir);
    if let Err(error) = fs::create_dir_all(&directory) {
        warn!(
            directory = %directory.display(),
            error = %error,
            "failed to create record directory"
        );
        return RecordReport::new(
            RecordOutcome::Error(format!(
                "failed to create directory {}: {error}",
                directory.display()
            )),
            "create_directory_failed",
        )
        .with_ids(national_id, household_id);
    }

    let path = directory.join(&location.filename);
    if path.exists() {
        debug!(file = redact_value(&location.filename), "image exists, skipping");
        return RecordReport::new(RecordOutcome::Skipped(location.filename.clone()), "exists")
            .with_ids(national_id, household_id);
    }

    let chars = identified.payload.chars().count();
    if chars > max_payload_chars {
        let reason = InvalidReason::PayloadTooLong {
            chars,
            max: max_payload_chars,
        };
        debug!(chars, max = max_payload_chars, "payload rejected");
        return RecordReport::new(RecordOutcome::Invalid(reason.to_string()), reason.code())
            .with_ids(national_id, household_id);
    }

    match render_to_file(&identified.payload, &path, raster) {
        Ok(()) => {
            debug!(file = redact_value(&location.filename), "image generated");
            RecordReport::new(RecordOutcome::Generated(location.filename.clone()), "generated")
                .with_ids(national_id, household_id)
        }
        Err(error) => {
            let message = error.to_string();
            warn!(
                file = redact_value(&location.filename),
                error = redact_value(&message),
                "failed to render image"
            );
            RecordReport::new(RecordOutcome::Error(message), "render_failed")
                .with_ids(national_id, household_id)
        }
    }
}

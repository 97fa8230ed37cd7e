//! JSON-lines audit trail.
//!
//! One line per processed record plus a closing `finished` or `cancelled`
//! line. National and household IDs are written only as SHA-256 hex digests of
//! their cleaned digits. Closing lines carry counts only: error text names
//! image paths and is never written. Write failures are logged and otherwise ignored so the audit trail
//! can never change a record's outcome.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{SecondsFormat, Utc};
use qrbatch_model::{OutcomeKind, OutcomeTally};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::error;

use crate::record::RecordReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Generated,
    Skipped,
    Invalid,
    Error,
    Finished,
    Cancelled,
}

impl From<OutcomeKind> for AuditAction {
    fn from(kind: OutcomeKind) -> Self {
        match kind {
            OutcomeKind::Generated => Self::Generated,
            OutcomeKind::Skipped => Self::Skipped,
            OutcomeKind::Invalid => Self::Invalid,
            OutcomeKind::Error => Self::Error,
        }
    }
}

#[derive(Debug, Serialize)]
struct RecordEntry<'a> {
    ts: String,
    row: usize,
    national_id_hash: Option<String>,
    household_id_hash: Option<String>,
    action: AuditAction,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct OutcomeCounts {
    generated: usize,
    skipped: usize,
    invalid: usize,
    errors: usize,
}

impl From<&OutcomeTally> for OutcomeCounts {
    fn from(tally: &OutcomeTally) -> Self {
        Self {
            generated: tally.generated,
            skipped: tally.skipped,
            invalid: tally.invalid,
            errors: tally.error_count(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FinishedEntry {
    ts: String,
    action: AuditAction,
    result: OutcomeCounts,
}

#[derive(Debug, Serialize)]
struct CancelledEntry {
    ts: String,
    action: AuditAction,
    processed: usize,
    total: usize,
}

/// SHA-256 hex digest of an identifier, or `None` when it is empty.
pub fn hash_identifier(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    Some(hex::encode(hasher.finalize()))
}

fn append_json_line<W: Write, S: Serialize>(writer: &mut W, entry: &S) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, entry)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Append-only audit log shared by all workers.
#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl AuditLog {
    /// Opens `path` for appending, creating it and its parent directory.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the entry for record `row` (1-based).
    pub fn record(&self, row: usize, report: &RecordReport) {
        self.write_line(&RecordEntry {
            ts: timestamp(),
            row,
            national_id_hash: hash_identifier(&report.national_id),
            household_id_hash: hash_identifier(&report.household_id),
            action: report.outcome.kind().into(),
            message: report.code,
        });
    }

    pub fn finish(&self, tally: &OutcomeTally) {
        self.write_line(&FinishedEntry {
            ts: timestamp(),
            action: AuditAction::Finished,
            result: tally.into(),
        });
    }

    /// Closes a run that stopped after `processed` of `total` records.
    pub fn cancelled(&self, processed: usize, total: usize) {
        self.write_line(&CancelledEntry {
            ts: timestamp(),
            action: AuditAction::Cancelled,
            processed,
            total,
        });
    }

    fn write_line<S: Serialize>(&self, entry: &S) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = append_json_line(&mut *writer, entry) {
            error!(path = %self.path.display(), error = %err, "failed to write audit log");
        }
    }
}

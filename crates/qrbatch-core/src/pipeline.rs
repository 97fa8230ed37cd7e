//! Read, generate, archive.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use qrbatch_ingest::read_records;
use qrbatch_model::BatchResult;
use qrbatch_output::archive_directory;
use tracing::{info, info_span};

use crate::audit::AuditLog;
use crate::batch::{BatchCoordinator, BatchError, BatchProgress, CancelFlag};
use crate::config::GenerateConfig;
use crate::error::{GenerateError, Result};
use crate::naming::sanitize_filename;
use crate::record::process_record;

/// Output directory for an input file: `<output_base>/<sanitized input stem>`.
pub fn default_output_dir(output_base: &Path, input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| sanitize_filename(&name.to_string_lossy()))
        .unwrap_or_default();
    let stem = match file_name.rfind('.') {
        Some(dot) => &file_name[..dot],
        None => file_name.as_str(),
    };
    let stem = if stem.is_empty() { "output" } else { stem };
    output_base.join(stem)
}

/// Generates one QR image per record of `input` under `output_dir`, then
/// packages the tree as `<output_dir>.zip`.
pub fn run_generate(
    input: &Path,
    output_dir: &Path,
    config: &GenerateConfig,
    cancel: Option<&CancelFlag>,
) -> Result<BatchResult> {
    run_generate_with_progress(input, output_dir, config, cancel, |_| {})
}

/// [`run_generate`] with a callback invoked after each record completes.
///
/// The dataset is read before anything is created, so a dataset that fails to
/// read leaves the filesystem untouched.
pub fn run_generate_with_progress<F>(
    input: &Path,
    output_dir: &Path,
    config: &GenerateConfig,
    cancel: Option<&CancelFlag>,
    on_progress: F,
) -> Result<BatchResult>
where
    F: Fn(&BatchProgress) + Sync,
{
    let workers = config.worker_limit()?;
    let run_span = info_span!(
        "generate",
        input = %input.display(),
        output_dir = %output_dir.display()
    );
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let dataset = info_span!("ingest").in_scope(|| read_records(input, &config.read))?;

    fs::create_dir_all(output_dir).map_err(|source| GenerateError::OutputDirectory {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let audit = config
        .audit_log
        .as_deref()
        .map(|path| {
            AuditLog::open(path).map_err(|source| GenerateError::AuditLog {
                path: path.to_path_buf(),
                source,
            })
        })
        .transpose()?;

    let batch = info_span!("batch", records = dataset.len(), workers = workers.get()).in_scope(
        || {
            let mut coordinator = BatchCoordinator::new(workers);
            coordinator.run(
                &dataset.records,
                cancel,
                |index, record| {
                    let report = process_record(
                        record,
                        output_dir,
                        &config.fields,
                        &config.raster,
                        config.max_payload_chars,
                    );
                    if let Some(audit) = &audit {
                        audit.record(index + 1, &report);
                    }
                    report.outcome
                },
                &on_progress,
            )
        },
    );

    let tally = match batch {
        Ok(tally) => tally,
        Err(err) => {
            if let (Some(audit), BatchError::Cancelled { processed, total }) = (&audit, &err) {
                audit.cancelled(*processed, *total);
            }
            return Err(err.into());
        }
    };
    if let Some(audit) = &audit {
        audit.finish(&tally);
    }

    let archive = info_span!("archive").in_scope(|| archive_directory(output_dir))?;

    info!(
        records = dataset.len(),
        skipped_rows = dataset.skipped_rows,
        generated = tally.generated,
        skipped = tally.skipped,
        invalid = tally.invalid,
        errors = tally.error_count(),
        archive = %archive.filename,
        duration_ms = run_start.elapsed().as_millis(),
        "generate complete"
    );

    Ok(BatchResult {
        tally,
        records: dataset.len(),
        skipped_rows: dataset.skipped_rows,
        output_dir: output_dir.to_path_buf(),
        archive_filename: archive.filename,
        archive_path: archive.path,
    })
}

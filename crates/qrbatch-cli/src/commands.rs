use std::path::PathBuf;

use anyhow::{Context, Result};
use qrbatch_core::{GenerateConfig, default_output_dir, run_generate_with_progress};
use qrbatch_model::{BatchResult, FieldNames};
use tracing::info_span;

use crate::cli::GenerateArgs;
use crate::progress;
use crate::summary::fields_table;

pub fn run_fields() -> Result<()> {
    println!("{}", fields_table(&FieldNames::default()));
    Ok(())
}

/// Builds the run configuration from command-line flags.
pub fn config_from_args(args: &GenerateArgs) -> GenerateConfig {
    let config = GenerateConfig::default()
        .with_max_workers(args.workers)
        .with_max_payload_chars(args.max_payload)
        .with_max_file_size(args.max_file_size);
    match &args.audit_log {
        Some(path) => config.with_audit_log(path),
        None => config,
    }
}

/// Output directory named on the command line, or derived from the input name.
pub fn resolve_output_dir(args: &GenerateArgs) -> PathBuf {
    args.output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.output_base, &args.input))
}

pub fn run_generate(args: &GenerateArgs, show_progress: bool) -> Result<BatchResult> {
    let output_dir = resolve_output_dir(args);
    let config = config_from_args(args);
    let span = info_span!("command", command = "generate");
    let _guard = span.enter();

    let bar = progress::record_progress(show_progress);
    let result = run_generate_with_progress(&args.input, &output_dir, &config, None, |update| {
        progress::update(&bar, update);
    });
    bar.finish_and_clear();

    result.with_context(|| format!("generate QR codes from {}", args.input.display()))
}

pub fn print_json(result: &BatchResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("serialize result")?;
    println!("{json}");
    Ok(())
}

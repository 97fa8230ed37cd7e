//! Integration tests for argument handling and command output.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use qrbatch_cli::cli::{Cli, Command, GenerateArgs};
use qrbatch_cli::commands::{config_from_args, resolve_output_dir, run_generate};
use qrbatch_cli::summary::{fields_table, summary_table};
use qrbatch_model::FieldNames;

fn generate_args(argv: &[&str]) -> GenerateArgs {
    let mut full = vec!["qrbatch", "generate"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).expect("parse args").command {
        Command::Generate(args) => args,
        Command::Fields => panic!("expected generate command"),
    }
}

#[test]
fn generate_defaults() {
    let args = generate_args(&["uploads/warga.xlsx"]);
    assert_eq!(args.workers, 6);
    assert_eq!(args.max_payload, 500);
    assert_eq!(args.max_file_size, 50 * 1024 * 1024);
    assert!(args.audit_log.is_none());
    assert!(!args.json);
    assert_eq!(resolve_output_dir(&args), PathBuf::from("qr_output/warga"));
}

#[test]
fn flags_flow_into_config() {
    let args = generate_args(&[
        "data.csv",
        "--output-dir",
        "out/batch",
        "--workers",
        "2",
        "--max-payload",
        "120",
        "--max-file-size",
        "1024",
        "--audit-log",
        "audit.jsonl",
    ]);
    let config = config_from_args(&args);
    assert_eq!(config.max_workers, 2);
    assert_eq!(config.max_payload_chars, 120);
    assert_eq!(config.read.max_file_size, 1024);
    assert_eq!(config.audit_log, Some(PathBuf::from("audit.jsonl")));
    assert_eq!(resolve_output_dir(&args), PathBuf::from("out/batch"));
}

#[test]
fn zero_workers_is_rejected() {
    let parsed = Cli::try_parse_from(["qrbatch", "generate", "data.csv", "--workers", "0"]);
    assert!(parsed.is_err());
}

#[test]
fn output_dir_conflicts_with_output_base() {
    let parsed = Cli::try_parse_from([
        "qrbatch",
        "generate",
        "data.csv",
        "--output-dir",
        "a",
        "--output-base",
        "b",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn global_log_flags_parse_after_subcommand() {
    let cli = Cli::try_parse_from(["qrbatch", "fields", "--log-data", "--log-format", "json"])
        .expect("parse args");
    assert!(cli.log_data);
    assert!(matches!(cli.command, Command::Fields));
}

#[test]
fn fields_table_lists_every_column() {
    let rendered = fields_table(&FieldNames::default()).to_string();
    for column in [
        "NO IDENTITAS",
        "NOMOR KK",
        "NAMA LENGKAP",
        "KECAMATAN",
        "KELURAHAN",
        "KODE QR",
    ] {
        assert!(rendered.contains(column), "missing {column}");
    }
}

#[test]
fn generate_command_runs_end_to_end() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("people.csv");
    fs::write(
        &input,
        "NO IDENTITAS,NOMOR KK,NAMA LENGKAP,KECAMATAN,KELURAHAN,KODE QR\n\
         1234567890123456,6543210987654321,Jane Doe,North,Central,HELLO\n\
         42,6543210987654321,Short Id,North,Central,HELLO\n",
    )
    .expect("write input");
    let base = dir.path().join("qr_output");
    let input_arg = input.to_string_lossy().into_owned();
    let base_arg = base.to_string_lossy().into_owned();
    let args = generate_args(&[input_arg.as_str(), "--output-base", base_arg.as_str()]);

    let result = run_generate(&args, false).expect("generate");

    assert_eq!(result.output_dir, base.join("people"));
    assert!(result.archive_path.is_file());

    let mut json = serde_json::to_value(&result).expect("serialize result");
    let object = json.as_object_mut().expect("json object");
    object.remove("output_dir");
    object.remove("archive_path");
    insta::assert_json_snapshot!(json, @r#"
    {
      "archive_filename": "people.zip",
      "errors": [],
      "generated": 1,
      "invalid": 1,
      "records": 2,
      "skipped": 0,
      "skipped_rows": 0
    }
    "#);

    let rendered = summary_table(&result).to_string();
    assert!(rendered.contains("Generated"));
    assert!(rendered.contains("TOTAL"));
}

#[test]
fn missing_input_reports_context() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("absent.csv");
    let input_arg = input.to_string_lossy().into_owned();
    let args = generate_args(&[input_arg.as_str()]);

    let err = run_generate(&args, false).expect_err("missing input");
    assert!(format!("{err:#}").contains("generate QR codes from"));
}

//! CLI argument definitions.

use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use qrbatch_core::{DEFAULT_MAX_PAYLOAD_CHARS, DEFAULT_MAX_WORKERS};
use qrbatch_ingest::DEFAULT_MAX_FILE_SIZE;

#[derive(Parser)]
#[command(
    name = "qrbatch",
    version,
    about = "Generate one QR code image per row of a spreadsheet or CSV file",
    long_about = "Generate one QR code PNG per row of a spreadsheet (.xlsx, .xls) or CSV file.\n\n\
                  Images are filed under <district>/<sub-district>/ and named after the\n\
                  row's national ID, household ID and full name. The output folder is\n\
                  packaged as a zip archive next to it when the run completes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow identity values (IDs, image file names) to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate QR images for every row of an input file.
    Generate(GenerateArgs),

    /// List the input columns the generator reads.
    Fields,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Spreadsheet or CSV file to read.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory that receives the images (default: <OUTPUT_BASE>/<input stem>).
    #[arg(long = "output-dir", value_name = "DIR", conflicts_with = "output_base")]
    pub output_dir: Option<PathBuf>,

    /// Parent directory for the derived output directory.
    #[arg(long = "output-base", value_name = "DIR", default_value = "qr_output")]
    pub output_base: PathBuf,

    /// Maximum number of rows processed at the same time.
    #[arg(
        long = "workers",
        value_name = "N",
        default_value_t = DEFAULT_MAX_WORKERS,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub workers: usize,

    /// Longest accepted QR payload, in characters.
    #[arg(long = "max-payload", value_name = "N", default_value_t = DEFAULT_MAX_PAYLOAD_CHARS)]
    pub max_payload: usize,

    /// Largest accepted input file, in bytes.
    #[arg(long = "max-file-size", value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Append a JSON-lines audit trail with hashed identifiers to PATH.
    #[arg(long = "audit-log", value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Print the result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    /// Disable the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

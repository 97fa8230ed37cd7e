//! QR batch generation core.
//!
//! - [`naming`]: identity cleaning and output path derivation (pure)
//! - [`record`]: per-record processing against the output tree
//! - [`batch`]: bounded worker pool folding outcomes into a tally
//! - [`audit`]: optional JSON-lines audit trail with hashed identifiers
//! - [`pipeline`]: read, generate, archive

pub mod audit;
pub mod batch;
pub mod config;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod record;

pub use audit::{AuditAction, AuditLog, hash_identifier};
pub use batch::{BatchCoordinator, BatchError, BatchProgress, BatchState, CancelFlag};
pub use config::{DEFAULT_MAX_PAYLOAD_CHARS, DEFAULT_MAX_WORKERS, GenerateConfig};
pub use error::{GenerateError, Result};
pub use naming::{
    IDENTIFIER_DIGITS, IdentifiedRecord, InvalidReason, OutputLocation, clean_number,
    identify_record, sanitize_filename, sanitize_folder,
};
pub use pipeline::{default_output_dir, run_generate, run_generate_with_progress};
pub use record::{RecordReport, process_record};

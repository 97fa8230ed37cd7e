//! Data model shared across the qrbatch workspace.
//!
//! Every crate in the pipeline speaks in these types: the reader produces
//! [`Record`]s, the validator turns each one into a [`RecordOutcome`], the
//! coordinator folds outcomes into an [`OutcomeTally`], and the pipeline hands
//! the caller a [`BatchResult`].

pub mod fields;
pub mod format;
pub mod outcome;
pub mod privacy;
pub mod record;
pub mod result;

pub use fields::{DEFAULT_DISTRICT_DIR, DEFAULT_SUB_DISTRICT_DIR, FieldNames, FieldRole};
pub use format::InputFormat;
pub use outcome::{OutcomeKind, OutcomeTally, RecordOutcome};
pub use privacy::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
pub use record::Record;
pub use result::BatchResult;

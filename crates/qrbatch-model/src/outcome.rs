use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of processing exactly one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum RecordOutcome {
    /// A new image was written; carries the image filename.
    Generated(String),
    /// An image already existed at the derived path; carries the filename.
    Skipped(String),
    /// Identity fields or payload failed validation; carries the reason.
    Invalid(String),
    /// Encoding or filesystem failure; carries the cause.
    Error(String),
}

impl RecordOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Generated(_) => OutcomeKind::Generated,
            Self::Skipped(_) => OutcomeKind::Skipped,
            Self::Invalid(_) => OutcomeKind::Invalid,
            Self::Error(_) => OutcomeKind::Error,
        }
    }

    /// Filename or reason carried by the outcome.
    pub fn detail(&self) -> &str {
        match self {
            Self::Generated(detail)
            | Self::Skipped(detail)
            | Self::Invalid(detail)
            | Self::Error(detail) => detail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Generated,
    Skipped,
    Invalid,
    Error,
}

impl OutcomeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Skipped => "skipped",
            Self::Invalid => "invalid",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate counters folded from record outcomes.
///
/// `generated + skipped + invalid + errors.len()` always equals the number of
/// outcomes recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub generated: usize,
    pub skipped: usize,
    pub invalid: usize,
    pub errors: Vec<String>,
}

impl OutcomeTally {
    pub fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Generated(_) => self.generated += 1,
            RecordOutcome::Skipped(_) => self.skipped += 1,
            RecordOutcome::Invalid(_) => self.invalid += 1,
            RecordOutcome::Error(message) => self.errors.push(message),
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn total(&self) -> usize {
        self.generated + self.skipped + self.invalid + self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl FromIterator<RecordOutcome> for OutcomeTally {
    fn from_iter<I: IntoIterator<Item = RecordOutcome>>(iter: I) -> Self {
        let mut tally = Self::default();
        for outcome in iter {
            tally.record(outcome);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn outcome_strategy() -> impl Strategy<Value = RecordOutcome> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(RecordOutcome::Generated),
            "[a-z]{1,8}".prop_map(RecordOutcome::Skipped),
            "[a-z]{1,8}".prop_map(RecordOutcome::Invalid),
            "[a-z]{1,8}".prop_map(RecordOutcome::Error),
        ]
    }

    #[test]
    fn tally_counts_each_kind() {
        let tally: OutcomeTally = vec![
            RecordOutcome::Generated("a.png".to_string()),
            RecordOutcome::Skipped("b.png".to_string()),
            RecordOutcome::Invalid("bad id".to_string()),
            RecordOutcome::Invalid("bad id".to_string()),
            RecordOutcome::Error("disk full".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(tally.generated, 1);
        assert_eq!(tally.skipped, 1);
        assert_eq!(tally.invalid, 2);
        assert_eq!(tally.errors, vec!["disk full".to_string()]);
        assert_eq!(tally.total(), 5);
        assert!(tally.has_errors());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_string(&RecordOutcome::Skipped("x.png".to_string()))
            .expect("serialize outcome");
        assert_eq!(json, r#"{"status":"skipped","detail":"x.png"}"#);
    }

    proptest! {
        #[test]
        fn tally_total_matches_outcome_count(outcomes in proptest::collection::vec(outcome_strategy(), 0..64)) {
            let expected = outcomes.len();
            let tally: OutcomeTally = outcomes.into_iter().collect();
            prop_assert_eq!(tally.total(), expected);
        }
    }
}

//! Identity cleaning and output path derivation.
//!
//! Everything here is pure: the same record and field names always produce
//! the same [`IdentifiedRecord`] or the same [`InvalidReason`].

use std::path::{Path, PathBuf};

use qrbatch_model::{DEFAULT_DISTRICT_DIR, DEFAULT_SUB_DISTRICT_DIR, FieldNames, Record};
use thiserror::Error;

/// Required digit count for both national and household IDs.
pub const IDENTIFIER_DIGITS: usize = 16;

/// Why a record cannot produce an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("invalid national ID: {digits}")]
    NationalId { digits: String },

    #[error("invalid household ID: {digits}")]
    HouseholdId { digits: String },

    #[error("QR payload too long: {chars} characters (max {max})")]
    PayloadTooLong { chars: usize, max: usize },
}

impl InvalidReason {
    /// Short machine-readable code, free of identity values.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NationalId { .. } => "invalid_national_id",
            Self::HouseholdId { .. } => "invalid_household_id",
            Self::PayloadTooLong { .. } => "payload_too_long",
        }
    }
}

/// Where a record's image lives, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub district: String,
    pub sub_district: String,
    pub filename: String,
}

impl OutputLocation {
    /// `<base>/<district>/<sub_district>`
    pub fn directory(&self, base: &Path) -> PathBuf {
        base.join(&self.district).join(&self.sub_district)
    }

    /// `<base>/<district>/<sub_district>/<filename>`
    pub fn path(&self, base: &Path) -> PathBuf {
        self.directory(base).join(&self.filename)
    }
}

/// A record whose identity fields passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedRecord {
    /// Cleaned 16-digit national ID.
    pub national_id: String,
    /// Cleaned 16-digit household ID.
    pub household_id: String,
    pub location: OutputLocation,
    /// QR payload, trimmed. Length is not checked here.
    pub payload: String,
}

/// Strips every character that is not an ASCII digit.
pub fn clean_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Folder segment: keeps `[A-Za-z0-9_-]`, replaces everything else with `_`
/// and trims `_` from both ends.
pub fn sanitize_folder(raw: &str) -> String {
    sanitize(raw, |c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// File name: like [`sanitize_folder`] but `.` is also kept.
pub fn sanitize_filename(raw: &str) -> String {
    sanitize(raw, |c| {
        c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
    })
}

fn sanitize(raw: &str, allowed: impl Fn(char) -> bool) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| if allowed(c) { c } else { '_' })
        .collect();
    replaced.trim_matches('_').to_string()
}

fn folder_or(raw: &str, fallback: &str) -> String {
    let folder = sanitize_folder(raw);
    if folder.is_empty() {
        fallback.to_string()
    } else {
        folder
    }
}

/// Validates identity fields and derives the output location.
///
/// Missing fields read as empty strings, so an absent ID column yields an
/// invalid ID rather than a panic.
pub fn identify_record(
    record: &Record,
    fields: &FieldNames,
) -> std::result::Result<IdentifiedRecord, InvalidReason> {
    let national_id = clean_number(record.value(&fields.national_id));
    if national_id.len() != IDENTIFIER_DIGITS {
        return Err(InvalidReason::NationalId {
            digits: national_id,
        });
    }
    let household_id = clean_number(record.value(&fields.household_id));
    if household_id.len() != IDENTIFIER_DIGITS {
        return Err(InvalidReason::HouseholdId {
            digits: household_id,
        });
    }

    let name = sanitize_filename(&record.value(&fields.full_name).replace(' ', "_"));
    let filename = sanitize_filename(&format!("{national_id}-{household_id}-{name}.png"));

    Ok(IdentifiedRecord {
        location: OutputLocation {
            district: folder_or(record.value(&fields.district), DEFAULT_DISTRICT_DIR),
            sub_district: folder_or(record.value(&fields.sub_district), DEFAULT_SUB_DISTRICT_DIR),
            filename,
        },
        payload: record.value(&fields.payload).trim().to_string(),
        national_id,
        household_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(nid: &str, hid: &str, name: &str, district: &str, sub: &str) -> Record {
        let fields = FieldNames::default();
        [
            (fields.national_id.clone(), nid.to_string()),
            (fields.household_id.clone(), hid.to_string()),
            (fields.full_name.clone(), name.to_string()),
            (fields.district.clone(), district.to_string()),
            (fields.sub_district.clone(), sub.to_string()),
            (fields.payload.clone(), "  HELLO  ".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn clean_number_keeps_digits_only() {
        assert_eq!(clean_number("3201-0101.0101 0001"), "3201010101010001");
        assert_eq!(clean_number("abc"), "");
        assert_eq!(clean_number("١٢٣"), "");
    }

    #[test]
    fn sanitizers_replace_and_trim() {
        assert_eq!(sanitize_folder("Bogor Barat"), "Bogor_Barat");
        assert_eq!(sanitize_folder("  ../etc "), "etc");
        assert_eq!(sanitize_folder("Kec. Ciawi"), "Kec__Ciawi");
        assert_eq!(sanitize_filename("a b.png"), "a_b.png");
        assert_eq!(sanitize_filename("Siti Nur'aini"), "Siti_Nur_aini");
        assert_eq!(sanitize_filename("___"), "");
    }

    #[test]
    fn identifies_valid_record() {
        let identified = identify_record(
            &record(
                "1234567890123456",
                "6543210987654321",
                "Jane Doe",
                "North",
                "Central",
            ),
            &FieldNames::default(),
        )
        .expect("valid record");

        assert_eq!(identified.location.district, "North");
        assert_eq!(identified.location.sub_district, "Central");
        assert_eq!(
            identified.location.filename,
            "1234567890123456-6543210987654321-Jane_Doe.png"
        );
        assert_eq!(identified.payload, "HELLO");
        assert_eq!(
            identified.location.path(Path::new("out")),
            Path::new("out/North/Central/1234567890123456-6543210987654321-Jane_Doe.png")
        );
    }

    #[test]
    fn blank_folders_fall_back_to_defaults() {
        let identified = identify_record(
            &record("1234567890123456", "6543210987654321", "", "  ", "%%%"),
            &FieldNames::default(),
        )
        .expect("valid record");
        assert_eq!(identified.location.district, DEFAULT_DISTRICT_DIR);
        assert_eq!(identified.location.sub_district, DEFAULT_SUB_DISTRICT_DIR);
        assert_eq!(
            identified.location.filename,
            "1234567890123456-6543210987654321-.png"
        );
    }

    #[test]
    fn rejects_short_identifiers() {
        let err = identify_record(
            &record("12345", "6543210987654321", "A", "N", "C"),
            &FieldNames::default(),
        )
        .expect_err("short national ID");
        assert_eq!(
            err,
            InvalidReason::NationalId {
                digits: "12345".to_string()
            }
        );
        assert_eq!(err.to_string(), "invalid national ID: 12345");

        let err = identify_record(
            &record("1234567890123456", "65432109876543210", "A", "N", "C"),
            &FieldNames::default(),
        )
        .expect_err("long household ID");
        assert_eq!(err.code(), "invalid_household_id");
    }

    #[test]
    fn missing_fields_are_invalid() {
        let err = identify_record(&Record::new(), &FieldNames::default())
            .expect_err("empty record");
        assert!(matches!(err, InvalidReason::NationalId { .. }));
    }

    proptest! {
        #[test]
        fn sanitized_folder_uses_allowed_alphabet(raw in "\\PC{0,40}") {
            let folder = sanitize_folder(&raw);
            prop_assert!(folder.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
            prop_assert!(!folder.starts_with('_') && !folder.ends_with('_'));
        }

        #[test]
        fn identification_is_deterministic(name in "[ -~]{0,30}", district in "[ -~]{0,20}") {
            let row = record("1234567890123456", "6543210987654321", &name, &district, "x");
            let first = identify_record(&row, &FieldNames::default());
            let second = identify_record(&row, &FieldNames::default());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn non_sixteen_digit_ids_are_invalid(digits in "[0-9]{0,15}|[0-9]{17,24}") {
            let row = record(&digits, "6543210987654321", "A", "N", "C");
            prop_assert!(identify_record(&row, &FieldNames::default()).is_err());
        }
    }
}

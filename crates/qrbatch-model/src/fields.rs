//! Column names the generator consumes from each record.

use serde::{Deserialize, Serialize};

/// Folder used when a record's district is blank after sanitizing.
pub const DEFAULT_DISTRICT_DIR: &str = "Kecamatan";

/// Folder used when a record's sub-district is blank after sanitizing.
pub const DEFAULT_SUB_DISTRICT_DIR: &str = "Kelurahan";

/// Role a consumed column plays in naming and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    NationalId,
    HouseholdId,
    FullName,
    District,
    SubDistrict,
    Payload,
}

impl FieldRole {
    pub const ALL: [FieldRole; 6] = [
        FieldRole::NationalId,
        FieldRole::HouseholdId,
        FieldRole::FullName,
        FieldRole::District,
        FieldRole::SubDistrict,
        FieldRole::Payload,
    ];

    pub const fn description(self) -> &'static str {
        match self {
            Self::NationalId => "16-digit national identity number (NIK)",
            Self::HouseholdId => "16-digit household/family card number (KK)",
            Self::FullName => "Full name, part of the image filename",
            Self::District => "First-level output folder",
            Self::SubDistrict => "Second-level output folder",
            Self::Payload => "Text encoded into the QR code",
        }
    }

    /// Whether the header must declare this column for a run to start.
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::District | Self::SubDistrict)
    }
}

/// Header names for each consumed column. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub national_id: String,
    pub household_id: String,
    pub full_name: String,
    pub district: String,
    pub sub_district: String,
    pub payload: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            national_id: "NO IDENTITAS".to_string(),
            household_id: "NOMOR KK".to_string(),
            full_name: "NAMA LENGKAP".to_string(),
            district: "KECAMATAN".to_string(),
            sub_district: "KELURAHAN".to_string(),
            payload: "KODE QR".to_string(),
        }
    }
}

impl FieldNames {
    pub fn name(&self, role: FieldRole) -> &str {
        match role {
            FieldRole::NationalId => &self.national_id,
            FieldRole::HouseholdId => &self.household_id,
            FieldRole::FullName => &self.full_name,
            FieldRole::District => &self.district,
            FieldRole::SubDistrict => &self.sub_district,
            FieldRole::Payload => &self.payload,
        }
    }

    /// Column names that must be present in the header.
    pub fn required(&self) -> Vec<&str> {
        FieldRole::ALL
            .into_iter()
            .filter(|role| role.is_required())
            .map(|role| self.name(role))
            .collect()
    }
}

//! Step Records
//!
//! Typed records collected by each wizard step.
//! Wire names are camelCase to match the remote registration service.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =========================================================================
// Identifiers
// =========================================================================

/// Identifier of one entry in a sequence-shaped step.
///
/// Only unique within its list; used for removal and as the foreign key
/// a distribution entry holds into the beneficiary list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Generate a fresh unique identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =========================================================================
// File uploads
// =========================================================================

/// Content types accepted at the upload boundary.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "application/pdf"];

/// An uploaded file carried opaquely through the wizard.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileBlob {
    pub file_name: String,
    pub content_type: String,
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl FileBlob {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Input-acceptance filter: PNG/JPEG images and PDF documents only.
    ///
    /// Returns the blob back when accepted. The wizard itself never re-checks.
    pub fn accept(self) -> Result<Self, RejectedUpload> {
        let content_type = self.content_type.to_ascii_lowercase();
        if ACCEPTED_CONTENT_TYPES.contains(&content_type.as_str()) {
            Ok(self)
        } else {
            Err(RejectedUpload {
                file_name: self.file_name,
                content_type: self.content_type,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FileBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileBlob")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Upload refused by the acceptance filter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported file type for {file_name}: {content_type}")]
pub struct RejectedUpload {
    pub file_name: String,
    pub content_type: String,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

// =========================================================================
// Step 1: Personal details
// =========================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    pub place_of_birth: String,
    pub religion: String,
    pub gender: String,
    pub home_address: String,
    pub city: String,
    pub state: String,
    pub passport_photo: Option<FileBlob>,
    pub signature: Option<FileBlob>,
}

// =========================================================================
// Step 2: Identification
// =========================================================================

/// Accepted means of identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentificationType {
    #[serde(rename = "International Passport")]
    InternationalPassport,
    #[serde(rename = "Driver's License")]
    DriversLicense,
    #[serde(rename = "Voter's Card")]
    VotersCard,
    #[serde(rename = "BVN")]
    Bvn,
}

impl IdentificationType {
    pub const ALL: [IdentificationType; 4] = [
        IdentificationType::InternationalPassport,
        IdentificationType::DriversLicense,
        IdentificationType::VotersCard,
        IdentificationType::Bvn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentificationType::InternationalPassport => "International Passport",
            IdentificationType::DriversLicense => "Driver's License",
            IdentificationType::VotersCard => "Voter's Card",
            IdentificationType::Bvn => "BVN",
        }
    }
}

impl fmt::Display for IdentificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identification {
    pub id_type: Option<IdentificationType>,
    pub id_number: String,
    pub id_image: Option<FileBlob>,
}

impl Identification {
    /// Choose an id type. The number and image belong to the previous
    /// choice, so both are cleared.
    pub fn select_id_type(&mut self, id_type: IdentificationType) {
        self.id_type = Some(id_type);
        self.id_number.clear();
        self.id_image = None;
    }
}

// =========================================================================
// Step 3: Beneficiaries
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: EntryId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub gender: String,
}

impl Beneficiary {
    /// Display name used wherever a beneficiary is referenced
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =========================================================================
// Step 4: Executors
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutorType {
    #[serde(rename = "Individual Executor")]
    Individual,
    #[serde(rename = "Company Executor")]
    Company,
}

impl ExecutorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutorType::Individual => "Individual Executor",
            ExecutorType::Company => "Company Executor",
        }
    }
}

impl fmt::Display for ExecutorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    pub id: EntryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    pub executor_type: ExecutorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Executor {
    /// Switch the executor type.
    ///
    /// Individuals carry first/last names (kept if already present),
    /// companies never do.
    pub fn set_executor_type(&mut self, executor_type: ExecutorType) {
        self.executor_type = executor_type;
        match executor_type {
            ExecutorType::Individual => {
                self.first_name.get_or_insert_with(String::new);
                self.last_name.get_or_insert_with(String::new);
            }
            ExecutorType::Company => {
                self.first_name = None;
                self.last_name = None;
            }
        }
    }

    pub fn is_individual(&self) -> bool {
        self.executor_type == ExecutorType::Individual
    }
}

// =========================================================================
// Step 5: Guardians
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardian {
    pub id: EntryId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

// =========================================================================
// Step 6: Assets
// =========================================================================

/// Retirement savings account declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetDeclaration {
    pub name: String,
    pub rsa_pin_number: String,
    pub pfa: String,
    pub salary_bank_name: String,
    pub salary_account_number: String,
}

// =========================================================================
// Step 7: Distribution
// =========================================================================

/// Share of the declared asset assigned to one beneficiary.
///
/// The asset name is not stored: it is always derived from the asset
/// declaration (see [`crate::domain::schema::asset_name`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDistribution {
    pub id: EntryId,
    #[serde(default)]
    pub beneficiary_id: Option<EntryId>,
    /// Whole-number percentage as typed by the user
    #[serde(default)]
    pub percentage: String,
}

// =========================================================================
// Completion marker
// =========================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalSubmission {
    pub is_submitted: bool,
}

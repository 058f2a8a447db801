//! Step keys, step data and wizard position

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::records::{
    AssetDeclaration, AssetDistribution, Beneficiary, Executor, FinalSubmission, Guardian,
    Identification, PersonalDetails,
};
use super::entries::EntryList;

pub type Beneficiaries = EntryList<Beneficiary>;
pub type Executors = EntryList<Executor>;
pub type Guardians = EntryList<Guardian>;
pub type Distributions = EntryList<AssetDistribution>;

// =========================================================================
// StepKey
// =========================================================================

/// Name of one field of the registration aggregate.
///
/// `FinalSubmission` is the reserved key used to signal completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKey {
    StepOne,
    StepTwo,
    StepThree,
    StepFour,
    StepFive,
    StepSix,
    StepSeven,
    FinalSubmission,
}

impl StepKey {
    /// The seven form steps, in wizard order
    pub const FORM_STEPS: [StepKey; 7] = [
        StepKey::StepOne,
        StepKey::StepTwo,
        StepKey::StepThree,
        StepKey::StepFour,
        StepKey::StepFive,
        StepKey::StepSix,
        StepKey::StepSeven,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKey::StepOne => "stepOne",
            StepKey::StepTwo => "stepTwo",
            StepKey::StepThree => "stepThree",
            StepKey::StepFour => "stepFour",
            StepKey::StepFive => "stepFive",
            StepKey::StepSix => "stepSix",
            StepKey::StepSeven => "stepSeven",
            StepKey::FinalSubmission => "finalSubmission",
        }
    }

    /// Wizard position of a form step; `None` for the completion marker
    pub fn number(&self) -> Option<u8> {
        Self::FORM_STEPS
            .iter()
            .position(|key| key == self)
            .map(|index| index as u8 + 1)
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=7 => Some(Self::FORM_STEPS[number as usize - 1]),
            _ => None,
        }
    }

    /// Human-readable section title
    pub fn title(&self) -> &'static str {
        match self {
            StepKey::StepOne => "Personal Details",
            StepKey::StepTwo => "Identification Details",
            StepKey::StepThree => "Beneficiary Details",
            StepKey::StepFour => "Executors Details",
            StepKey::StepFive => "Guardians Details",
            StepKey::StepSix => "RSA Assets",
            StepKey::StepSeven => "Beneficiary Asset %",
            StepKey::FinalSubmission => "Submission",
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepKey {
    type Err = UnknownStepKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::FORM_STEPS
            .iter()
            .chain(std::iter::once(&StepKey::FinalSubmission))
            .find(|key| key.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownStepKey(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown step key: {0}")]
pub struct UnknownStepKey(pub String);

// =========================================================================
// StepData
// =========================================================================

/// One step's record, tagged with the aggregate field it belongs to.
///
/// JSON form: `{"stepKey": "stepThree", "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stepKey", content = "data")]
pub enum StepData {
    #[serde(rename = "stepOne")]
    Personal(PersonalDetails),
    #[serde(rename = "stepTwo")]
    Identification(Identification),
    #[serde(rename = "stepThree")]
    Beneficiaries(Beneficiaries),
    #[serde(rename = "stepFour")]
    Executors(Executors),
    #[serde(rename = "stepFive")]
    Guardians(Guardians),
    #[serde(rename = "stepSix")]
    Assets(AssetDeclaration),
    #[serde(rename = "stepSeven")]
    Distribution(Distributions),
    #[serde(rename = "finalSubmission")]
    FinalSubmission(FinalSubmission),
}

impl StepData {
    pub fn key(&self) -> StepKey {
        match self {
            StepData::Personal(_) => StepKey::StepOne,
            StepData::Identification(_) => StepKey::StepTwo,
            StepData::Beneficiaries(_) => StepKey::StepThree,
            StepData::Executors(_) => StepKey::StepFour,
            StepData::Guardians(_) => StepKey::StepFive,
            StepData::Assets(_) => StepKey::StepSix,
            StepData::Distribution(_) => StepKey::StepSeven,
            StepData::FinalSubmission(_) => StepKey::FinalSubmission,
        }
    }
}

// =========================================================================
// WizardStep
// =========================================================================

/// Wizard position: 1..=7 are the form steps, 8 is Review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WizardStep(u8);

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep(1);
    pub const REVIEW: WizardStep = WizardStep(8);

    pub fn new(value: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::REVIEW.0)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Clamp any integer into 1..=8
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::FIRST.0 as i64, Self::REVIEW.0 as i64) as u8)
    }

    /// Read a persisted position. Out-of-range values are clamped; values
    /// that are not integers at all restart the wizard at step 1.
    pub fn from_persisted(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map(Self::clamped)
            .unwrap_or(Self::FIRST)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn is_review(&self) -> bool {
        *self == Self::REVIEW
    }

    /// The form step shown at this position (`None` on Review)
    pub fn step_key(&self) -> Option<StepKey> {
        StepKey::from_number(self.0)
    }

    /// One step forward, capped at Review
    pub fn next(&self) -> Self {
        Self::clamped(self.0 as i64 + 1)
    }

    /// One step back, floored at step 1
    pub fn previous(&self) -> Self {
        Self::clamped(self.0 as i64 - 1)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        WizardStep::new(value).ok_or_else(|| format!("wizard step out of range: {}", value))
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.0
    }
}

//! Review projection
//!
//! Read-only, human-labelled view of the whole aggregate shown on the
//! Review step. File fields show as Uploaded/Missing; distribution
//! entries show the beneficiary's name instead of its id.

use std::collections::HashMap;

use serde::Serialize;

use crate::aggregate::RegistrationAggregate;
use crate::domain::{Beneficiaries, EntryId, FileBlob, StepKey};

pub const BENEFICIARY_NOT_FOUND: &str = "Beneficiary Not Found";
pub const NOT_PROVIDED: &str = "N/A";
pub const UPLOADED: &str = "Uploaded";
pub const MISSING: &str = "Missing";

/// One labelled value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewField {
    pub label: &'static str,
    pub value: String,
}

/// Fields of one record (scalar step) or one list entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewGroup {
    pub fields: Vec<ReviewField>,
}

impl ReviewGroup {
    fn text(mut self, label: &'static str, value: &str) -> Self {
        let value = if value.is_empty() { NOT_PROVIDED } else { value };
        self.fields.push(ReviewField {
            label,
            value: value.to_string(),
        });
        self
    }

    fn file(mut self, label: &'static str, blob: Option<&FileBlob>) -> Self {
        let value = if blob.is_some() { UPLOADED } else { MISSING };
        self.fields.push(ReviewField {
            label,
            value: value.to_string(),
        });
        self
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }
}

/// One review section; `step` is the jump target for "edit this section"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSection {
    pub step: u8,
    pub step_key: StepKey,
    pub title: &'static str,
    pub groups: Vec<ReviewGroup>,
}

impl ReviewSection {
    fn new(step_key: StepKey, groups: Vec<ReviewGroup>) -> Self {
        Self {
            step: step_key.number().unwrap_or_default(),
            step_key,
            title: step_key.title(),
            groups,
        }
    }
}

/// id → "{firstName} {lastName}" for every beneficiary
pub fn beneficiary_names(beneficiaries: &Beneficiaries) -> HashMap<&EntryId, String> {
    beneficiaries
        .iter()
        .map(|beneficiary| (&beneficiary.id, beneficiary.full_name()))
        .collect()
}

/// Display name for a referenced beneficiary; dangling or unset
/// references fall back to [`BENEFICIARY_NOT_FOUND`]
pub fn resolve_beneficiary(names: &HashMap<&EntryId, String>, id: Option<&EntryId>) -> String {
    id.and_then(|id| names.get(id))
        .cloned()
        .unwrap_or_else(|| BENEFICIARY_NOT_FOUND.to_string())
}

/// Project the aggregate into review sections, in step order
pub fn project_review(aggregate: &RegistrationAggregate) -> Vec<ReviewSection> {
    let personal = aggregate.personal();
    let identification = aggregate.identification();
    let assets = aggregate.assets();
    let names = beneficiary_names(aggregate.beneficiaries());
    let asset = aggregate.asset_name();

    vec![
        ReviewSection::new(
            StepKey::StepOne,
            vec![ReviewGroup::default()
                .text("Place of Birth", &personal.place_of_birth)
                .text("Religion", &personal.religion)
                .text("Gender", &personal.gender)
                .text("Home Address", &personal.home_address)
                .text("City", &personal.city)
                .text("State", &personal.state)
                .file("Passport Photo", personal.passport_photo.as_ref())
                .file("Signature", personal.signature.as_ref())],
        ),
        ReviewSection::new(
            StepKey::StepTwo,
            vec![ReviewGroup::default()
                .text(
                    "ID Type",
                    identification.id_type.map(|t| t.as_str()).unwrap_or_default(),
                )
                .text("ID Number", &identification.id_number)
                .file("ID Image", identification.id_image.as_ref())],
        ),
        ReviewSection::new(
            StepKey::StepThree,
            aggregate
                .beneficiaries()
                .iter()
                .map(|b| {
                    ReviewGroup::default()
                        .text("First Name", &b.first_name)
                        .text("Last Name", &b.last_name)
                        .text("Date of Birth", &b.date_of_birth)
                        .text("Gender", &b.gender)
                })
                .collect(),
        ),
        ReviewSection::new(
            StepKey::StepFour,
            aggregate
                .executors()
                .iter()
                .map(|e| {
                    let group = ReviewGroup::default()
                        .text("Type", e.executor_type.as_str())
                        .text("Name", &e.name);
                    let group = if e.is_individual() {
                        group
                            .text("First Name", e.first_name.as_deref().unwrap_or_default())
                            .text("Last Name", e.last_name.as_deref().unwrap_or_default())
                    } else {
                        group
                    };
                    group
                        .text("Phone", &e.phone)
                        .text("Address", &e.address)
                        .text("State", &e.state)
                        .text("City", &e.city)
                })
                .collect(),
        ),
        ReviewSection::new(
            StepKey::StepFive,
            aggregate
                .guardians()
                .iter()
                .map(|g| {
                    ReviewGroup::default()
                        .text("First Name", &g.first_name)
                        .text("Last Name", &g.last_name)
                        .text("Phone", &g.phone)
                        .text("Relationship", &g.relationship)
                        .text("Address", &g.address)
                        .text("City", &g.city)
                        .text("State", &g.state)
                })
                .collect(),
        ),
        ReviewSection::new(
            StepKey::StepSix,
            vec![ReviewGroup::default()
                .text("Name", &assets.name)
                .text("RSA PIN Number", &assets.rsa_pin_number)
                .text("PFA", &assets.pfa)
                .text("Salary Bank", &assets.salary_bank_name)
                .text("Salary Account No.", &assets.salary_account_number)],
        ),
        ReviewSection::new(
            StepKey::StepSeven,
            aggregate
                .distributions()
                .iter()
                .map(|d| {
                    ReviewGroup::default()
                        .text(
                            "Beneficiary Name",
                            &resolve_beneficiary(&names, d.beneficiary_id.as_ref()),
                        )
                        .text("Asset", &asset)
                        .text("Percentage", &d.percentage)
                })
                .collect(),
        ),
    ]
}

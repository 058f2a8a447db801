//! Registration Aggregate
//!
//! Holds the full cross-step registration record. Applying step data
//! replaces exactly one field; validation is the wizard's job, not ours.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::schema::{asset_name, blank_step, default_executor};
use crate::domain::{
    AssetDeclaration, Beneficiaries, Distributions, EntryList, Executors, FinalSubmission,
    Guardians, Identification, PersonalDetails, StepData, StepKey,
};

use super::Aggregate;

/// Registration Aggregate
///
/// One per registration session. All seven step fields are present from
/// construction on, initialised to their blank values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationAggregate {
    /// Registration session instance
    #[serde(skip)]
    id: Uuid,

    /// Number of merges applied
    #[serde(skip)]
    version: i64,

    step_one: PersonalDetails,
    step_two: Identification,
    step_three: Beneficiaries,
    step_four: Executors,
    step_five: Guardians,
    step_six: AssetDeclaration,
    step_seven: Distributions,
    final_submission: FinalSubmission,
}

impl Default for RegistrationAggregate {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationAggregate {
    /// Fresh aggregate with every step at its blank value
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 0,
            step_one: PersonalDetails::default(),
            step_two: Identification::default(),
            step_three: EntryList::with_blank(),
            step_four: EntryList::new(vec![default_executor()]),
            step_five: EntryList::with_blank(),
            step_six: AssetDeclaration::default(),
            step_seven: EntryList::with_blank(),
            final_submission: FinalSubmission::default(),
        }
    }

    /// Replace the field named by `data`'s step key
    pub fn merge(self, data: StepData) -> Self {
        self.apply(data)
    }

    /// Current record for `key`, as step data
    pub fn step(&self, key: StepKey) -> StepData {
        match key {
            StepKey::StepOne => StepData::Personal(self.step_one.clone()),
            StepKey::StepTwo => StepData::Identification(self.step_two.clone()),
            StepKey::StepThree => StepData::Beneficiaries(self.step_three.clone()),
            StepKey::StepFour => StepData::Executors(self.step_four.clone()),
            StepKey::StepFive => StepData::Guardians(self.step_five.clone()),
            StepKey::StepSix => StepData::Assets(self.step_six.clone()),
            StepKey::StepSeven => StepData::Distribution(self.step_seven.clone()),
            StepKey::FinalSubmission => StepData::FinalSubmission(self.final_submission),
        }
    }

    /// Starting point for editing `key`.
    ///
    /// Same as [`step`](Self::step) except that a distribution draft is
    /// never empty.
    pub fn draft(&self, key: StepKey) -> StepData {
        match self.step(key) {
            StepData::Distribution(list) if list.is_empty() => blank_step(StepKey::StepSeven),
            data => data,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn personal(&self) -> &PersonalDetails {
        &self.step_one
    }

    pub fn identification(&self) -> &Identification {
        &self.step_two
    }

    pub fn beneficiaries(&self) -> &Beneficiaries {
        &self.step_three
    }

    pub fn executors(&self) -> &Executors {
        &self.step_four
    }

    pub fn guardians(&self) -> &Guardians {
        &self.step_five
    }

    pub fn assets(&self) -> &AssetDeclaration {
        &self.step_six
    }

    pub fn distributions(&self) -> &Distributions {
        &self.step_seven
    }

    pub fn final_submission(&self) -> FinalSubmission {
        self.final_submission
    }

    pub fn is_submitted(&self) -> bool {
        self.final_submission.is_submitted
    }

    /// Asset every distribution entry refers to
    pub fn asset_name(&self) -> String {
        asset_name(&self.step_six)
    }
}

impl Aggregate for RegistrationAggregate {
    type Update = StepData;

    fn aggregate_type() -> &'static str {
        "Registration"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(mut self, update: Self::Update) -> Self {
        match update {
            StepData::Personal(details) => self.step_one = details,
            StepData::Identification(identification) => self.step_two = identification,
            StepData::Beneficiaries(beneficiaries) => self.step_three = beneficiaries,
            StepData::Executors(executors) => self.step_four = executors,
            StepData::Guardians(guardians) => self.step_five = guardians,
            StepData::Assets(assets) => self.step_six = assets,
            StepData::Distribution(distributions) => self.step_seven = distributions,
            StepData::FinalSubmission(marker) => self.final_submission = marker,
        }

        self.version += 1;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetDistribution, Beneficiary, EntryId};

    fn ada() -> Beneficiary {
        Beneficiary {
            id: EntryId::from("b1"),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: "2010-12-10".to_string(),
            gender: "Female".to_string(),
        }
    }

    #[test]
    fn test_new_aggregate_has_every_step() {
        let aggregate = RegistrationAggregate::new();

        assert_eq!(aggregate.beneficiaries().len(), 1);
        assert_eq!(aggregate.executors().len(), 1);
        assert_eq!(aggregate.guardians().len(), 1);
        assert_eq!(aggregate.distributions().len(), 1);
        assert!(!aggregate.is_submitted());
        assert_eq!(aggregate.version(), 0);
    }

    #[test]
    fn test_merge_replaces_only_the_named_field() {
        let before = RegistrationAggregate::new();
        let snapshot = before.clone();

        let after = before.merge(StepData::Beneficiaries(EntryList::new(vec![ada()])));

        assert_eq!(after.beneficiaries().entries(), &[ada()]);
        assert_eq!(after.personal(), snapshot.personal());
        assert_eq!(after.identification(), snapshot.identification());
        assert_eq!(after.executors(), snapshot.executors());
        assert_eq!(after.guardians(), snapshot.guardians());
        assert_eq!(after.assets(), snapshot.assets());
        assert_eq!(after.distributions(), snapshot.distributions());
        assert_eq!(after.final_submission(), snapshot.final_submission());
        assert_eq!(after.id(), snapshot.id());
        assert_eq!(after.version(), 1);
    }

    #[test]
    fn test_step_reads_back_what_was_merged() {
        let assets = AssetDeclaration {
            pfa: "Leadway Pensure".to_string(),
            ..Default::default()
        };
        let aggregate = RegistrationAggregate::new().merge(StepData::Assets(assets.clone()));

        assert_eq!(aggregate.step(StepKey::StepSix), StepData::Assets(assets));
        assert_eq!(aggregate.asset_name(), "Leadway Pensure account");
    }

    #[test]
    fn test_final_submission_marker() {
        let aggregate = RegistrationAggregate::new()
            .merge(StepData::FinalSubmission(FinalSubmission { is_submitted: true }));
        assert!(aggregate.is_submitted());
    }

    #[test]
    fn test_distribution_draft_is_never_empty() {
        let aggregate =
            RegistrationAggregate::new().merge(StepData::Distribution(EntryList::new(vec![])));

        let StepData::Distribution(draft) = aggregate.draft(StepKey::StepSeven) else {
            panic!("expected distribution draft");
        };
        assert_eq!(draft.len(), 1);

        let entry: &AssetDistribution = &draft.entries()[0];
        assert!(entry.beneficiary_id.is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(RegistrationAggregate::new()).unwrap();
        assert!(json.get("stepOne").is_some());
        assert!(json.get("stepSeven").is_some());
        assert_eq!(json["finalSubmission"]["isSubmitted"], false);
        assert!(json.get("id").is_none());
    }
}

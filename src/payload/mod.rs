//! Step Payload Serializer
//!
//! Converts one step's record into a multipart form for the remote
//! registration service. Every form starts with `registrationKey` and
//! `stepKey`; absent values are omitted, empty strings are sent as-is.
//!
//! Sequence steps use indexed field names, `stepThree[0].firstName`,
//! so each entry binds back to a list element on the receiving side.

mod form;

pub use form::{FormPart, MultipartForm, PartValue};

use crate::domain::schema::asset_name;
use crate::domain::{
    AssetDeclaration, AssetDistribution, Beneficiary, EntryList, Executor, Guardian,
    Identification, ListEntry, PersonalDetails, SessionToken, StepData, StepKey,
};

pub const REGISTRATION_KEY_FIELD: &str = "registrationKey";
pub const STEP_KEY_FIELD: &str = "stepKey";

/// Build the outbound form for one step.
///
/// `assets` supplies the derived asset name written into every
/// distribution entry.
pub fn encode_step(
    token: &SessionToken,
    data: &StepData,
    assets: &AssetDeclaration,
) -> MultipartForm {
    let key = data.key();
    let mut form = MultipartForm::new();
    form.text(REGISTRATION_KEY_FIELD, token.as_str());
    form.text(STEP_KEY_FIELD, key.as_str());

    match data {
        StepData::Personal(details) => encode_personal(&mut form, details),
        StepData::Identification(identification) => {
            encode_identification(&mut form, identification)
        }
        StepData::Beneficiaries(list) => encode_list(&mut form, key, list, encode_beneficiary),
        StepData::Executors(list) => encode_list(&mut form, key, list, encode_executor),
        StepData::Guardians(list) => encode_list(&mut form, key, list, encode_guardian),
        StepData::Assets(assets) => encode_assets(&mut form, assets),
        StepData::Distribution(list) => {
            let asset = asset_name(assets);
            encode_list(&mut form, key, list, |form, prefix, entry| {
                encode_distribution(form, prefix, entry, &asset)
            })
        }
        StepData::FinalSubmission(marker) => {
            form.text("isSubmitted", marker.is_submitted.to_string())
        }
    }

    form
}

fn encode_personal(form: &mut MultipartForm, details: &PersonalDetails) {
    form.text("placeOfBirth", details.place_of_birth.as_str());
    form.text("religion", details.religion.as_str());
    form.text("gender", details.gender.as_str());
    form.text("homeAddress", details.home_address.as_str());
    form.text("city", details.city.as_str());
    form.text("state", details.state.as_str());
    form.opt_file("passportPhoto", details.passport_photo.as_ref());
    form.opt_file("signature", details.signature.as_ref());
}

fn encode_identification(form: &mut MultipartForm, identification: &Identification) {
    form.opt_text("idType", identification.id_type.map(|t| t.as_str()));
    form.text("idNumber", identification.id_number.as_str());
    form.opt_file("idImage", identification.id_image.as_ref());
}

fn encode_assets(form: &mut MultipartForm, assets: &AssetDeclaration) {
    form.text("name", assets.name.as_str());
    form.text("rsaPinNumber", assets.rsa_pin_number.as_str());
    form.text("pfa", assets.pfa.as_str());
    form.text("salaryBankName", assets.salary_bank_name.as_str());
    form.text("salaryAccountNumber", assets.salary_account_number.as_str());
}

fn encode_list<T, F>(form: &mut MultipartForm, key: StepKey, list: &EntryList<T>, mut encode: F)
where
    T: ListEntry,
    F: FnMut(&mut MultipartForm, &str, &T),
{
    for (index, entry) in list.entries().iter().enumerate() {
        let prefix = format!("{}[{}]", key.as_str(), index);
        encode(form, &prefix, entry);
    }
}

fn field(prefix: &str, name: &str) -> String {
    format!("{}.{}", prefix, name)
}

fn encode_beneficiary(form: &mut MultipartForm, prefix: &str, entry: &Beneficiary) {
    form.text(field(prefix, "id"), entry.id.as_str());
    form.text(field(prefix, "firstName"), entry.first_name.as_str());
    form.text(field(prefix, "lastName"), entry.last_name.as_str());
    form.text(field(prefix, "dateOfBirth"), entry.date_of_birth.as_str());
    form.text(field(prefix, "gender"), entry.gender.as_str());
}

fn encode_executor(form: &mut MultipartForm, prefix: &str, entry: &Executor) {
    form.text(field(prefix, "id"), entry.id.as_str());
    form.text(field(prefix, "name"), entry.name.as_str());
    form.text(field(prefix, "phone"), entry.phone.as_str());
    form.text(field(prefix, "address"), entry.address.as_str());
    form.text(field(prefix, "state"), entry.state.as_str());
    form.text(field(prefix, "city"), entry.city.as_str());
    form.text(field(prefix, "executorType"), entry.executor_type.as_str());
    form.opt_text(field(prefix, "firstName"), entry.first_name.as_deref());
    form.opt_text(field(prefix, "lastName"), entry.last_name.as_deref());
}

fn encode_guardian(form: &mut MultipartForm, prefix: &str, entry: &Guardian) {
    form.text(field(prefix, "id"), entry.id.as_str());
    form.text(field(prefix, "firstName"), entry.first_name.as_str());
    form.text(field(prefix, "lastName"), entry.last_name.as_str());
    form.text(field(prefix, "phone"), entry.phone.as_str());
    form.text(field(prefix, "relationship"), entry.relationship.as_str());
    form.text(field(prefix, "address"), entry.address.as_str());
    form.text(field(prefix, "city"), entry.city.as_str());
    form.text(field(prefix, "state"), entry.state.as_str());
}

fn encode_distribution(
    form: &mut MultipartForm,
    prefix: &str,
    entry: &AssetDistribution,
    asset: &str,
) {
    form.text(field(prefix, "id"), entry.id.as_str());
    form.opt_text(
        field(prefix, "beneficiaryId"),
        entry.beneficiary_id.as_ref().map(|id| id.as_str()),
    );
    form.text(field(prefix, "assetName"), asset);
    form.text(field(prefix, "percentage"), entry.percentage.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::default_executor;
    use crate::domain::{EntryId, FileBlob, FinalSubmission, IdentificationType};

    fn token() -> SessionToken {
        SessionToken::new("reg-42").unwrap()
    }

    fn pfa() -> AssetDeclaration {
        AssetDeclaration {
            pfa: "Leadway Pensure".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_every_form_starts_with_key_and_step() {
        let form = encode_step(&token(), &StepData::Assets(pfa()), &pfa());

        assert_eq!(form.names()[..2], [REGISTRATION_KEY_FIELD, STEP_KEY_FIELD]);
        assert_eq!(form.get_text(REGISTRATION_KEY_FIELD), Some("reg-42"));
        assert_eq!(form.get_text(STEP_KEY_FIELD), Some("stepSix"));
        assert_eq!(form.get_text("pfa"), Some("Leadway Pensure"));
    }

    #[test]
    fn test_absent_files_are_omitted() {
        let details = PersonalDetails {
            place_of_birth: "Kano".to_string(),
            passport_photo: Some(FileBlob::new("me.jpg", "image/jpeg", vec![1, 2])),
            signature: None,
            ..Default::default()
        };
        let form = encode_step(&token(), &StepData::Personal(details), &pfa());

        assert_eq!(form.get_file("passportPhoto").map(|f| f.file_name.as_str()), Some("me.jpg"));
        assert!(!form.contains("signature"));
        // empty strings are still sent
        assert_eq!(form.get_text("religion"), Some(""));
    }

    #[test]
    fn test_identification_without_type() {
        let form = encode_step(
            &token(),
            &StepData::Identification(Identification::default()),
            &pfa(),
        );
        assert!(!form.contains("idType"));
        assert!(!form.contains("idImage"));
        assert_eq!(form.get_text("idNumber"), Some(""));

        let chosen = Identification {
            id_type: Some(IdentificationType::Bvn),
            ..Default::default()
        };
        let form = encode_step(&token(), &StepData::Identification(chosen), &pfa());
        assert_eq!(form.get_text("idType"), Some("BVN"));
    }

    #[test]
    fn test_sequences_use_indexed_names() {
        let mut executors = EntryList::new(vec![default_executor()]);
        executors.push(Executor {
            first_name: Some("Tunde".to_string()),
            ..Executor::blank()
        });

        let form = encode_step(&token(), &StepData::Executors(executors), &pfa());

        assert_eq!(form.get_text("stepFour[0].name"), Some("Leadway Trustees"));
        assert_eq!(form.get_text("stepFour[0].executorType"), Some("Company Executor"));
        assert!(!form.contains("stepFour[0].firstName"));
        assert_eq!(form.get_text("stepFour[1].firstName"), Some("Tunde"));
        assert_eq!(form.get_text("stepFour[1].executorType"), Some("Individual Executor"));
    }

    #[test]
    fn test_every_list_entry_is_encoded_in_order() {
        let beneficiaries = EntryList::new(
            ["Ada", "Chidi", "Amaka"]
                .iter()
                .map(|name| Beneficiary {
                    first_name: name.to_string(),
                    ..Beneficiary::blank()
                })
                .collect(),
        );
        let ids: Vec<String> = beneficiaries
            .entries()
            .iter()
            .map(|b| b.id.as_str().to_string())
            .collect();

        let form = encode_step(&token(), &StepData::Beneficiaries(beneficiaries), &pfa());

        assert_eq!(form.get_text("stepThree[0].firstName"), Some("Ada"));
        assert_eq!(form.get_text("stepThree[2].firstName"), Some("Amaka"));
        assert_eq!(form.get_text("stepThree[1].id"), Some(ids[1].as_str()));
        assert!(!form.contains("stepThree[3].firstName"));
    }

    #[test]
    fn test_distribution_carries_derived_asset_name() {
        let list = EntryList::new(vec![AssetDistribution {
            id: EntryId::from("d1"),
            beneficiary_id: Some(EntryId::from("b1")),
            percentage: "100".to_string(),
        }]);

        let form = encode_step(&token(), &StepData::Distribution(list), &pfa());

        assert_eq!(form.get_text("stepSeven[0].beneficiaryId"), Some("b1"));
        assert_eq!(form.get_text("stepSeven[0].assetName"), Some("Leadway Pensure account"));
        assert_eq!(form.get_text("stepSeven[0].percentage"), Some("100"));
    }

    #[test]
    fn test_unselected_beneficiary_is_omitted() {
        let list = EntryList::new(vec![AssetDistribution::blank()]);
        let form = encode_step(&token(), &StepData::Distribution(list), &pfa());
        assert!(!form.contains("stepSeven[0].beneficiaryId"));
    }

    #[test]
    fn test_final_submission_marker() {
        let form = encode_step(
            &token(),
            &StepData::FinalSubmission(FinalSubmission { is_submitted: true }),
            &pfa(),
        );
        assert_eq!(form.get_text(STEP_KEY_FIELD), Some("finalSubmission"));
        assert_eq!(form.get_text("isSubmitted"), Some("true"));
        assert_eq!(form.len(), 3);
    }
}

//! Step Validators
//!
//! One pure predicate per step deciding whether the step may be submitted.
//! A failing check keeps the wizard where it is; nothing here errors.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::schema::{is_default_executor, MAX_EXECUTORS};
use crate::domain::{
    AssetDeclaration, AssetDistribution, Beneficiary, Distributions, Executor, Executors,
    Guardian, Guardians, Identification, PersonalDetails, StepData,
};

/// Required total of all distribution percentages
pub const DISTRIBUTION_TOTAL: Decimal = Decimal::ONE_HUNDRED;

/// Whether `data` is complete enough to proceed
pub fn is_step_valid(data: &StepData) -> bool {
    match data {
        StepData::Personal(details) => is_personal_valid(details),
        StepData::Identification(identification) => is_identification_valid(identification),
        StepData::Beneficiaries(beneficiaries) => {
            !beneficiaries.is_empty() && beneficiaries.iter().all(is_beneficiary_valid)
        }
        StepData::Executors(executors) => is_executors_valid(executors),
        StepData::Guardians(guardians) => is_guardians_valid(guardians),
        StepData::Assets(assets) => is_assets_valid(assets),
        StepData::Distribution(distributions) => is_distribution_valid(distributions),
        StepData::FinalSubmission(_) => true,
    }
}

fn filled(value: &str) -> bool {
    !value.is_empty()
}

fn filled_opt(value: Option<&String>) -> bool {
    value.map_or(false, |v| filled(v))
}

pub fn is_personal_valid(details: &PersonalDetails) -> bool {
    filled(&details.place_of_birth)
        && filled(&details.religion)
        && filled(&details.gender)
        && filled(&details.home_address)
        && filled(&details.city)
        && filled(&details.state)
        && details.passport_photo.is_some()
        && details.signature.is_some()
}

pub fn is_identification_valid(identification: &Identification) -> bool {
    identification.id_type.is_some()
        && filled(&identification.id_number)
        && identification.id_image.is_some()
}

pub fn is_beneficiary_valid(beneficiary: &Beneficiary) -> bool {
    filled(&beneficiary.first_name)
        && filled(&beneficiary.last_name)
        && filled(&beneficiary.date_of_birth)
        && filled(&beneficiary.gender)
}

/// Base contact fields, plus first/last name for individuals
pub fn is_executor_valid(executor: &Executor) -> bool {
    let base = filled(&executor.name)
        && filled(&executor.phone)
        && filled(&executor.address)
        && filled(&executor.state)
        && filled(&executor.city);

    if executor.is_individual() {
        base && filled_opt(executor.first_name.as_ref()) && filled_opt(executor.last_name.as_ref())
    } else {
        base
    }
}

/// The default executor must lead the list, unchanged
pub fn is_executors_valid(executors: &Executors) -> bool {
    (1..=MAX_EXECUTORS).contains(&executors.len())
        && executors.entries().first().map_or(false, is_default_executor)
        && executors.iter().all(is_executor_valid)
}

pub fn is_guardian_valid(guardian: &Guardian) -> bool {
    filled(&guardian.first_name)
        && filled(&guardian.last_name)
        && filled(&guardian.phone)
        && filled(&guardian.relationship)
        && filled(&guardian.address)
        && filled(&guardian.city)
        && filled(&guardian.state)
}

pub fn is_guardians_valid(guardians: &Guardians) -> bool {
    !guardians.is_empty() && guardians.iter().all(is_guardian_valid)
}

pub fn is_assets_valid(assets: &AssetDeclaration) -> bool {
    filled(&assets.name)
        && filled(&assets.rsa_pin_number)
        && filled(&assets.pfa)
        && filled(&assets.salary_bank_name)
        && filled(&assets.salary_account_number)
}

/// The asset name is derived from the asset declaration and is therefore
/// always present; only the beneficiary and percentage are checked.
pub fn is_distribution_entry_valid(entry: &AssetDistribution) -> bool {
    entry
        .beneficiary_id
        .as_ref()
        .map_or(false, |id| !id.is_empty())
        && filled(&entry.percentage)
}

/// Numeric value of a percentage field, read from its leading number the
/// way a browser's `parseFloat` reads it: `"50%"` is 50, `"1e2"` is 100.
///
/// Text with no leading number counts as zero. `None` means the number is
/// too large to represent.
pub fn parse_percentage(raw: &str) -> Option<Decimal> {
    let Some(number) = leading_number(raw) else {
        return Some(Decimal::ZERO);
    };
    match number.exponent {
        None => Decimal::from_str(&number.mantissa).ok(),
        Some(exponent) => {
            Decimal::from_scientific(&format!("{}e{}", number.mantissa, exponent)).ok()
        }
    }
}

struct LeadingNumber {
    mantissa: String,
    exponent: Option<String>,
}

fn digits_from(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Longest prefix of `raw` (after leading whitespace) that reads as a
/// decimal number, normalised so `Decimal` accepts it
fn leading_number(raw: &str) -> Option<LeadingNumber> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut mantissa = String::new();
    let mut pos = 0;

    if let Some(&sign) = bytes.first().filter(|b| matches!(b, b'+' | b'-')) {
        if sign == b'-' {
            mantissa.push('-');
        }
        pos = 1;
    }

    let int_len = digits_from(bytes, pos);
    let int_part = &text[pos..pos + int_len];
    pos += int_len;

    let mut frac_part = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_len = digits_from(bytes, pos + 1);
        frac_part = &text[pos + 1..pos + 1 + frac_len];
        pos += 1 + frac_len;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    mantissa.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        mantissa.push('.');
        mantissa.push_str(frac_part);
    }

    let mut exponent = None;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let negative = bytes.get(exp_pos) == Some(&b'-');
        if matches!(bytes.get(exp_pos), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_len = digits_from(bytes, exp_pos);
        if exp_len > 0 {
            let digits = &text[exp_pos..exp_pos + exp_len];
            exponent = Some(if negative {
                format!("-{}", digits)
            } else {
                digits.to_string()
            });
        }
    }

    Some(LeadingNumber { mantissa, exponent })
}

/// Sum of all entries' percentages, unrounded. `None` when an entry or
/// the running total is too large to represent.
pub fn distribution_total(distributions: &Distributions) -> Option<Decimal> {
    distributions.iter().try_fold(Decimal::ZERO, |total, entry| {
        total.checked_add(parse_percentage(&entry.percentage)?)
    })
}

/// Total rounded half away from zero, as compared against 100
pub fn rounded_distribution_total(distributions: &Distributions) -> Option<Decimal> {
    distribution_total(distributions)
        .map(|total| total.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

pub fn is_distribution_valid(distributions: &Distributions) -> bool {
    distributions.iter().all(is_distribution_entry_valid)
        && rounded_distribution_total(distributions) == Some(DISTRIBUTION_TOTAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::default_executor;
    use crate::domain::{EntryId, EntryList, ExecutorType, FileBlob, IdentificationType, ListEntry};
    use rust_decimal_macros::dec;

    fn photo() -> FileBlob {
        FileBlob::new("photo.png", "image/png", vec![0x89, 0x50])
    }

    fn personal() -> PersonalDetails {
        PersonalDetails {
            place_of_birth: "Ibadan".to_string(),
            religion: "Christianity".to_string(),
            gender: "Female".to_string(),
            home_address: "12 Adeola Odeku Street".to_string(),
            city: "Victoria Island".to_string(),
            state: "Lagos".to_string(),
            passport_photo: Some(photo()),
            signature: Some(photo()),
        }
    }

    fn beneficiary() -> Beneficiary {
        Beneficiary {
            id: EntryId::generate(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: "2010-12-10".to_string(),
            gender: "Female".to_string(),
        }
    }

    fn guardian() -> Guardian {
        Guardian {
            id: EntryId::generate(),
            first_name: "Chinedu".to_string(),
            last_name: "Eze".to_string(),
            phone: "08031234567".to_string(),
            relationship: "Uncle".to_string(),
            address: "4 Awolowo Road".to_string(),
            city: "Ikoyi".to_string(),
            state: "Lagos".to_string(),
        }
    }

    fn assets() -> AssetDeclaration {
        AssetDeclaration {
            name: "Ada Lovelace".to_string(),
            rsa_pin_number: "PEN100012345678".to_string(),
            pfa: "Leadway Pensure".to_string(),
            salary_bank_name: "First Bank".to_string(),
            salary_account_number: "0123456789".to_string(),
        }
    }

    fn shares(percentages: &[&str]) -> Distributions {
        EntryList::new(
            percentages
                .iter()
                .map(|p| AssetDistribution {
                    id: EntryId::generate(),
                    beneficiary_id: Some(EntryId::from("b1")),
                    percentage: p.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_personal_requires_every_field() {
        assert!(is_personal_valid(&personal()));

        fn assert_invalid_without(blank: impl Fn(&mut PersonalDetails)) {
            let mut details = personal();
            blank(&mut details);
            assert!(!is_step_valid(&StepData::Personal(details)));
        }

        assert_invalid_without(|p| p.place_of_birth.clear());
        assert_invalid_without(|p| p.religion.clear());
        assert_invalid_without(|p| p.gender.clear());
        assert_invalid_without(|p| p.home_address.clear());
        assert_invalid_without(|p| p.city.clear());
        assert_invalid_without(|p| p.state.clear());
        assert_invalid_without(|p| p.passport_photo = None);
        assert_invalid_without(|p| p.signature = None);
    }

    #[test]
    fn test_identification_requires_type_number_and_image() {
        let full = Identification {
            id_type: Some(IdentificationType::VotersCard),
            id_number: "90F5B1234567".to_string(),
            id_image: Some(photo()),
        };
        assert!(is_identification_valid(&full));

        let mut no_type = full.clone();
        no_type.id_type = None;
        assert!(!is_identification_valid(&no_type));

        let mut no_number = full.clone();
        no_number.id_number.clear();
        assert!(!is_identification_valid(&no_number));

        let mut no_image = full;
        no_image.id_image = None;
        assert!(!is_identification_valid(&no_image));
    }

    #[test]
    fn test_beneficiaries_need_one_complete_entry_each() {
        let empty: EntryList<Beneficiary> = EntryList::new(vec![]);
        assert!(!is_step_valid(&StepData::Beneficiaries(empty)));

        let valid = EntryList::new(vec![beneficiary(), beneficiary()]);
        assert!(is_step_valid(&StepData::Beneficiaries(valid)));

        let mut partial = beneficiary();
        partial.date_of_birth.clear();
        let invalid = EntryList::new(vec![beneficiary(), partial]);
        assert!(!is_step_valid(&StepData::Beneficiaries(invalid)));
    }

    #[test]
    fn test_default_executor_alone_is_valid() {
        let executors = EntryList::new(vec![default_executor()]);
        assert!(is_executors_valid(&executors));
    }

    #[test]
    fn test_executors_must_lead_with_the_default() {
        let mut replaced = default_executor();
        replaced.name = "Someone Else Ltd".to_string();
        assert!(!is_executors_valid(&EntryList::new(vec![replaced])));

        let mut individual = Executor::blank();
        individual.name = "Tunde Bakare".to_string();
        individual.phone = "08029876543".to_string();
        individual.address = "7 Allen Avenue".to_string();
        individual.state = "Lagos".to_string();
        individual.city = "Ikeja".to_string();
        individual.first_name = Some("Tunde".to_string());
        individual.last_name = Some("Bakare".to_string());

        let default_second = EntryList::new(vec![individual.clone(), default_executor()]);
        assert!(!is_executors_valid(&default_second));

        let default_first = EntryList::new(vec![default_executor(), individual]);
        assert!(is_executors_valid(&default_first));
    }

    #[test]
    fn test_individual_executor_needs_names() {
        let mut individual = Executor::blank();
        individual.name = "Tunde Bakare".to_string();
        individual.phone = "08029876543".to_string();
        individual.address = "7 Allen Avenue".to_string();
        individual.state = "Lagos".to_string();
        individual.city = "Ikeja".to_string();
        assert!(!is_executor_valid(&individual));

        individual.first_name = Some("Tunde".to_string());
        individual.last_name = Some("Bakare".to_string());
        assert!(is_executor_valid(&individual));

        let mut company = individual.clone();
        company.set_executor_type(ExecutorType::Company);
        assert!(is_executor_valid(&company));
    }

    #[test]
    fn test_executor_count_bounds() {
        assert!(!is_executors_valid(&EntryList::new(vec![])));

        let four = EntryList::new(vec![
            default_executor(),
            default_executor(),
            default_executor(),
            default_executor(),
        ]);
        assert!(!is_executors_valid(&four));
    }

    #[test]
    fn test_guardians() {
        assert!(is_guardians_valid(&EntryList::new(vec![guardian()])));
        assert!(!is_guardians_valid(&EntryList::new(vec![])));

        let mut partial = guardian();
        partial.relationship.clear();
        assert!(!is_guardians_valid(&EntryList::new(vec![guardian(), partial])));
    }

    #[test]
    fn test_assets_require_every_field() {
        assert!(is_assets_valid(&assets()));

        let mut missing_pfa = assets();
        missing_pfa.pfa.clear();
        assert!(!is_step_valid(&StepData::Assets(missing_pfa)));
    }

    #[test]
    fn test_distribution_sums_to_one_hundred() {
        assert!(is_distribution_valid(&shares(&["40", "30", "30"])));
        assert!(!is_distribution_valid(&shares(&["40", "30"])));
        assert!(is_distribution_valid(&shares(&["33.3", "33.3", "33.4"])));
        assert!(is_distribution_valid(&shares(&["100"])));
    }

    #[test]
    fn test_distribution_rounds_half_away_from_zero() {
        assert_eq!(rounded_distribution_total(&shares(&["99.5"])), Some(dec!(100)));
        assert!(is_distribution_valid(&shares(&["99.5"])));
        assert!(!is_distribution_valid(&shares(&["99.4"])));
        assert!(!is_distribution_valid(&shares(&["100.5"])));
    }

    #[test]
    fn test_non_numeric_percentage_counts_as_zero() {
        assert_eq!(parse_percentage("abc"), Some(Decimal::ZERO));
        assert_eq!(parse_percentage("-"), Some(Decimal::ZERO));
        assert_eq!(parse_percentage("."), Some(Decimal::ZERO));
        assert_eq!(distribution_total(&shares(&["60", "forty"])), Some(dec!(60)));
        assert!(!is_distribution_valid(&shares(&["60", "forty"])));
    }

    #[test]
    fn test_percentage_reads_leading_number() {
        assert_eq!(parse_percentage("50%"), Some(dec!(50)));
        assert_eq!(parse_percentage("40abc"), Some(dec!(40)));
        assert_eq!(parse_percentage("  12.5 percent"), Some(dec!(12.5)));
        assert_eq!(parse_percentage(".5"), Some(dec!(0.5)));
        assert_eq!(parse_percentage("7."), Some(dec!(7)));
        assert_eq!(parse_percentage("-20"), Some(dec!(-20)));
        assert_eq!(parse_percentage("1e2"), Some(dec!(100)));
        assert_eq!(parse_percentage("2.5E1"), Some(dec!(25)));
        assert_eq!(parse_percentage("5e-1"), Some(dec!(0.5)));
        // an exponent marker without digits is not part of the number
        assert_eq!(parse_percentage("30e"), Some(dec!(30)));
        assert_eq!(parse_percentage("30e+"), Some(dec!(30)));

        assert!(is_distribution_valid(&shares(&["50%", "50%"])));
        assert!(is_distribution_valid(&shares(&["60abc", "4e1"])));
    }

    #[test]
    fn test_oversized_percentages_are_invalid() {
        let max = "79228162514264337593543950335";
        assert_eq!(parse_percentage(max), Some(Decimal::MAX));
        assert_eq!(distribution_total(&shares(&[max, max])), None);
        assert!(!is_step_valid(&StepData::Distribution(shares(&[max, max]))));

        assert_eq!(parse_percentage("1e400"), None);
        assert!(!is_distribution_valid(&shares(&["1e400", "100"])));
        assert!(!is_distribution_valid(&shares(&["792281625142643375935439503350"])));
    }

    #[test]
    fn test_distribution_entry_needs_beneficiary_and_percentage() {
        let mut list = shares(&["100"]);
        let id = list.entries()[0].id.clone();
        list.update(&id, |entry| entry.beneficiary_id = None);
        assert!(!is_distribution_valid(&list));

        let mut list = shares(&["50", "50"]);
        let id = list.entries()[1].id.clone();
        list.update(&id, |entry| entry.percentage.clear());
        assert!(!is_distribution_valid(&list));
    }

    #[test]
    fn test_final_submission_is_always_valid() {
        assert!(is_step_valid(&StepData::FinalSubmission(Default::default())));
    }
}

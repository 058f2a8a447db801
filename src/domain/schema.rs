//! Step Schema Registry
//!
//! Blank and default values for every step, and the list rules for the
//! sequence-shaped steps. Every blank list entry gets a fresh id.

use super::entries::{EntryList, ListEntry};
use super::records::{
    AssetDeclaration, AssetDistribution, Beneficiary, EntryId, Executor, ExecutorType,
    FinalSubmission, Guardian, Identification, PersonalDetails,
};
use super::step::{StepData, StepKey};

/// Maximum number of executors, the default one included
pub const MAX_EXECUTORS: usize = 3;

pub const DEFAULT_EXECUTOR_NAME: &str = "Leadway Trustees";
const DEFAULT_EXECUTOR_PHONE: &str = "0807657875";
const DEFAULT_EXECUTOR_ADDRESS: &str = "121/123 Funsho Williams Avenue, Iponri";
const DEFAULT_EXECUTOR_STATE: &str = "Lagos";
const DEFAULT_EXECUTOR_CITY: &str = "Surulere";

/// The trustee company every will names as its first executor
pub fn default_executor() -> Executor {
    Executor {
        id: EntryId::generate(),
        name: DEFAULT_EXECUTOR_NAME.to_string(),
        phone: DEFAULT_EXECUTOR_PHONE.to_string(),
        address: DEFAULT_EXECUTOR_ADDRESS.to_string(),
        state: DEFAULT_EXECUTOR_STATE.to_string(),
        city: DEFAULT_EXECUTOR_CITY.to_string(),
        executor_type: ExecutorType::Company,
        first_name: None,
        last_name: None,
    }
}

/// Whether `executor` carries the default executor's details, whatever its id
pub fn is_default_executor(executor: &Executor) -> bool {
    let default = default_executor();
    Executor {
        id: default.id.clone(),
        ..executor.clone()
    } == default
}

/// Name of the distributable asset, derived from the asset declaration
pub fn asset_name(assets: &AssetDeclaration) -> String {
    format!("{} account", assets.pfa)
}

/// Canonical starting value for a step
pub fn blank_step(key: StepKey) -> StepData {
    match key {
        StepKey::StepOne => StepData::Personal(PersonalDetails::default()),
        StepKey::StepTwo => StepData::Identification(Identification::default()),
        StepKey::StepThree => StepData::Beneficiaries(EntryList::with_blank()),
        StepKey::StepFour => StepData::Executors(EntryList::new(vec![default_executor()])),
        StepKey::StepFive => StepData::Guardians(EntryList::with_blank()),
        StepKey::StepSix => StepData::Assets(AssetDeclaration::default()),
        StepKey::StepSeven => StepData::Distribution(EntryList::with_blank()),
        StepKey::FinalSubmission => StepData::FinalSubmission(FinalSubmission::default()),
    }
}

impl ListEntry for Beneficiary {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank() -> Self {
        Beneficiary {
            id: EntryId::generate(),
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: String::new(),
            gender: String::new(),
        }
    }
}

impl ListEntry for Executor {
    const MAX_LEN: Option<usize> = Some(MAX_EXECUTORS);
    const PIN_FIRST: bool = true;

    fn id(&self) -> &EntryId {
        &self.id
    }

    /// Added executors start out as individuals
    fn blank() -> Self {
        Executor {
            id: EntryId::generate(),
            name: String::new(),
            phone: String::new(),
            address: String::new(),
            state: String::new(),
            city: String::new(),
            executor_type: ExecutorType::Individual,
            first_name: Some(String::new()),
            last_name: Some(String::new()),
        }
    }
}

impl ListEntry for Guardian {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank() -> Self {
        Guardian {
            id: EntryId::generate(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            relationship: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
        }
    }
}

impl ListEntry for AssetDistribution {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn blank() -> Self {
        AssetDistribution {
            id: EntryId::generate(),
            beneficiary_id: None,
            percentage: String::new(),
        }
    }
}

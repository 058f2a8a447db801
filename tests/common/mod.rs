//! Common test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use rsa_wills::client::{
    RegistrationStarter, ServerAck, StartRegistrationForm, StepSubmission, StepSubmitter,
    SubmissionError,
};
use rsa_wills::domain::schema::default_executor;
use rsa_wills::domain::{
    AssetDeclaration, AssetDistribution, Beneficiary, EntryId, EntryList, Executor, ExecutorType,
    FileBlob, Guardian, Identification, IdentificationType, PersonalDetails, SessionToken,
    StepData, StepKey,
};

/// Registration key handed out by [`RecordingService`]
pub const REGISTRATION_KEY: &str = "REG-2024-000123";

// =========================================================================
// Test double for the remote registration service
// =========================================================================

/// Accepts every call and records each step submission.
/// Set `fail_with` to make step submissions fail instead, or `delay_by`
/// to make them slow.
#[derive(Clone, Default)]
pub struct RecordingService {
    sent: Arc<Mutex<Vec<StepSubmission>>>,
    fail_with: Arc<Mutex<Option<SubmissionError>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl RecordingService {
    pub fn sent(&self) -> Vec<StepSubmission> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_keys(&self) -> Vec<StepKey> {
        self.sent().iter().map(|s| s.step_key).collect()
    }

    pub fn fail_with(&self, error: SubmissionError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    pub fn recover(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    pub fn delay_by(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }
}

#[async_trait]
impl StepSubmitter for RecordingService {
    async fn submit_step(&self, submission: StepSubmission) -> Result<ServerAck, SubmissionError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            return Err(error);
        }
        let key = submission.step_key;
        self.sent.lock().unwrap().push(submission);
        Ok(ServerAck::new(key, serde_json::json!({ "message": "Step saved" })))
    }
}

#[async_trait]
impl RegistrationStarter for RecordingService {
    async fn start_registration(
        &self,
        _form: StartRegistrationForm,
    ) -> Result<SessionToken, SubmissionError> {
        Ok(SessionToken::new(REGISTRATION_KEY).unwrap())
    }
}

// =========================================================================
// Fixtures
// =========================================================================

pub fn token() -> SessionToken {
    SessionToken::new(REGISTRATION_KEY).unwrap()
}

pub fn start_form() -> StartRegistrationForm {
    StartRegistrationForm {
        rsa_pin: "PEN100012345678".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Okafor".to_string(),
        phone_number: "08031234567".to_string(),
        email_address: "ada.okafor@example.com".to_string(),
        date_of_birth: "1980-05-17".to_string(),
    }
}

pub fn png(name: &str) -> FileBlob {
    FileBlob::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a])
}

pub fn personal() -> PersonalDetails {
    PersonalDetails {
        place_of_birth: "Enugu".to_string(),
        religion: "Christianity".to_string(),
        gender: "Female".to_string(),
        home_address: "14 Awolowo Road".to_string(),
        city: "Ikoyi".to_string(),
        state: "Lagos".to_string(),
        passport_photo: Some(png("passport.png")),
        signature: Some(png("signature.png")),
    }
}

pub fn identification() -> Identification {
    Identification {
        id_type: Some(IdentificationType::DriversLicense),
        id_number: "LAG-12345-AA".to_string(),
        id_image: Some(png("licence.png")),
    }
}

pub fn beneficiary(id: &str, first_name: &str, last_name: &str) -> Beneficiary {
    Beneficiary {
        id: EntryId::from(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth: "2012-01-30".to_string(),
        gender: "Male".to_string(),
    }
}

pub fn individual_executor() -> Executor {
    Executor {
        id: EntryId::generate(),
        name: "Emeka Obi".to_string(),
        phone: "08029876543".to_string(),
        address: "7 Allen Avenue".to_string(),
        state: "Lagos".to_string(),
        city: "Ikeja".to_string(),
        executor_type: ExecutorType::Individual,
        first_name: Some("Emeka".to_string()),
        last_name: Some("Obi".to_string()),
    }
}

pub fn guardian() -> Guardian {
    Guardian {
        id: EntryId::generate(),
        first_name: "Ngozi".to_string(),
        last_name: "Eze".to_string(),
        phone: "08051112222".to_string(),
        relationship: "Sister".to_string(),
        address: "22 Adeola Odeku Street".to_string(),
        city: "Victoria Island".to_string(),
        state: "Lagos".to_string(),
    }
}

pub fn assets() -> AssetDeclaration {
    AssetDeclaration {
        name: "Ada Okafor".to_string(),
        rsa_pin_number: "PEN100012345678".to_string(),
        pfa: "Leadway Pensure".to_string(),
        salary_bank_name: "Zenith Bank".to_string(),
        salary_account_number: "1012345678".to_string(),
    }
}

pub fn share(beneficiary_id: &str, percentage: &str) -> AssetDistribution {
    AssetDistribution {
        id: EntryId::generate(),
        beneficiary_id: Some(EntryId::from(beneficiary_id)),
        percentage: percentage.to_string(),
    }
}

/// Valid data for every form step, in order
pub fn filled_steps() -> Vec<StepData> {
    vec![
        StepData::Personal(personal()),
        StepData::Identification(identification()),
        StepData::Beneficiaries(EntryList::new(vec![
            beneficiary("b1", "Chidi", "Okafor"),
            beneficiary("b2", "Amaka", "Okafor"),
        ])),
        StepData::Executors(EntryList::new(vec![default_executor(), individual_executor()])),
        StepData::Guardians(EntryList::new(vec![guardian()])),
        StepData::Assets(assets()),
        StepData::Distribution(EntryList::new(vec![share("b1", "60"), share("b2", "40")])),
    ]
}

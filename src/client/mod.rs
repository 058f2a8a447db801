//! Remote registration service
//!
//! The two calls the wizard depends on: starting a registration (which
//! yields the registration key) and saving one step's data.

mod error;
mod http;

pub use error::SubmissionError;
pub use http::HttpRegistrationClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{SessionToken, StepKey};
use crate::payload::MultipartForm;

/// Details collected on the start page, before the wizard opens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRegistrationForm {
    pub rsa_pin: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email_address: String,
    pub date_of_birth: String,
}

/// One outbound step submission
#[derive(Debug, Clone)]
pub struct StepSubmission {
    pub step_key: StepKey,
    pub form: MultipartForm,
    pub token: SessionToken,
}

/// Acknowledgement from the registration service.
///
/// The wizard only cares that it arrived; the body is kept for logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerAck {
    pub step_key: StepKey,
    pub received_at: DateTime<Utc>,
    pub body: serde_json::Value,
}

impl ServerAck {
    pub fn new(step_key: StepKey, body: serde_json::Value) -> Self {
        Self {
            step_key,
            received_at: Utc::now(),
            body,
        }
    }
}

/// Persists one step's data remotely
#[async_trait]
pub trait StepSubmitter: Send + Sync {
    async fn submit_step(&self, submission: StepSubmission) -> Result<ServerAck, SubmissionError>;
}

/// Opens a new registration and issues its key
#[async_trait]
pub trait RegistrationStarter: Send + Sync {
    async fn start_registration(
        &self,
        form: StartRegistrationForm,
    ) -> Result<SessionToken, SubmissionError>;
}

#[async_trait]
impl<T: StepSubmitter + ?Sized> StepSubmitter for std::sync::Arc<T> {
    async fn submit_step(&self, submission: StepSubmission) -> Result<ServerAck, SubmissionError> {
        (**self).submit_step(submission).await
    }
}

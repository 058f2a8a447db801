//! HTTP client for the remote registration service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::config::Config;
use crate::domain::SessionToken;
use crate::payload::{MultipartForm, PartValue};

use super::{
    RegistrationStarter, ServerAck, StartRegistrationForm, StepSubmission, StepSubmitter,
    SubmissionError,
};

const START_PATH: &str = "/registration/Start";
const SAVE_STEP_PATH: &str = "/registration/save-step";

/// Body returned by the start endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartRegistrationResponse {
    registration_key: String,
}

/// `reqwest`-backed registration service client
#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    client: Client,
    base_url: String,
}

impl HttpRegistrationClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, SubmissionError> {
        Self::new(
            config.remote_api_base_url.clone(),
            Duration::from_secs(config.remote_api_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn non-2xx responses into `Rejected`
async fn check_status(response: Response) -> Result<Response, SubmissionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SubmissionError::Rejected {
        status: status.as_u16(),
        body,
    })
}

fn to_multipart(form: MultipartForm) -> Result<Form, SubmissionError> {
    let mut multipart = Form::new();
    for part in form.into_parts() {
        multipart = match part.value {
            PartValue::Text(value) => multipart.text(part.name, value),
            PartValue::File(blob) => {
                let file = Part::bytes(blob.bytes)
                    .file_name(blob.file_name)
                    .mime_str(&blob.content_type)?;
                multipart.part(part.name, file)
            }
        };
    }
    Ok(multipart)
}

#[async_trait]
impl StepSubmitter for HttpRegistrationClient {
    async fn submit_step(&self, submission: StepSubmission) -> Result<ServerAck, SubmissionError> {
        tracing::debug!(
            step = %submission.step_key,
            registration = %submission.token.fingerprint(),
            parts = submission.form.len(),
            "Posting step data"
        );

        let multipart = to_multipart(submission.form)?;
        let response = self
            .client
            .post(self.url(SAVE_STEP_PATH))
            .multipart(multipart)
            .send()
            .await?;
        let response = check_status(response).await?;

        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };

        Ok(ServerAck::new(submission.step_key, body))
    }
}

#[async_trait]
impl RegistrationStarter for HttpRegistrationClient {
    async fn start_registration(
        &self,
        form: StartRegistrationForm,
    ) -> Result<SessionToken, SubmissionError> {
        let response = self
            .client
            .post(self.url(START_PATH))
            .json(&form)
            .send()
            .await?;
        let response = check_status(response).await?;

        let started: StartRegistrationResponse = response.json().await?;
        SessionToken::new(started.registration_key).ok_or_else(|| {
            SubmissionError::MalformedResponse("empty registrationKey".to_string())
        })
    }
}

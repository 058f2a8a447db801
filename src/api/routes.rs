//! API Routes
//!
//! HTTP endpoint definitions.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{MutexGuard, OwnedMutexGuard};

use crate::client::StartRegistrationForm;
use crate::domain::{
    FileBlob, Identification, PersonalDetails, RejectedUpload, StepData, StepKey, WizardError,
    WizardStep,
};
use crate::error::AppError;
use crate::projection::ReviewSection;
use crate::validation::is_step_valid;
use crate::wizard::WizardProgress;

use super::middleware::{registration_middleware, CurrentRegistration};
use super::state::{AppState, RegistrationWizard};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRegistrationResponse {
    pub registration_key: String,
    pub current_step: WizardStep,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStatusResponse {
    pub current_step: WizardStep,
    pub progress: WizardProgress,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub step: StepData,
    /// Derived asset name, present for the distribution step only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    pub can_proceed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResponse {
    pub current_step: WizardStep,
    pub progress: WizardProgress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub completed: bool,
    pub received_at: DateTime<Utc>,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router<AppState> {
    let wizard_routes = Router::new()
        .route("/wizard", get(get_status))
        .route("/wizard/drafts/:step_key", get(get_draft))
        .route("/wizard/validate", post(validate_step))
        .route("/wizard/next", post(next_step))
        .route("/wizard/previous", post(previous_step))
        .route("/wizard/jump/:step", post(jump_to_step))
        .route("/wizard/review", get(get_review))
        .route("/wizard/submit", post(final_submit))
        .route_layer(middleware::from_fn_with_state(state, registration_middleware));

    Router::new()
        .route("/registrations", post(start_registration))
        .merge(wizard_routes)
}

/// Lock the registration's wizard, refusing while a submission is in flight
fn lock(registration: &CurrentRegistration) -> Result<MutexGuard<'_, RegistrationWizard>, AppError> {
    registration
        .handle
        .try_lock()
        .map_err(|_| WizardError::SubmissionInProgress.into())
}

/// Same as [`lock`], for guards that move into a detached task
fn lock_owned(registration: &CurrentRegistration) -> Result<OwnedMutexGuard<RegistrationWizard>, AppError> {
    Arc::clone(&registration.handle)
        .try_lock_owned()
        .map_err(|_| WizardError::SubmissionInProgress.into())
}

/// Run a submitting operation in its own task. A client that disconnects
/// drops the handler, not the submission; the wizard stays locked until
/// the remote service answers.
async fn run_detached<T, F>(operation: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, WizardError>> + Send + 'static,
{
    tokio::spawn(operation)
        .await
        .map_err(|e| AppError::Internal(format!("Wizard task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Input-acceptance filter for the file fields of a step
fn accept_uploads(data: StepData) -> Result<StepData, RejectedUpload> {
    fn accept(blob: Option<FileBlob>) -> Result<Option<FileBlob>, RejectedUpload> {
        blob.map(FileBlob::accept).transpose()
    }

    Ok(match data {
        StepData::Personal(details) => StepData::Personal(PersonalDetails {
            passport_photo: accept(details.passport_photo)?,
            signature: accept(details.signature)?,
            ..details
        }),
        StepData::Identification(identification) => StepData::Identification(Identification {
            id_image: accept(identification.id_image)?,
            ..identification
        }),
        data => data,
    })
}

fn transition(wizard: &RegistrationWizard) -> TransitionResponse {
    TransitionResponse {
        current_step: wizard.current_step(),
        progress: wizard.progress(),
    }
}

// =========================================================================
// POST /registrations
// =========================================================================

/// Start a registration and open its wizard
async fn start_registration(
    State(state): State<AppState>,
    Json(form): Json<StartRegistrationForm>,
) -> Result<(StatusCode, Json<StartRegistrationResponse>), AppError> {
    let token = state.starter().start_registration(form).await?;
    let registration_key = token.as_str().to_string();

    tracing::info!(registration = %token.fingerprint(), "Registration started");

    let handle = state.open(token).await;
    let current_step = handle.lock().await.current_step();

    Ok((
        StatusCode::CREATED,
        Json(StartRegistrationResponse {
            registration_key,
            current_step,
        }),
    ))
}

// =========================================================================
// GET /wizard
// =========================================================================

async fn get_status(
    Extension(registration): Extension<CurrentRegistration>,
) -> Result<Json<WizardStatusResponse>, AppError> {
    let wizard = lock(&registration)?;

    Ok(Json(WizardStatusResponse {
        current_step: wizard.current_step(),
        progress: wizard.progress(),
        completed: wizard.is_completed(),
    }))
}

// =========================================================================
// GET /wizard/drafts/:step_key
// =========================================================================

async fn get_draft(
    Extension(registration): Extension<CurrentRegistration>,
    Path(step_key): Path<String>,
) -> Result<Json<DraftResponse>, AppError> {
    let key: StepKey = step_key
        .parse()
        .map_err(|e: crate::domain::step::UnknownStepKey| AppError::InvalidRequest(e.to_string()))?;
    let wizard = lock(&registration)?;

    let asset_name = (key == StepKey::StepSeven).then(|| wizard.aggregate().asset_name());

    Ok(Json(DraftResponse {
        step: wizard.draft(key),
        asset_name,
    }))
}

// =========================================================================
// POST /wizard/validate
// =========================================================================

async fn validate_step(
    Extension(registration): Extension<CurrentRegistration>,
    Json(data): Json<StepData>,
) -> Result<Json<ValidateResponse>, AppError> {
    let wizard = lock(&registration)?;

    Ok(Json(ValidateResponse {
        valid: is_step_valid(&data),
        can_proceed: wizard.can_proceed(&data),
    }))
}

// =========================================================================
// POST /wizard/next
// =========================================================================

async fn next_step(
    Extension(registration): Extension<CurrentRegistration>,
    Json(data): Json<StepData>,
) -> Result<Json<TransitionResponse>, AppError> {
    let data = accept_uploads(data)?;
    let mut wizard = lock_owned(&registration)?;

    let response = run_detached(async move {
        wizard.next(data).await?;
        Ok::<_, WizardError>(transition(&wizard))
    })
    .await?;
    Ok(Json(response))
}

// =========================================================================
// POST /wizard/previous
// =========================================================================

async fn previous_step(
    Extension(registration): Extension<CurrentRegistration>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut wizard = lock(&registration)?;

    wizard.previous()?;
    Ok(Json(transition(&wizard)))
}

// =========================================================================
// POST /wizard/jump/:step
// =========================================================================

async fn jump_to_step(
    Extension(registration): Extension<CurrentRegistration>,
    Path(step): Path<u8>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut wizard = lock(&registration)?;

    wizard.jump_to(step)?;
    Ok(Json(transition(&wizard)))
}

// =========================================================================
// GET /wizard/review
// =========================================================================

async fn get_review(
    Extension(registration): Extension<CurrentRegistration>,
) -> Result<Json<Vec<ReviewSection>>, AppError> {
    let wizard = lock(&registration)?;
    Ok(Json(wizard.review()?))
}

// =========================================================================
// POST /wizard/submit
// =========================================================================

/// Submit the registration; once accepted, its wizard is closed
async fn final_submit(
    State(state): State<AppState>,
    Extension(registration): Extension<CurrentRegistration>,
) -> Result<Json<SubmitResponse>, AppError> {
    let mut wizard = lock_owned(&registration)?;
    let key = registration.key;

    let ack = run_detached(async move {
        let ack = wizard.final_submit().await?;
        drop(wizard);
        state.close(&key).await;
        Ok::<_, WizardError>(ack)
    })
    .await?;

    Ok(Json(SubmitResponse {
        completed: true,
        received_at: ack.received_at,
    }))
}

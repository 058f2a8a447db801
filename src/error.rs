//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::client::SubmissionError;
use crate::domain::{RejectedUpload, WizardError};

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Upload(#[from] RejectedUpload),

    // Wizard errors
    #[error(transparent)]
    Wizard(#[from] WizardError),

    // Upstream errors (5xx)
    #[error("Registration service error: {0}")]
    Upstream(#[from] SubmissionError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Suggested wait before retrying a submission that failed or is in flight
const RETRY_AFTER_SECS: &str = "1";

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 415 Unsupported Media Type
            AppError::Upload(rejected) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_upload",
                Some(rejected.content_type.clone()),
            ),

            // Wizard errors - map to appropriate HTTP status
            AppError::Wizard(wizard_err) => match wizard_err {
                WizardError::SessionMissing => (StatusCode::UNAUTHORIZED, "session_missing", None),
                WizardError::SessionCompleted => (StatusCode::GONE, "session_completed", None),
                WizardError::SubmissionInProgress => {
                    (StatusCode::CONFLICT, "submission_in_progress", None)
                }
                WizardError::StepIncomplete(key) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "step_incomplete",
                    Some(key.to_string()),
                ),
                WizardError::StepMismatch { .. } => (StatusCode::CONFLICT, "step_mismatch", None),
                WizardError::NotOnReview { .. } => (StatusCode::CONFLICT, "not_on_review", None),
                WizardError::AlreadyOnReview => (StatusCode::CONFLICT, "already_on_review", None),
                WizardError::InvalidJumpTarget(step) => (
                    StatusCode::BAD_REQUEST,
                    "invalid_jump_target",
                    Some(step.to_string()),
                ),
                WizardError::Submission(e) => {
                    tracing::warn!("Step submission failed: {}", e);
                    (StatusCode::BAD_GATEWAY, "submission_failed", Some(e.to_string()))
                }
            },

            // 502 Bad Gateway
            AppError::Upstream(e) => {
                tracing::warn!("Registration service error: {}", e);
                (StatusCode::BAD_GATEWAY, "upstream_error", Some(e.to_string()))
            }

            // 500 Internal Server Error
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = self.status_and_code();

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        let mut response = (status, Json(body)).into_response();
        if matches!(&self, AppError::Wizard(e) if e.is_retryable()) {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, header::HeaderValue::from_static(RETRY_AFTER_SECS));
        }
        response
    }
}

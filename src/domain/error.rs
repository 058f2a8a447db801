//! Wizard Error Types
//!
//! Conditions under which the wizard refuses an operation.
//! An incomplete step is reported here for API callers, but the
//! validators themselves only ever answer with a boolean.

use thiserror::Error;

use crate::client::SubmissionError;

use super::step::{StepKey, WizardStep};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WizardError {
    /// No registration key has been established for this wizard
    #[error("No registration session: start a new registration")]
    SessionMissing,

    /// Final submission already succeeded; the session is over
    #[error("Registration has already been submitted")]
    SessionCompleted,

    /// A submission for this wizard has not resolved yet
    #[error("A step submission is already in progress")]
    SubmissionInProgress,

    /// Step data does not pass its validator
    #[error("Step {0} is incomplete")]
    StepIncomplete(StepKey),

    /// Step data submitted for a step other than the current one
    #[error("Step mismatch: wizard is at step {current}, got data for {found}")]
    StepMismatch { current: WizardStep, found: StepKey },

    /// Operation only defined on the Review step
    #[error("Operation requires the review step (wizard is at step {current})")]
    NotOnReview { current: WizardStep },

    /// `next` called on the Review step
    #[error("Wizard is already at the review step")]
    AlreadyOnReview,

    /// Jump target outside the form steps
    #[error("Invalid jump target: {0}")]
    InvalidJumpTarget(u8),

    /// The remote service rejected or never received the submission
    #[error("Step submission failed: {0}")]
    Submission(#[from] SubmissionError),
}

impl WizardError {
    /// Check if the user may simply try the same action again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Submission(_) | Self::SubmissionInProgress)
    }
}

//! Wizard Controller
//!
//! State machine over positions 1..=8 (8 is Review). Owns the aggregate
//! and the in-flight flag, persists the position after every transition,
//! and drives validate → merge → submit → advance.

use crate::aggregate::RegistrationAggregate;
use crate::client::{ServerAck, StepSubmission, StepSubmitter};
use crate::domain::{
    FinalSubmission, SessionScope, SessionToken, StepData, StepKey, WizardError, WizardStep,
};
use crate::payload::encode_step;
use crate::projection::{project_review, ReviewSection};
use crate::validation::is_step_valid;

use super::progress::WizardProgress;
use super::storage::{SessionStorage, STEP_STORAGE_KEY};

/// One registration's wizard
pub struct WizardController<S, P> {
    scope: SessionScope,
    storage: P,
    submitter: S,
    aggregate: RegistrationAggregate,
    current: WizardStep,
    is_submitting: bool,
    completed: bool,
}

impl<S, P> WizardController<S, P>
where
    S: StepSubmitter,
    P: SessionStorage,
{
    /// Create a wizard for `scope`, restoring the persisted position if any.
    ///
    /// The aggregate always starts blank; only the position survives.
    pub fn new(scope: SessionScope, storage: P, submitter: S) -> Self {
        let current = storage
            .get_item(STEP_STORAGE_KEY)
            .map(|raw| WizardStep::from_persisted(&raw))
            .unwrap_or_default();

        tracing::debug!(step = %current, "Wizard initialised");

        Self {
            scope,
            storage,
            submitter,
            aggregate: RegistrationAggregate::new(),
            current,
            is_submitting: false,
            completed: false,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn current_step(&self) -> WizardStep {
        self.current
    }

    pub fn aggregate(&self) -> &RegistrationAggregate {
        &self.aggregate
    }

    pub fn scope(&self) -> &SessionScope {
        &self.scope
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the "proceed" action is enabled for `data`
    pub fn can_proceed(&self, data: &StepData) -> bool {
        !self.is_submitting
            && !self.completed
            && self.current.step_key() == Some(data.key())
            && is_step_valid(data)
    }

    /// Editing starting point for `key`
    pub fn draft(&self, key: StepKey) -> StepData {
        self.aggregate.draft(key)
    }

    pub fn progress(&self) -> WizardProgress {
        WizardProgress::at(self.current)
    }

    /// Review projection of everything entered so far
    pub fn review(&self) -> Result<Vec<ReviewSection>, WizardError> {
        self.require_session()?;
        Ok(project_review(&self.aggregate))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Validate, merge and submit the current step, then advance.
    ///
    /// Invalid data is refused before anything is merged or sent. A failed
    /// submission leaves the position unchanged; the merged data stays.
    pub async fn next(&mut self, data: StepData) -> Result<WizardStep, WizardError> {
        let token = self.ready_for_transition()?;

        let key = self.current.step_key().ok_or(WizardError::AlreadyOnReview)?;
        if data.key() != key {
            return Err(WizardError::StepMismatch {
                current: self.current,
                found: data.key(),
            });
        }
        if !is_step_valid(&data) {
            tracing::debug!(step = %key, "Step incomplete, not proceeding");
            return Err(WizardError::StepIncomplete(key));
        }

        self.aggregate = self.aggregate.clone().merge(data);
        self.submit(key, &token).await?;

        self.current = self.current.next();
        self.persist_position();

        tracing::info!(
            step = %key,
            position = %self.current,
            registration = %token.fingerprint(),
            "Step accepted"
        );

        Ok(self.current)
    }

    /// Back one step; no merge, no submission. A no-op on step 1.
    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        self.ready_for_transition()?;

        self.current = self.current.previous();
        self.persist_position();
        Ok(self.current)
    }

    /// Jump from Review straight to form step `step` to edit it
    pub fn jump_to(&mut self, step: u8) -> Result<WizardStep, WizardError> {
        self.ready_for_transition()?;

        if !self.current.is_review() {
            return Err(WizardError::NotOnReview {
                current: self.current,
            });
        }
        let target = StepKey::from_number(step)
            .and_then(|key| key.number())
            .and_then(WizardStep::new)
            .ok_or(WizardError::InvalidJumpTarget(step))?;

        self.current = target;
        self.persist_position();

        tracing::debug!(step = %target, "Jumped from review");
        Ok(target)
    }

    /// Send the completion marker. On success the session is over: the
    /// entered data and the persisted position are discarded, and every
    /// later operation is refused.
    pub async fn final_submit(&mut self) -> Result<ServerAck, WizardError> {
        let token = self.ready_for_transition()?;

        if !self.current.is_review() {
            return Err(WizardError::NotOnReview {
                current: self.current,
            });
        }

        self.aggregate = self
            .aggregate
            .clone()
            .merge(StepData::FinalSubmission(FinalSubmission { is_submitted: true }));
        let ack = self.submit(StepKey::FinalSubmission, &token).await?;

        self.completed = true;
        self.aggregate = RegistrationAggregate::new();
        self.storage.remove_item(STEP_STORAGE_KEY);

        tracing::info!(registration = %token.fingerprint(), "Registration submitted");
        Ok(ack)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require_session(&self) -> Result<SessionToken, WizardError> {
        match self.scope.token() {
            Some(token) => Ok(token.clone()),
            None => {
                tracing::error!(step = %self.current, "No registration session established");
                Err(WizardError::SessionMissing)
            }
        }
    }

    /// Preconditions shared by every transition
    fn ready_for_transition(&self) -> Result<SessionToken, WizardError> {
        let token = self.require_session()?;
        if self.completed {
            return Err(WizardError::SessionCompleted);
        }
        if self.is_submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        Ok(token)
    }

    /// Encode the aggregate's record for `key` and hand it to the submitter
    async fn submit(&mut self, key: StepKey, token: &SessionToken) -> Result<ServerAck, WizardError> {
        let form = encode_step(token, &self.aggregate.step(key), self.aggregate.assets());
        let submission = StepSubmission {
            step_key: key,
            form,
            token: token.clone(),
        };

        let in_flight = InFlight::start(&mut self.is_submitting);
        let result = self.submitter.submit_step(submission).await;
        drop(in_flight);

        match result {
            Ok(ack) => {
                tracing::debug!(step = %key, body = %ack.body, "Server acknowledged step");
                Ok(ack)
            }
            Err(e) => {
                tracing::warn!(step = %key, error = %e, "Step submission failed");
                Err(WizardError::Submission(e))
            }
        }
    }

    fn persist_position(&self) {
        self.storage
            .set_item(STEP_STORAGE_KEY, self.current.get().to_string());
    }
}

/// Holds the in-flight flag for one submission. Dropping it clears the flag,
/// so a caller abandoning the future does not wedge the wizard.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

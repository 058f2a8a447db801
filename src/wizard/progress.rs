//! Progress view of the wizard position

use serde::Serialize;

use crate::domain::{StepKey, WizardStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

/// One entry of the step indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStatus {
    pub step: u8,
    pub step_key: StepKey,
    pub title: &'static str,
    pub state: StepState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    pub current_step: WizardStep,
    /// "N more steps to go"; only shown between the first step and Review
    pub steps_remaining: Option<u8>,
    pub percent_complete: u8,
    pub steps: Vec<StepStatus>,
}

impl WizardProgress {
    pub fn at(current: WizardStep) -> Self {
        let position = current.get();
        let form_steps = StepKey::FORM_STEPS.len() as u8;

        let steps_remaining = (position > WizardStep::FIRST.get() && !current.is_review())
            .then(|| WizardStep::REVIEW.get() - position);

        let steps = StepKey::FORM_STEPS
            .iter()
            .map(|key| {
                let step = key.number().unwrap_or_default();
                let state = match step.cmp(&position) {
                    std::cmp::Ordering::Less => StepState::Completed,
                    std::cmp::Ordering::Equal => StepState::Active,
                    std::cmp::Ordering::Greater => StepState::Pending,
                };
                StepStatus {
                    step,
                    step_key: *key,
                    title: key.title(),
                    state,
                }
            })
            .collect();

        Self {
            current_step: current,
            steps_remaining,
            percent_complete: (position - 1) * 100 / form_steps,
            steps,
        }
    }
}

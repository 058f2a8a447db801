//! Wizard module
//!
//! The controller that walks a registration through its steps, plus the
//! session storage its position is persisted in.

mod controller;
mod progress;
mod storage;


pub use controller::WizardController;
pub use progress::{StepState, StepStatus, WizardProgress};
pub use storage::{MemorySessionStorage, SessionStorage, STEP_STORAGE_KEY};

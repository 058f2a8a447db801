//! RSA Wills registration wizard
//!
//! Re-exports modules for integration testing and the server binary.

pub mod aggregate;
pub mod api;
pub mod client;
pub mod domain;
pub mod payload;
pub mod projection;
pub mod validation;
pub mod wizard;

pub mod config;
mod error;

pub use config::Config;
pub use error::AppError;
pub use domain::{SessionScope, SessionToken, StepData, StepKey, WizardError, WizardStep};
pub use wizard::{MemorySessionStorage, SessionStorage, WizardController};

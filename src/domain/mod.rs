//! Domain module
//!
//! Step records, step keys, wizard position and session types.

pub mod entries;
pub mod error;
pub mod records;
pub mod schema;
pub mod session;
pub mod step;

pub use entries::{EntryList, ListEntry};
pub use error::WizardError;
pub use records::{
    AssetDeclaration, AssetDistribution, Beneficiary, EntryId, Executor, ExecutorType, FileBlob,
    FinalSubmission, Guardian, Identification, IdentificationType, PersonalDetails,
    RejectedUpload,
};
pub use session::{SessionScope, SessionToken};
pub use step::{
    Beneficiaries, Distributions, Executors, Guardians, StepData, StepKey, WizardStep,
};

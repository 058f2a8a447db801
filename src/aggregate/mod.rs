//! Aggregate module
//!
//! The registration aggregate: every step's record in one value.

pub mod registration;

pub use registration::RegistrationAggregate;

/// Aggregate trait: state rebuilt by applying updates one at a time
pub trait Aggregate: Sized {
    /// The type of update this aggregate accepts
    type Update;

    /// Get the aggregate type name (for logs)
    fn aggregate_type() -> &'static str;

    /// Get the aggregate ID
    fn id(&self) -> uuid::Uuid;

    /// Get the current version (number of updates applied)
    fn version(&self) -> i64;

    /// Apply an update, returning the new state
    fn apply(self, update: Self::Update) -> Self;
}

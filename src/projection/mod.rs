//! Projection module
//!
//! Read models derived from the registration aggregate.

pub mod review;

pub use review::{project_review, ReviewField, ReviewGroup, ReviewSection};

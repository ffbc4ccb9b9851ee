//! Shared types and models for the trip weather updater
//!
//! This crate contains the domain models, the road-risk classifier, and the
//! configuration validations used by the updater binary.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;

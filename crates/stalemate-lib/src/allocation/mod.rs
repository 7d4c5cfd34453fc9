//! # Allocation Model
//!
//! Tracks which process holds which single-instance resource and which
//! resource each process is blocked on.
//!
//! ## Modules
//!
//! - [`types`] - Typed indices, records, snapshots and mutator outcomes
//! - [`error`] - Mutator and consistency errors
//! - [`model`] - The [`AllocationModel`] registry

pub mod error;
pub mod model;
pub mod types;

pub use error::{AllocationError, ConsistencyError};
pub use model::AllocationModel;
pub use types::*;

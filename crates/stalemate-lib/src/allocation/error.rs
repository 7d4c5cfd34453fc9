use super::types::EntityKind;
use thiserror::Error;

/// Recoverable failures of the allocation mutators
///
/// None of these leave the model in a modified state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("{kind} '{name}' already exists")]
    DuplicateEntity { kind: EntityKind, name: String },

    #[error("unknown {kind} '{name}'")]
    UnknownEntity { kind: EntityKind, name: String },

    #[error("{process} cannot release {resource}: {reason}")]
    InvalidOperation {
        process: String,
        resource: String,
        reason: String,
    },
}

/// A broken cross-reference between processes and resources
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("resource {resource} is allocated to {process} but missing from its holding set")]
    MissingFromHolder { resource: String, process: String },

    #[error("process {process} holds {resource} but the resource points at {allocated_to:?}")]
    UnbackedHolding {
        process: String,
        resource: String,
        allocated_to: Option<String>,
    },

    #[error("process {process} lists {resource} more than once")]
    DuplicateHolding { process: String, resource: String },

    #[error("process {process} waits on {resource}, which is not allocated")]
    WaitOnFreeResource { process: String, resource: String },

    #[error("process {process} waits on {resource}, which it already holds")]
    WaitOnOwnResource { process: String, resource: String },

    #[error("index entry for {kind} '{name}' does not match its record")]
    StaleIndex { kind: EntityKind, name: String },
}

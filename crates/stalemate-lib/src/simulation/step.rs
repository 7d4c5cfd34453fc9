//! Per-step records produced by the driver

use crate::allocation::{ProcessState, ResourceState};
use crate::feed::Action;
use serde::Serialize;
use std::fmt;

/// What happened when a step was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOutcome {
    Granted,
    AlreadyHeld,
    Waiting { holder: String },
    Released { woken: Vec<String> },
    /// The model refused the operation and stayed unchanged
    Rejected { reason: String },
}

impl StepOutcome {
    /// Short tag used in tables and the CSV step log
    pub fn label(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::AlreadyHeld => "already_held",
            Self::Waiting { .. } => "waiting",
            Self::Released { .. } => "released",
            Self::Rejected { .. } => "rejected",
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::AlreadyHeld => write!(f, "already held"),
            Self::Waiting { holder } => write!(f, "waiting on {holder}"),
            Self::Released { woken } if woken.is_empty() => write!(f, "released"),
            Self::Released { woken } => write!(f, "released, woke {}", woken.join(", ")),
            Self::Rejected { reason } => write!(f, "rejected: {reason}"),
        }
    }
}

/// One applied operation together with the state it left behind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// 1-based position in the applied feed
    pub step: usize,
    pub process: String,
    pub action: Action,
    pub resource: String,
    pub outcome: StepOutcome,
    pub processes: Vec<ProcessState>,
    pub resources: Vec<ResourceState>,
    /// Cycle seen after this step, empty when none (or not checked)
    pub deadlock: Vec<String>,
}

impl StepRecord {
    pub fn is_deadlocked(&self) -> bool {
        !self.deadlock.is_empty()
    }
}

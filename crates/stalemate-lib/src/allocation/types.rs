//! Identifiers and records owned by the allocation model

use serde::Serialize;
use std::fmt;

/// Index of a process inside an [`AllocationModel`](super::AllocationModel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub(crate) usize);

impl ProcessId {
    /// Position of the process in creation order
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Index of a resource inside an [`AllocationModel`](super::AllocationModel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub(crate) usize);

impl ResourceId {
    /// Position of the resource in creation order
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// The two separate namespaces of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Process,
    Resource,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process => write!(f, "process"),
            Self::Resource => write!(f, "resource"),
        }
    }
}

/// A simulated process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub(crate) name: String,
    /// Held resources in acquisition order, never duplicated
    pub(crate) holding: Vec<ResourceId>,
    pub(crate) waiting_for: Option<ResourceId>,
}

impl Process {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            holding: Vec::new(),
            waiting_for: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn holding(&self) -> &[ResourceId] {
        &self.holding
    }

    pub fn waiting_for(&self) -> Option<ResourceId> {
        self.waiting_for
    }

    pub fn holds(&self, resource: ResourceId) -> bool {
        self.holding.contains(&resource)
    }

    /// True while the process has an outstanding request
    pub fn is_blocked(&self) -> bool {
        self.waiting_for.is_some()
    }
}

/// A single-instance resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub(crate) name: String,
    pub(crate) allocated_to: Option<ProcessId>,
}

impl Resource {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            allocated_to: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allocated_to(&self) -> Option<ProcessId> {
        self.allocated_to
    }

    pub fn is_free(&self) -> bool {
        self.allocated_to.is_none()
    }
}

/// Name-resolved view of a process, detached from the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessState {
    pub name: String,
    pub holding: Vec<String>,
    pub waiting_for: Option<String>,
}

/// Name-resolved view of a resource, detached from the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceState {
    pub name: String,
    pub allocated_to: Option<String>,
}

/// Point-in-time copy of the whole model, in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub processes: Vec<ProcessState>,
    pub resources: Vec<ResourceState>,
}

/// Result of a resource request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Resource was free and is now held by the requester
    Granted,

    /// Requester already holds the resource; nothing changed
    AlreadyHeld,

    /// Resource is held by another process; the requester now waits on it
    Waiting { holder: ProcessId },
}

/// Result of a successful release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Processes whose wait on the released resource was cleared
    pub woken: Vec<ProcessId>,
}

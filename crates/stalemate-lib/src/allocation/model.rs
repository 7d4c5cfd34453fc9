//! The allocation registry and its mutators

use super::error::{AllocationError, ConsistencyError};
use super::types::*;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Registry of processes and single-instance resources
///
/// Records live in two arenas addressed by [`ProcessId`] / [`ResourceId`];
/// names resolve through per-namespace lookup maps. Every relationship
/// (`holding`, `allocated_to`, `waiting_for`) is stored as an index, so the
/// model is the only owner of the records.
#[derive(Debug, Clone, Default)]
pub struct AllocationModel {
    processes: Vec<Process>,
    resources: Vec<Resource>,
    process_index: HashMap<String, ProcessId>,
    resource_index: HashMap<String, ResourceId>,
}

impl AllocationModel {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a new process with nothing held and nothing awaited
    ///
    /// Fails with `DuplicateEntity` when the name is already a process.
    pub fn create_process(&mut self, name: &str) -> Result<ProcessId, AllocationError> {
        if self.process_index.contains_key(name) {
            return Err(AllocationError::DuplicateEntity {
                kind: EntityKind::Process,
                name: name.to_string(),
            });
        }

        let id = ProcessId(self.processes.len());
        self.processes.push(Process::new(name.to_string()));
        self.process_index.insert(name.to_string(), id);
        trace!(process = name, %id, "process created");
        Ok(id)
    }

    /// Register a new, unallocated resource
    ///
    /// Fails with `DuplicateEntity` when the name is already a resource.
    pub fn create_resource(&mut self, name: &str) -> Result<ResourceId, AllocationError> {
        if self.resource_index.contains_key(name) {
            return Err(AllocationError::DuplicateEntity {
                kind: EntityKind::Resource,
                name: name.to_string(),
            });
        }

        let id = ResourceId(self.resources.len());
        self.resources.push(Resource::new(name.to_string()));
        self.resource_index.insert(name.to_string(), id);
        trace!(resource = name, %id, "resource created");
        Ok(id)
    }

    /// Idempotent variant of [`create_process`](Self::create_process)
    pub fn ensure_process(&mut self, name: &str) -> ProcessId {
        match self.process_index.get(name) {
            Some(&id) => id,
            None => {
                let id = ProcessId(self.processes.len());
                self.processes.push(Process::new(name.to_string()));
                self.process_index.insert(name.to_string(), id);
                trace!(process = name, %id, "process created on first mention");
                id
            }
        }
    }

    /// Idempotent variant of [`create_resource`](Self::create_resource)
    pub fn ensure_resource(&mut self, name: &str) -> ResourceId {
        match self.resource_index.get(name) {
            Some(&id) => id,
            None => {
                let id = ResourceId(self.resources.len());
                self.resources.push(Resource::new(name.to_string()));
                self.resource_index.insert(name.to_string(), id);
                trace!(resource = name, %id, "resource created on first mention");
                id
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Ask for a resource on behalf of a process
    ///
    /// A free resource is granted on the spot. A resource held by another
    /// process turns into the requester's single wait target, replacing any
    /// earlier one. Requesting a resource the process already holds is a
    /// no-op reported as [`RequestOutcome::AlreadyHeld`].
    pub fn request_resource(
        &mut self,
        process: &str,
        resource: &str,
    ) -> Result<RequestOutcome, AllocationError> {
        let pid = self.lookup_process(process)?;
        let rid = self.lookup_resource(resource)?;

        let outcome = match self.resources[rid.0].allocated_to {
            None => {
                self.resources[rid.0].allocated_to = Some(pid);
                let requester = &mut self.processes[pid.0];
                requester.holding.push(rid);
                if requester.waiting_for == Some(rid) {
                    requester.waiting_for = None;
                }
                debug!(process, resource, "resource granted");
                RequestOutcome::Granted
            }
            Some(holder) if holder == pid => {
                trace!(process, resource, "request for a resource already held");
                RequestOutcome::AlreadyHeld
            }
            Some(holder) => {
                self.processes[pid.0].waiting_for = Some(rid);
                debug!(
                    process,
                    resource,
                    holder = %self.processes[holder.0].name,
                    "process waiting"
                );
                RequestOutcome::Waiting { holder }
            }
        };

        Ok(outcome)
    }

    /// Give a resource back
    ///
    /// Clears the allocation and every pending wait on the resource without
    /// re-granting it; woken processes must request again. Releasing a
    /// resource the process does not hold is rejected with
    /// `InvalidOperation` and leaves the model untouched.
    pub fn release_resource(
        &mut self,
        process: &str,
        resource: &str,
    ) -> Result<ReleaseOutcome, AllocationError> {
        let pid = self.lookup_process(process)?;
        let rid = self.lookup_resource(resource)?;

        match self.resources[rid.0].allocated_to {
            Some(holder) if holder == pid => {}
            other => {
                let reason = match other {
                    Some(holder) => format!("it is held by {}", self.processes[holder.0].name),
                    None => "it is not allocated".to_string(),
                };
                return Err(AllocationError::InvalidOperation {
                    process: process.to_string(),
                    resource: resource.to_string(),
                    reason,
                });
            }
        }

        self.resources[rid.0].allocated_to = None;
        self.processes[pid.0].holding.retain(|&held| held != rid);

        let mut woken = Vec::new();
        for (idx, waiter) in self.processes.iter_mut().enumerate() {
            if waiter.waiting_for == Some(rid) {
                waiter.waiting_for = None;
                woken.push(ProcessId(idx));
            }
        }

        debug!(process, resource, woken = woken.len(), "resource released");
        Ok(ReleaseOutcome { woken })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn process_id(&self, name: &str) -> Option<ProcessId> {
        self.process_index.get(name).copied()
    }

    pub fn resource_id(&self, name: &str) -> Option<ResourceId> {
        self.resource_index.get(name).copied()
    }

    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.get(id.0)
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.0)
    }

    pub fn process_by_name(&self, name: &str) -> Option<&Process> {
        self.process_id(name).and_then(|id| self.process(id))
    }

    pub fn resource_by_name(&self, name: &str) -> Option<&Resource> {
        self.resource_id(name).and_then(|id| self.resource(id))
    }

    /// Iterate over processes in creation order
    pub fn processes(&self) -> impl Iterator<Item = (ProcessId, &Process)> {
        self.processes
            .iter()
            .enumerate()
            .map(|(idx, p)| (ProcessId(idx), p))
    }

    /// Iterate over resources in creation order
    pub fn resources(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(idx, r)| (ResourceId(idx), r))
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty() && self.resources.is_empty()
    }

    /// Name of a process created by this model
    pub(crate) fn process_name(&self, id: ProcessId) -> &str {
        &self.processes[id.0].name
    }

    /// Name of a resource created by this model
    pub(crate) fn resource_name(&self, id: ResourceId) -> &str {
        &self.resources[id.0].name
    }

    /// Name-resolved states of every process
    pub fn process_states(&self) -> Vec<ProcessState> {
        self.processes
            .iter()
            .map(|p| ProcessState {
                name: p.name.clone(),
                holding: p
                    .holding
                    .iter()
                    .map(|&r| self.resource_name(r).to_string())
                    .collect(),
                waiting_for: p.waiting_for.map(|r| self.resource_name(r).to_string()),
            })
            .collect()
    }

    /// Name-resolved states of every resource
    pub fn resource_states(&self) -> Vec<ResourceState> {
        self.resources
            .iter()
            .map(|r| ResourceState {
                name: r.name.clone(),
                allocated_to: r.allocated_to.map(|p| self.process_name(p).to_string()),
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            processes: self.process_states(),
            resources: self.resource_states(),
        }
    }

    /// Check every cross-reference invariant of the model
    pub fn verify_consistency(&self) -> Result<(), ConsistencyError> {
        for (name, &id) in &self.process_index {
            if self.processes.get(id.0).map(|p| p.name.as_str()) != Some(name.as_str()) {
                return Err(ConsistencyError::StaleIndex {
                    kind: EntityKind::Process,
                    name: name.clone(),
                });
            }
        }
        for (name, &id) in &self.resource_index {
            if self.resources.get(id.0).map(|r| r.name.as_str()) != Some(name.as_str()) {
                return Err(ConsistencyError::StaleIndex {
                    kind: EntityKind::Resource,
                    name: name.clone(),
                });
            }
        }

        for (ridx, resource) in self.resources.iter().enumerate() {
            if let Some(holder) = resource.allocated_to {
                if !self.processes[holder.0].holds(ResourceId(ridx)) {
                    return Err(ConsistencyError::MissingFromHolder {
                        resource: resource.name.clone(),
                        process: self.processes[holder.0].name.clone(),
                    });
                }
            }
        }

        for (pidx, process) in self.processes.iter().enumerate() {
            for (pos, &held) in process.holding.iter().enumerate() {
                if process.holding[..pos].contains(&held) {
                    return Err(ConsistencyError::DuplicateHolding {
                        process: process.name.clone(),
                        resource: self.resource_name(held).to_string(),
                    });
                }
                let allocated_to = self.resources[held.0].allocated_to;
                if allocated_to != Some(ProcessId(pidx)) {
                    return Err(ConsistencyError::UnbackedHolding {
                        process: process.name.clone(),
                        resource: self.resource_name(held).to_string(),
                        allocated_to: allocated_to.map(|p| self.process_name(p).to_string()),
                    });
                }
            }

            if let Some(target) = process.waiting_for {
                match self.resources[target.0].allocated_to {
                    None => {
                        return Err(ConsistencyError::WaitOnFreeResource {
                            process: process.name.clone(),
                            resource: self.resource_name(target).to_string(),
                        });
                    }
                    Some(holder) if holder.0 == pidx => {
                        return Err(ConsistencyError::WaitOnOwnResource {
                            process: process.name.clone(),
                            resource: self.resource_name(target).to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn lookup_process(&self, name: &str) -> Result<ProcessId, AllocationError> {
        self.process_id(name)
            .ok_or_else(|| AllocationError::UnknownEntity {
                kind: EntityKind::Process,
                name: name.to_string(),
            })
    }

    fn lookup_resource(&self, name: &str) -> Result<ResourceId, AllocationError> {
        self.resource_id(name)
            .ok_or_else(|| AllocationError::UnknownEntity {
                kind: EntityKind::Resource,
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    include!("model.test.rs");
}

//! # Simulation Driver
//!
//! Applies a feed of [`Operation`]s to an [`AllocationModel`] one step at a
//! time. Processes and resources are created the first time a row mentions
//! them, every step is recorded with a name-resolved snapshot, and deadlock
//! detection runs after each step or once at the end.

mod step;

pub use step::{StepOutcome, StepRecord};

use crate::allocation::{AllocationError, AllocationModel, RequestOutcome};
use crate::detector::{DeadlockReport, detect_deadlock};
use crate::feed::Operation;
use serde::Serialize;
use tracing::{Level, debug, info, warn};

/// When the driver runs the detector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetectionMode {
    /// After every applied operation; each step records the cycle it sees
    #[default]
    EveryStep,
    /// Only when asked through [`Simulation::detect`]
    OnDemand,
}

/// Summary of a [`Simulation::run`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Operations applied, which is less than the feed length after an early stop
    pub applied: usize,
    pub total: usize,
    pub stopped_early: bool,
    /// Step at which a deadlock was first observed
    pub first_deadlock_step: Option<usize>,
    /// Verdict on the final state
    pub report: DeadlockReport,
}

impl RunSummary {
    pub fn deadlocked(&self) -> bool {
        self.report.found
    }
}

#[derive(Debug, Clone, Default)]
pub struct Simulation {
    model: AllocationModel,
    steps: Vec<StepRecord>,
    mode: DetectionMode,
    stop_on_deadlock: bool,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detection(mut self, mode: DetectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Halt [`run`](Self::run) at the first step that leaves a deadlock
    ///
    /// Implies detection after every step, whatever mode was chosen and in
    /// whichever order the two builders are called.
    pub fn stop_on_deadlock(mut self, stop: bool) -> Self {
        self.stop_on_deadlock = stop;
        self
    }

    pub fn model(&self) -> &AllocationModel {
        &self.model
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<StepRecord> {
        self.steps
    }

    /// Apply a single operation and record it
    pub fn apply(&mut self, operation: &Operation) -> &StepRecord {
        self.model.ensure_process(&operation.process);
        self.model.ensure_resource(&operation.resource);

        let result = if operation.action.is_acquire() {
            self.model
                .request_resource(&operation.process, &operation.resource)
                .map(|outcome| self.describe_request(outcome))
        } else {
            self.model
                .release_resource(&operation.process, &operation.resource)
                .map(|outcome| StepOutcome::Released {
                    woken: outcome
                        .woken
                        .iter()
                        .map(|&p| self.model.process_name(p).to_string())
                        .collect(),
                })
        };

        let outcome = result.unwrap_or_else(|err| self.reject(operation, err));

        if tracing::enabled!(Level::DEBUG) {
            if let Err(err) = self.model.verify_consistency() {
                warn!(step = self.steps.len() + 1, "allocation model inconsistent: {err}");
            }
        }

        let deadlock = if self.detects_every_step() {
            detect_deadlock(&self.model).cycle
        } else {
            Vec::new()
        };

        let step = self.steps.len() + 1;
        debug!(step, operation = %operation, outcome = %outcome, "step applied");

        let snapshot = self.model.snapshot();
        self.steps.push(StepRecord {
            step,
            process: operation.process.clone(),
            action: operation.action,
            resource: operation.resource.clone(),
            outcome,
            processes: snapshot.processes,
            resources: snapshot.resources,
            deadlock,
        });

        let last = self.steps.len() - 1;
        &self.steps[last]
    }

    /// Apply a whole feed, honoring the early-stop setting
    pub fn run(&mut self, operations: &[Operation]) -> RunSummary {
        let mut applied = 0;
        let mut stopped_early = false;

        for operation in operations {
            let deadlocked = self.apply(operation).is_deadlocked();
            applied += 1;
            if deadlocked && self.stop_on_deadlock {
                stopped_early = applied < operations.len();
                info!(step = applied, "stopping at first deadlock");
                break;
            }
        }

        let report = self.detect();
        if report.found {
            info!(cycle = %report.path(), "deadlock detected");
        } else {
            info!(steps = applied, "no deadlock detected");
        }

        RunSummary {
            applied,
            total: operations.len(),
            stopped_early,
            first_deadlock_step: self.first_deadlock_step(),
            report,
        }
    }

    /// Run the detector against the current state
    pub fn detect(&self) -> DeadlockReport {
        detect_deadlock(&self.model)
    }

    /// First recorded step whose state contained a cycle
    ///
    /// Always `None` in [`DetectionMode::OnDemand`], where steps carry no
    /// verdict.
    pub fn first_deadlock_step(&self) -> Option<usize> {
        self.steps
            .iter()
            .find(|record| record.is_deadlocked())
            .map(|record| record.step)
    }

    fn detects_every_step(&self) -> bool {
        self.stop_on_deadlock || self.mode == DetectionMode::EveryStep
    }

    fn describe_request(&self, outcome: RequestOutcome) -> StepOutcome {
        match outcome {
            RequestOutcome::Granted => StepOutcome::Granted,
            RequestOutcome::AlreadyHeld => StepOutcome::AlreadyHeld,
            RequestOutcome::Waiting { holder } => StepOutcome::Waiting {
                holder: self.model.process_name(holder).to_string(),
            },
        }
    }

    fn reject(&self, operation: &Operation, err: AllocationError) -> StepOutcome {
        warn!(
            step = self.steps.len() + 1,
            line = operation.line,
            "operation rejected: {err}"
        );
        StepOutcome::Rejected {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}

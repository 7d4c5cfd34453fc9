//! # Cycle Detector
//!
//! Reads an [`AllocationModel`] (never mutates it), derives the wait-for
//! graph and reports whether it contains a cycle, i.e. a deadlock.
//!
//! The graph has at most one outgoing edge per process, so the search is
//! `O(V + E)` with `E <= V`, and every weakly connected component holds at
//! most one cycle. That makes [`find_all_cycles`] exhaustive.

mod cycle;
pub mod wait_for;

use crate::allocation::{AllocationModel, ProcessId};
use cycle::{CycleSearch, SearchLimit};
use serde::Serialize;
use std::fmt;
use tracing::debug;

pub use wait_for::WaitForGraph;

/// One hop of a deadlock cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitEdge {
    pub waiter: String,
    pub resource: String,
    pub holder: String,
}

impl fmt::Display for WaitEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} waits for {} held by {}",
            self.waiter, self.resource, self.holder
        )
    }
}

/// Outcome of a deadlock check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeadlockReport {
    pub found: bool,
    /// Processes on the cycle, each waiting on the next, the last on the first
    pub cycle: Vec<String>,
    /// The wait relationships along the cycle, in the same order
    pub edges: Vec<WaitEdge>,
}

impl DeadlockReport {
    pub fn none() -> Self {
        Self::default()
    }

    fn from_cycle(model: &AllocationModel, graph: &WaitForGraph, members: &[ProcessId]) -> Self {
        let cycle = members
            .iter()
            .map(|&p| model.process_name(p).to_string())
            .collect();

        let edges = members
            .iter()
            .zip(members.iter().cycle().skip(1))
            .filter_map(|(&waiter, &holder)| {
                graph.link(waiter, holder).map(|resource| WaitEdge {
                    waiter: model.process_name(waiter).to_string(),
                    resource: model.resource_name(resource).to_string(),
                    holder: model.process_name(holder).to_string(),
                })
            })
            .collect();

        Self {
            found: true,
            cycle,
            edges,
        }
    }

    /// Cycle rendered as `P1 -> P2 -> P1`, empty when no deadlock
    pub fn path(&self) -> String {
        match self.cycle.first() {
            Some(first) => {
                let mut parts: Vec<&str> = self.cycle.iter().map(String::as_str).collect();
                parts.push(first);
                parts.join(" -> ")
            }
            None => String::new(),
        }
    }

    pub fn involves(&self, process: &str) -> bool {
        self.cycle.iter().any(|p| p == process)
    }
}

impl fmt::Display for DeadlockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.found {
            write!(f, "deadlock: {}", self.path())
        } else {
            write!(f, "no deadlock")
        }
    }
}

/// Check the model for a deadlock and return the first cycle found
///
/// Roots are tried in process creation order, so repeated calls on an
/// unchanged model return identical reports.
pub fn detect_deadlock(model: &AllocationModel) -> DeadlockReport {
    let graph = WaitForGraph::build(model);
    if graph.is_empty() {
        return DeadlockReport::none();
    }

    let cycles = CycleSearch::new(graph.inner()).run(SearchLimit::First);
    match cycles.first() {
        Some(members) => {
            let report = DeadlockReport::from_cycle(model, &graph, members);
            debug!(cycle = %report.path(), "deadlock detected");
            report
        }
        None => DeadlockReport::none(),
    }
}

/// Every independent deadlock in the model, in discovery order
pub fn find_all_cycles(model: &AllocationModel) -> Vec<DeadlockReport> {
    let graph = WaitForGraph::build(model);
    if graph.is_empty() {
        return Vec::new();
    }

    CycleSearch::new(graph.inner())
        .run(SearchLimit::All)
        .iter()
        .map(|members| DeadlockReport::from_cycle(model, &graph, members))
        .collect()
}

/// Names of all processes on some cycle, in creation order
pub fn deadlocked(model: &AllocationModel) -> Vec<String> {
    let reports = find_all_cycles(model);
    model
        .processes()
        .map(|(_, p)| p.name())
        .filter(|name| reports.iter().any(|r| r.involves(name)))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}

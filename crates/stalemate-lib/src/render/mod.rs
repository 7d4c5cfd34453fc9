//! # Allocation Rendering
//!
//! Plain-text rows for the process and resource tables, one-line step
//! descriptions, and a Graphviz DOT view of the resource-allocation graph.
//! Everything here returns strings; styling and printing belong to
//! [`display`](crate::display).

use crate::allocation::{ProcessState, ResourceState, Snapshot};
use crate::detector::DeadlockReport;
use crate::simulation::StepRecord;
use std::fmt::Write;

/// Placeholder for an empty cell
pub const EMPTY_CELL: &str = "-";

pub const PROCESS_HEADERS: [&str; 3] = ["Process", "Holding", "Waiting for"];
pub const RESOURCE_HEADERS: [&str; 2] = ["Resource", "Allocated to"];

pub fn process_rows(processes: &[ProcessState]) -> Vec<Vec<String>> {
    processes
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                cell(&p.holding.join(", ")),
                cell(p.waiting_for.as_deref().unwrap_or("")),
            ]
        })
        .collect()
}

pub fn resource_rows(resources: &[ResourceState]) -> Vec<Vec<String>> {
    resources
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                cell(r.allocated_to.as_deref().unwrap_or("")),
            ]
        })
        .collect()
}

/// `P1 request R2 -> waiting on P2`
pub fn step_summary(record: &StepRecord) -> String {
    format!(
        "{} {} {} -> {}",
        record.process, record.action, record.resource, record.outcome
    )
}

fn cell(text: &str) -> String {
    if text.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        text.to_string()
    }
}

/// Resource-allocation graph in Graphviz DOT
///
/// Processes are boxes and resources are circles. An edge `R -> P` is an
/// assignment, a dashed edge `P -> R` is a pending request. Processes and
/// wait edges on the reported cycle are drawn in red.
pub fn to_dot(snapshot: &Snapshot, report: &DeadlockReport) -> String {
    let mut out = String::new();
    let on_cycle = |name: &str| report.involves(name);

    // Writing into a String cannot fail
    let _ = writeln!(out, "digraph allocation {{");
    let _ = writeln!(out, "    rankdir=LR;");
    if report.found {
        let _ = writeln!(
            out,
            "    label={};\n    labelloc=t;\n    fontcolor=red;",
            quote(&format!("DEADLOCK: {}", report.path()))
        );
    }

    for process in &snapshot.processes {
        let style = if on_cycle(&process.name) {
            "shape=box, style=filled, fillcolor=lightpink, color=red"
        } else {
            "shape=box, style=filled, fillcolor=lightblue"
        };
        let _ = writeln!(
            out,
            "    {} [label={}, {style}];",
            node_id("p", &process.name),
            quote(&process.name)
        );
    }
    for resource in &snapshot.resources {
        let _ = writeln!(
            out,
            "    {} [label={}, shape=circle, style=filled, fillcolor=palegreen];",
            node_id("r", &resource.name),
            quote(&resource.name)
        );
    }

    for resource in &snapshot.resources {
        if let Some(holder) = &resource.allocated_to {
            let _ = writeln!(
                out,
                "    {} -> {} [color=darkgreen];",
                node_id("r", &resource.name),
                node_id("p", holder)
            );
        }
    }
    for process in &snapshot.processes {
        if let Some(target) = &process.waiting_for {
            let color = if on_cycle(&process.name) { "red" } else { "gray40" };
            let _ = writeln!(
                out,
                "    {} -> {} [style=dashed, color={color}];",
                node_id("p", &process.name),
                node_id("r", target)
            );
        }
    }

    out.push_str("}\n");
    out
}

/// Namespaced node id, so a process and a resource may share a name
fn node_id(prefix: &str, name: &str) -> String {
    quote(&format!("{prefix}:{name}"))
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}

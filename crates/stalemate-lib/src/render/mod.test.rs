use super::*;
use crate::allocation::AllocationModel;
use crate::detector::detect_deadlock;
use crate::feed::{Action, Operation};
use crate::simulation::Simulation;

fn deadlocked_model() -> AllocationModel {
    let mut model = AllocationModel::new();
    for (p, r) in [("P1", "R1"), ("P2", "R2"), ("P1", "R2"), ("P2", "R1")] {
        model.ensure_process(p);
        model.ensure_resource(r);
        model.request_resource(p, r).unwrap();
    }
    model
}

#[test]
fn test_process_rows_use_placeholder_for_empty_cells() {
    let mut model = AllocationModel::new();
    model.create_process("P1").unwrap();
    model.create_process("P2").unwrap();
    model.create_resource("R1").unwrap();
    model.create_resource("R2").unwrap();
    model.request_resource("P1", "R1").unwrap();
    model.request_resource("P1", "R2").unwrap();
    model.request_resource("P2", "R1").unwrap();

    let rows = process_rows(&model.process_states());

    assert_eq!(rows[0], vec!["P1", "R1, R2", "-"]);
    assert_eq!(rows[1], vec!["P2", "-", "R1"]);
}

#[test]
fn test_resource_rows() {
    let model = deadlocked_model();

    let rows = resource_rows(&model.resource_states());

    assert_eq!(rows, vec![vec!["R1", "P1"], vec!["R2", "P2"]]);
}

#[test]
fn test_step_summary_for_waiting_hold() {
    let mut sim = Simulation::new();
    sim.apply(&Operation::new("P1", Action::Request, "R1"));
    let record = sim.apply(&Operation::new("P2", Action::Hold, "R1"));

    assert_eq!(step_summary(record), "P2 hold R1 -> waiting on P1");
}

#[test]
fn test_dot_without_deadlock() {
    let mut model = AllocationModel::new();
    model.ensure_process("P1");
    model.ensure_resource("R1");
    model.request_resource("P1", "R1").unwrap();

    let dot = to_dot(&model.snapshot(), &detect_deadlock(&model));

    assert!(dot.starts_with("digraph allocation {"));
    assert!(dot.trim_end().ends_with('}'));
    assert!(dot.contains("\"r:R1\" -> \"p:P1\" [color=darkgreen];"));
    assert!(!dot.contains("DEADLOCK"));
    assert!(!dot.contains("style=dashed"));
}

#[test]
fn test_dot_highlights_cycle() {
    let model = deadlocked_model();

    let dot = to_dot(&model.snapshot(), &detect_deadlock(&model));

    assert!(dot.contains("label=\"DEADLOCK: "));
    assert!(dot.contains("\"p:P1\" -> \"r:R2\" [style=dashed, color=red];"));
    assert!(dot.contains("\"p:P2\" -> \"r:R1\" [style=dashed, color=red];"));
    assert_eq!(dot.matches("fillcolor=lightpink").count(), 2);
}

#[test]
fn test_dot_quotes_awkward_names() {
    let mut model = AllocationModel::new();
    model.ensure_process("say \"hi\"");

    let dot = to_dot(&model.snapshot(), &DeadlockReport::none());

    assert!(dot.contains("\"p:say \\\"hi\\\"\""));
}

#[test]
fn test_shared_name_gets_two_nodes() {
    let mut model = AllocationModel::new();
    model.ensure_process("X");
    model.ensure_resource("X");

    let dot = to_dot(&model.snapshot(), &DeadlockReport::none());

    assert!(dot.contains("\"p:X\" [label=\"X\""));
    assert!(dot.contains("\"r:X\" [label=\"X\""));
}

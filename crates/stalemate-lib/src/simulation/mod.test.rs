use super::*;
use crate::feed::{Action, parse_operations};

fn feed(rows: &[(&str, Action, &str)]) -> Vec<Operation> {
    rows.iter()
        .map(|&(p, a, r)| Operation::new(p, a, r))
        .collect()
}

fn scenario_a() -> Vec<Operation> {
    feed(&[
        ("P1", Action::Request, "R1"),
        ("P2", Action::Request, "R2"),
        ("P1", Action::Request, "R2"),
        ("P2", Action::Request, "R1"),
    ])
}

#[test]
fn test_entities_are_created_on_first_mention() {
    let mut sim = Simulation::new();

    sim.run(&feed(&[
        ("P2", Action::Request, "R9"),
        ("P1", Action::Hold, "R1"),
        ("P2", Action::Release, "R9"),
    ]));

    let processes: Vec<&str> = sim.model().processes().map(|(_, p)| p.name()).collect();
    let resources: Vec<&str> = sim.model().resources().map(|(_, r)| r.name()).collect();
    assert_eq!(processes, vec!["P2", "P1"]);
    assert_eq!(resources, vec!["R9", "R1"]);
}

#[test]
fn test_each_step_records_outcome_and_snapshot() {
    let mut sim = Simulation::new();

    sim.run(&scenario_a());

    let outcomes: Vec<&str> = sim.steps().iter().map(|s| s.outcome.label()).collect();
    assert_eq!(outcomes, vec!["granted", "granted", "waiting", "waiting"]);

    let third = &sim.steps()[2];
    assert_eq!(third.step, 3);
    assert_eq!(
        third.outcome,
        StepOutcome::Waiting {
            holder: "P2".to_string()
        }
    );
    assert_eq!(third.processes[0].waiting_for.as_deref(), Some("R2"));
    assert_eq!(third.resources.len(), 2);
    assert!(!third.is_deadlocked());
    assert!(sim.steps()[3].is_deadlocked());
}

#[test]
fn test_run_reports_final_deadlock() {
    let mut sim = Simulation::new();

    let summary = sim.run(&scenario_a());

    assert!(summary.deadlocked());
    assert_eq!(summary.applied, 4);
    assert_eq!(summary.total, 4);
    assert!(!summary.stopped_early);
    assert_eq!(summary.first_deadlock_step, Some(4));
    assert_eq!(summary.report.cycle.len(), 2);
}

#[test]
fn test_release_after_deadlock_clears_it() {
    let mut ops = scenario_a();
    ops.push(Operation::new("P1", Action::Release, "R1"));
    let mut sim = Simulation::new();

    let summary = sim.run(&ops);

    assert!(!summary.deadlocked());
    assert_eq!(summary.first_deadlock_step, Some(4));
    assert_eq!(
        sim.steps()[4].outcome,
        StepOutcome::Released {
            woken: vec!["P2".to_string()]
        }
    );
}

#[test]
fn test_stop_on_deadlock_halts_early() {
    let mut ops = scenario_a();
    ops.push(Operation::new("P1", Action::Release, "R1"));
    let mut sim = Simulation::new().stop_on_deadlock(true);

    let summary = sim.run(&ops);

    assert!(summary.deadlocked());
    assert!(summary.stopped_early);
    assert_eq!(summary.applied, 4);
    assert_eq!(sim.steps().len(), 4);
}

#[test]
fn test_stop_on_deadlock_wins_over_on_demand_in_either_order() {
    let mut ops = scenario_a();
    ops.push(Operation::new("P1", Action::Release, "R1"));

    let builders = [
        Simulation::new()
            .stop_on_deadlock(true)
            .with_detection(DetectionMode::OnDemand),
        Simulation::new()
            .with_detection(DetectionMode::OnDemand)
            .stop_on_deadlock(true),
    ];

    for mut sim in builders {
        let summary = sim.run(&ops);

        assert!(summary.stopped_early);
        assert_eq!(summary.applied, 4);
        assert_eq!(summary.first_deadlock_step, Some(4));
        assert!(summary.deadlocked());
    }
}

#[test]
fn test_rejected_release_is_recorded_without_change() {
    let mut sim = Simulation::new();
    sim.apply(&Operation::new("P1", Action::Request, "R1"));
    let before = sim.model().snapshot();

    let record = sim.apply(&Operation::new("P2", Action::Release, "R1")).clone();

    assert!(record.outcome.is_rejected());
    assert_eq!(record.outcome.label(), "rejected");
    assert_eq!(sim.model().resource_by_name("R1").unwrap().allocated_to(), sim.model().process_id("P1"));
    // P2 was auto-created by the rejected step, nothing else changed
    assert_eq!(record.resources, before.resources);
}

#[test]
fn test_on_demand_mode_leaves_steps_unchecked() {
    let mut sim = Simulation::new().with_detection(DetectionMode::OnDemand);

    let summary = sim.run(&scenario_a());

    assert!(sim.steps().iter().all(|s| !s.is_deadlocked()));
    assert_eq!(sim.first_deadlock_step(), None);
    assert!(summary.deadlocked());
    assert!(sim.detect().found);
}

#[test]
fn test_run_from_parsed_feed() {
    let text = "process,action,resource\nP1,request,R1\nP2,request,R1\nP1,release,R1\nP2,request,R1\n";
    let operations = parse_operations(text).unwrap();
    let mut sim = Simulation::new();

    let summary = sim.run(&operations);

    assert!(!summary.deadlocked());
    let last = sim.steps().last().unwrap();
    assert_eq!(last.outcome, StepOutcome::Granted);
    assert_eq!(last.resources[0].allocated_to.as_deref(), Some("P2"));
    sim.model().verify_consistency().unwrap();
}

#[test]
fn test_outcome_display() {
    assert_eq!(StepOutcome::AlreadyHeld.to_string(), "already held");
    assert_eq!(
        StepOutcome::Released {
            woken: vec!["P2".into(), "P3".into()]
        }
        .to_string(),
        "released, woke P2, P3"
    );
}

#[test]
fn test_step_record_serializes_with_tagged_outcome() {
    let mut sim = Simulation::new();
    sim.run(&scenario_a());

    let value = serde_json::to_value(&sim.steps()[2]).unwrap();

    assert_eq!(value["action"], "request");
    assert_eq!(value["outcome"]["kind"], "waiting");
    assert_eq!(value["outcome"]["holder"], "P2");
    assert_eq!(value["deadlock"], serde_json::json!([]));
}

use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

/// Build a model with the given processes and resources already registered
fn model_with(processes: &[&str], resources: &[&str]) -> AllocationModel {
    let mut model = AllocationModel::new();
    for name in processes {
        model.create_process(name).unwrap();
    }
    for name in resources {
        model.create_resource(name).unwrap();
    }
    model
}

fn holder_of(model: &AllocationModel, resource: &str) -> Option<String> {
    model
        .resource_by_name(resource)
        .and_then(|r| r.allocated_to())
        .map(|p| model.process_name(p).to_string())
}

fn waiting_of(model: &AllocationModel, process: &str) -> Option<String> {
    model
        .process_by_name(process)
        .and_then(|p| p.waiting_for())
        .map(|r| model.resource_name(r).to_string())
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_distinct_creates_enumerate_once() {
    let model = model_with(&["P1", "P2", "P3"], &["R1", "R2"]);

    let processes: Vec<&str> = model.processes().map(|(_, p)| p.name()).collect();
    let resources: Vec<&str> = model.resources().map(|(_, r)| r.name()).collect();

    assert_eq!(processes, vec!["P1", "P2", "P3"]);
    assert_eq!(resources, vec!["R1", "R2"]);
    assert_eq!(model.process_count(), 3);
    assert_eq!(model.resource_count(), 2);
}

#[test]
fn test_duplicate_process_is_rejected() {
    let mut model = model_with(&["P1"], &[]);

    let result = model.create_process("P1");
    assert_eq!(
        result,
        Err(AllocationError::DuplicateEntity {
            kind: EntityKind::Process,
            name: "P1".to_string(),
        })
    );
    assert_eq!(model.process_count(), 1);
}

#[test]
fn test_duplicate_resource_is_rejected() {
    let mut model = model_with(&[], &["R1"]);
    assert!(matches!(
        model.create_resource("R1"),
        Err(AllocationError::DuplicateEntity {
            kind: EntityKind::Resource,
            ..
        })
    ));
}

#[test]
fn test_namespaces_are_separate() {
    let mut model = AllocationModel::new();
    model.create_process("X").unwrap();
    model.create_resource("X").unwrap();

    assert!(model.process_by_name("X").is_some());
    assert!(model.resource_by_name("X").is_some());
}

#[test]
fn test_ensure_is_idempotent() {
    let mut model = AllocationModel::new();
    let a = model.ensure_process("P1");
    let b = model.ensure_process("P1");
    let r1 = model.ensure_resource("R1");
    let r2 = model.ensure_resource("R1");

    assert_eq!(a, b);
    assert_eq!(r1, r2);
    assert_eq!(model.process_count(), 1);
    assert_eq!(model.resource_count(), 1);
}

#[test]
fn test_new_entities_start_empty() {
    let model = model_with(&["P1"], &["R1"]);
    let process = model.process_by_name("P1").unwrap();
    let resource = model.resource_by_name("R1").unwrap();

    assert!(process.holding().is_empty());
    assert!(!process.is_blocked());
    assert!(resource.is_free());
}

// ============================================================================
// Requests
// ============================================================================

#[test]
fn test_request_unallocated_grants_immediately() {
    let mut model = model_with(&["P1"], &["R1"]);

    let outcome = model.request_resource("P1", "R1").unwrap();

    assert_eq!(outcome, RequestOutcome::Granted);
    assert_eq!(holder_of(&model, "R1").as_deref(), Some("P1"));
    assert_eq!(waiting_of(&model, "P1"), None);
    model.verify_consistency().unwrap();
}

#[test]
fn test_request_held_resource_waits_without_changing_holder() {
    let mut model = model_with(&["P1", "P2"], &["R1"]);
    model.request_resource("P1", "R1").unwrap();

    let outcome = model.request_resource("P2", "R1").unwrap();

    let p1 = model.process_id("P1").unwrap();
    assert_eq!(outcome, RequestOutcome::Waiting { holder: p1 });
    assert_eq!(holder_of(&model, "R1").as_deref(), Some("P1"));
    assert_eq!(waiting_of(&model, "P2").as_deref(), Some("R1"));
    assert!(model.process_by_name("P2").unwrap().holding().is_empty());
    model.verify_consistency().unwrap();
}

#[test]
fn test_repeated_request_is_idempotent() {
    let mut model = model_with(&["P1", "P2"], &["R1"]);
    model.request_resource("P1", "R1").unwrap();
    model.request_resource("P2", "R1").unwrap();
    let before = model.snapshot();

    model.request_resource("P2", "R1").unwrap();

    assert_eq!(model.snapshot(), before);
}

#[test]
fn test_self_request_is_a_noop() {
    let mut model = model_with(&["P1"], &["R1"]);
    model.request_resource("P1", "R1").unwrap();
    let before = model.snapshot();

    let outcome = model.request_resource("P1", "R1").unwrap();

    assert_eq!(outcome, RequestOutcome::AlreadyHeld);
    assert_eq!(model.snapshot(), before);
    assert_eq!(waiting_of(&model, "P1"), None);
}

#[test]
fn test_new_request_replaces_previous_wait_target() {
    let mut model = model_with(&["P1", "P2", "P3"], &["R1", "R2"]);
    model.request_resource("P1", "R1").unwrap();
    model.request_resource("P2", "R2").unwrap();

    model.request_resource("P3", "R1").unwrap();
    model.request_resource("P3", "R2").unwrap();

    assert_eq!(waiting_of(&model, "P3").as_deref(), Some("R2"));
}

#[test]
fn test_request_unknown_entities() {
    let mut model = model_with(&["P1"], &["R1"]);

    assert!(matches!(
        model.request_resource("P9", "R1"),
        Err(AllocationError::UnknownEntity {
            kind: EntityKind::Process,
            ..
        })
    ));
    assert!(matches!(
        model.request_resource("P1", "R9"),
        Err(AllocationError::UnknownEntity {
            kind: EntityKind::Resource,
            ..
        })
    ));
}

#[test]
fn test_holding_keeps_acquisition_order() {
    let mut model = model_with(&["P1"], &["R1", "R2", "R3"]);
    model.request_resource("P1", "R3").unwrap();
    model.request_resource("P1", "R1").unwrap();

    let state = &model.process_states()[0];
    assert_eq!(state.holding, vec!["R3".to_string(), "R1".to_string()]);
}

// ============================================================================
// Releases
// ============================================================================

#[test]
fn test_release_clears_holder_and_every_waiter() {
    let mut model = model_with(&["P1", "P2", "P3"], &["R1"]);
    model.request_resource("P1", "R1").unwrap();
    model.request_resource("P2", "R1").unwrap();
    model.request_resource("P3", "R1").unwrap();

    let outcome = model.release_resource("P1", "R1").unwrap();

    let p2 = model.process_id("P2").unwrap();
    let p3 = model.process_id("P3").unwrap();
    assert_eq!(outcome.woken, vec![p2, p3]);
    assert_eq!(holder_of(&model, "R1"), None);
    assert!(model.process_by_name("P1").unwrap().holding().is_empty());
    assert_eq!(waiting_of(&model, "P2"), None);
    assert_eq!(waiting_of(&model, "P3"), None);
    model.verify_consistency().unwrap();
}

#[test]
fn test_release_does_not_regrant() {
    let mut model = model_with(&["P1", "P2"], &["R1"]);
    model.request_resource("P1", "R1").unwrap();
    model.request_resource("P2", "R1").unwrap();

    model.release_resource("P1", "R1").unwrap();

    assert!(model.resource_by_name("R1").unwrap().is_free());
    assert!(model.process_by_name("P2").unwrap().holding().is_empty());
}

#[test]
fn test_release_by_non_holder_is_rejected_without_change() {
    let mut model = model_with(&["P1", "P2"], &["R1", "R2"]);
    model.request_resource("P1", "R1").unwrap();
    let before = model.snapshot();

    let held_elsewhere = model.release_resource("P2", "R1");
    let unallocated = model.release_resource("P2", "R2");

    assert!(matches!(
        held_elsewhere,
        Err(AllocationError::InvalidOperation { ref reason, .. }) if reason.contains("P1")
    ));
    assert!(matches!(
        unallocated,
        Err(AllocationError::InvalidOperation { ref reason, .. }) if reason.contains("not allocated")
    ));
    assert_eq!(model.snapshot(), before);
}

#[test]
fn test_release_keeps_other_holdings() {
    let mut model = model_with(&["P1"], &["R1", "R2"]);
    model.request_resource("P1", "R1").unwrap();
    model.request_resource("P1", "R2").unwrap();

    model.release_resource("P1", "R1").unwrap();

    assert_eq!(
        model.process_states()[0].holding,
        vec!["R2".to_string()]
    );
}

// ============================================================================
// Invariants across mixed sequences
// ============================================================================

#[test]
fn test_invariants_hold_after_every_mutation() {
    let mut model = model_with(&["A", "B", "C"], &["X", "Y", "Z"]);
    let script: &[(&str, &str, bool)] = &[
        ("A", "X", true),
        ("B", "Y", true),
        ("C", "Z", true),
        ("A", "Y", true),
        ("B", "Z", true),
        ("C", "X", true),
        ("B", "Y", false),
        ("A", "Y", true),
        ("C", "Z", false),
        ("B", "Z", true),
        ("A", "X", false),
        ("C", "X", true),
        ("A", "Z", false),
    ];

    for &(process, resource, is_request) in script {
        let _ = if is_request {
            model.request_resource(process, resource).map(|_| ())
        } else {
            model.release_resource(process, resource).map(|_| ())
        };
        model
            .verify_consistency()
            .unwrap_or_else(|e| panic!("after {process}/{resource}: {e}"));
    }
}

#[test]
fn test_snapshot_resolves_names() {
    let mut model = model_with(&["P1", "P2"], &["R1"]);
    model.request_resource("P1", "R1").unwrap();
    model.request_resource("P2", "R1").unwrap();

    let snapshot = model.snapshot();

    assert_eq!(
        snapshot.processes[1],
        ProcessState {
            name: "P2".to_string(),
            holding: vec![],
            waiting_for: Some("R1".to_string()),
        }
    );
    assert_eq!(
        snapshot.resources[0],
        ResourceState {
            name: "R1".to_string(),
            allocated_to: Some("P1".to_string()),
        }
    );
}

#[test]
fn test_empty_model() {
    let model = AllocationModel::new();
    assert!(model.is_empty());
    assert_eq!(model.snapshot(), Snapshot::default());
    model.verify_consistency().unwrap();
}

#[test]
fn test_model_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<AllocationModel>();
}

use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

/// Apply `(process, resource)` requests, creating entities on first mention
fn model_from_requests(requests: &[(&str, &str)]) -> AllocationModel {
    let mut model = AllocationModel::new();
    for &(process, resource) in requests {
        model.ensure_process(process);
        model.ensure_resource(resource);
        model.request_resource(process, resource).unwrap();
    }
    model
}

/// Scenario A: P1 holds R1, P2 holds R2, each requests the other's resource
fn two_way_deadlock() -> AllocationModel {
    model_from_requests(&[("P1", "R1"), ("P2", "R2"), ("P1", "R2"), ("P2", "R1")])
}

/// Rotate a cycle so it starts with its smallest name
fn normalized(cycle: &[String]) -> Vec<String> {
    let Some(start) = cycle
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    cycle[start..]
        .iter()
        .chain(cycle[..start].iter())
        .cloned()
        .collect()
}

// ============================================================================
// Wait-for graph
// ============================================================================

#[test]
fn test_graph_has_a_node_per_process() {
    let model = model_from_requests(&[("P1", "R1"), ("P2", "R2"), ("P3", "R3")]);
    let graph = WaitForGraph::build(&model);

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.is_empty());
    assert!(!graph.has_cycle());
}

#[test]
fn test_graph_edges_follow_wait_relationships() {
    let model = model_from_requests(&[("P2", "R1"), ("P3", "R2"), ("P1", "R1"), ("P2", "R2")]);
    let graph = WaitForGraph::build(&model);

    let edges: Vec<(String, String, String)> = graph
        .edges()
        .map(|(w, r, h)| {
            (
                model.process_name(w).to_string(),
                model.resource_name(r).to_string(),
                model.process_name(h).to_string(),
            )
        })
        .collect();

    assert_eq!(edges.len(), 2);
    assert!(edges.contains(&("P1".into(), "R1".into(), "P2".into())));
    assert!(edges.contains(&("P2".into(), "R2".into(), "P3".into())));
}

#[test]
fn test_graph_link_returns_connecting_resource() {
    let model = two_way_deadlock();
    let graph = WaitForGraph::build(&model);
    let p1 = model.process_id("P1").unwrap();
    let p2 = model.process_id("P2").unwrap();

    assert_eq!(graph.link(p1, p2), model.resource_id("R2"));
    assert_eq!(graph.link(p2, p1), model.resource_id("R1"));
}

// ============================================================================
// detect_deadlock
// ============================================================================

#[test]
fn test_empty_model_has_no_deadlock() {
    let report = detect_deadlock(&AllocationModel::new());

    assert!(!report.found);
    assert!(report.cycle.is_empty());
    assert!(report.edges.is_empty());
    assert_eq!(report, DeadlockReport::none());
}

#[test]
fn test_scenario_a_two_way_deadlock() {
    let model = two_way_deadlock();

    let report = detect_deadlock(&model);

    assert!(report.found);
    assert_eq!(normalized(&report.cycle), vec!["P1", "P2"]);
    assert_eq!(report.edges.len(), 2);
    assert!(report.edges.contains(&WaitEdge {
        waiter: "P1".into(),
        resource: "R2".into(),
        holder: "P2".into(),
    }));
    assert!(report.edges.contains(&WaitEdge {
        waiter: "P2".into(),
        resource: "R1".into(),
        holder: "P1".into(),
    }));
}

#[test]
fn test_scenario_b_release_breaks_deadlock() {
    let mut model = two_way_deadlock();

    model.release_resource("P1", "R1").unwrap();

    assert_eq!(model.process_by_name("P2").unwrap().waiting_for(), None);
    let report = detect_deadlock(&model);
    assert!(!report.found);
    assert!(report.cycle.is_empty());
}

#[test]
fn test_scenario_c_chain_is_not_a_deadlock() {
    // P1 -> P2 -> P3
    let model = model_from_requests(&[("P2", "R1"), ("P3", "R2"), ("P1", "R1"), ("P2", "R2")]);

    let report = detect_deadlock(&model);

    assert!(!report.found);
    assert!(find_all_cycles(&model).is_empty());
}

#[test]
fn test_detection_is_idempotent() {
    let model = two_way_deadlock();
    let before = model.snapshot();

    let first = detect_deadlock(&model);
    let second = detect_deadlock(&model);

    assert_eq!(first, second);
    assert_eq!(model.snapshot(), before);
}

#[test]
fn test_three_cycle_is_reported_in_wait_order() {
    // P1 -> P2 -> P3 -> P1
    let model = model_from_requests(&[
        ("P1", "R1"),
        ("P2", "R2"),
        ("P3", "R3"),
        ("P1", "R2"),
        ("P2", "R3"),
        ("P3", "R1"),
    ]);

    let report = detect_deadlock(&model);

    assert!(report.found);
    assert_eq!(report.cycle, vec!["P1", "P2", "P3"]);
    assert_eq!(report.path(), "P1 -> P2 -> P3 -> P1");
    let resources: Vec<&str> = report.edges.iter().map(|e| e.resource.as_str()).collect();
    assert_eq!(resources, vec!["R2", "R3", "R1"]);
}

#[test]
fn test_tail_leading_into_cycle_is_excluded() {
    // P0 -> P1 -> P2 -> P1
    let model = model_from_requests(&[
        ("P0", "R0"),
        ("P1", "R1"),
        ("P2", "R2"),
        ("P0", "R1"),
        ("P1", "R2"),
        ("P2", "R1"),
    ]);

    let report = detect_deadlock(&model);

    assert!(report.found);
    assert!(!report.involves("P0"));
    assert_eq!(normalized(&report.cycle), vec!["P1", "P2"]);
}

#[test]
fn test_release_by_other_side_leaves_one_edge() {
    let mut model = two_way_deadlock();
    model.release_resource("P2", "R2").unwrap();

    // P1 was woken; P2 still waits on R1
    let graph = WaitForGraph::build(&model);
    assert_eq!(graph.edge_count(), 1);
    assert!(!detect_deadlock(&model).found);
}

// ============================================================================
// find_all_cycles / deadlocked
// ============================================================================

#[test]
fn test_disjoint_cycles_are_all_found() {
    let model = model_from_requests(&[
        ("A", "X"),
        ("B", "Y"),
        ("A", "Y"),
        ("B", "X"),
        ("C", "Z"),
        ("D", "W"),
        ("C", "W"),
        ("D", "Z"),
        ("E", "V"),
    ]);

    let reports = find_all_cycles(&model);

    assert_eq!(reports.len(), 2);
    assert_eq!(normalized(&reports[0].cycle), vec!["A", "B"]);
    assert_eq!(normalized(&reports[1].cycle), vec!["C", "D"]);
    assert_eq!(deadlocked(&model), vec!["A", "B", "C", "D"]);
    assert_eq!(detect_deadlock(&model), reports[0]);
}

#[test]
fn test_detector_agrees_with_cycle_check() {
    let scripts: &[&[(&str, &str)]] = &[
        &[],
        &[("P1", "R1"), ("P2", "R1")],
        &[("P1", "R1"), ("P2", "R2"), ("P1", "R2"), ("P2", "R1")],
        &[("P2", "R1"), ("P3", "R2"), ("P1", "R1"), ("P2", "R2")],
    ];

    for script in scripts {
        let model = model_from_requests(script);
        let graph = WaitForGraph::build(&model);
        assert_eq!(detect_deadlock(&model).found, graph.has_cycle());
    }
}

#[test]
fn test_report_display() {
    assert_eq!(DeadlockReport::none().to_string(), "no deadlock");
    let report = detect_deadlock(&two_way_deadlock());
    assert!(report.to_string().starts_with("deadlock: "));
    assert_eq!(report.path().matches(" -> ").count(), 2);
}

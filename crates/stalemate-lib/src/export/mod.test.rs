use super::*;
use crate::feed::{Action, Operation};
use crate::simulation::Simulation;
use tempfile::TempDir;

fn to_csv_string(steps: &[StepRecord]) -> String {
    let mut buf = Vec::new();
    write_csv(steps, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn scenario_steps() -> Vec<StepRecord> {
    let mut sim = Simulation::new();
    sim.run(&[
        Operation::new("P1", Action::Request, "R1"),
        Operation::new("P2", Action::Request, "R2"),
        Operation::new("P1", Action::Request, "R2"),
        Operation::new("P2", Action::Hold, "R1"),
    ]);
    sim.into_steps()
}

#[test]
fn test_csv_header_and_rows() {
    let csv = to_csv_string(&scenario_steps());
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "1,P1,request,R1,granted,P1:R1,P1->,R1->P1,");
    assert_eq!(
        lines[3],
        "3,P1,request,R2,waiting,P1:R1;P2:R2,P1->R2;P2->,R1->P1;R2->P2,"
    );
}

#[test]
fn test_csv_deadlock_column() {
    let csv = to_csv_string(&scenario_steps());
    let last = csv.lines().last().unwrap();

    assert!(last.starts_with("4,P2,hold,R1,waiting,"));
    let deadlock = last.rsplit(',').next().unwrap();
    assert!(deadlock == "P1 -> P2" || deadlock == "P2 -> P1", "{deadlock}");
}

#[test]
fn test_state_columns() {
    let processes = vec![
        ProcessState {
            name: "P1".into(),
            holding: vec!["R1".into(), "R2".into()],
            waiting_for: None,
        },
        ProcessState {
            name: "P2".into(),
            holding: vec![],
            waiting_for: Some("R1".into()),
        },
    ];
    let resources = vec![
        ResourceState {
            name: "R1".into(),
            allocated_to: Some("P1".into()),
        },
        ResourceState {
            name: "R3".into(),
            allocated_to: None,
        },
    ];

    assert_eq!(holding_column(&processes), "P1:R1|R2;P2:");
    assert_eq!(waiting_column(&processes), "P1->;P2->R1");
    assert_eq!(allocation_column(&resources), "R1->P1;R3->");
    assert_eq!(holding_column(&[]), "");
}

#[test]
fn test_fields_with_commas_are_quoted() {
    assert_eq!(escape_field("plain"), "plain");
    assert_eq!(escape_field("a,b"), "\"a,b\"");
    assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
}

#[test]
fn test_json_export_round_trips_through_serde_value() {
    let mut buf = Vec::new();
    write_json(&scenario_steps(), &mut buf).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let steps = value.as_array().unwrap();

    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0]["outcome"]["kind"], "granted");
    assert_eq!(steps[3]["deadlock"].as_array().unwrap().len(), 2);
    assert_eq!(steps[3]["resources"][0]["allocated_to"], "P1");
}

#[test]
fn test_export_steps_writes_file() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("steps.csv");
    let json_path = dir.path().join("steps.json");
    let steps = scenario_steps();

    export_steps(&steps, &csv_path, ExportFormat::Csv).unwrap();
    export_steps(&steps, &json_path, ExportFormat::Json).unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("step,process,action"));
    let json = std::fs::read_to_string(&json_path).unwrap();
    assert!(json.trim_start().starts_with('['));
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope").join("steps.csv");

    let err = export_steps(&scenario_steps(), &path, ExportFormat::Csv).unwrap_err();

    assert!(matches!(err, ExportError::Io { .. }));
}

#[test]
fn test_format_from_path_and_str() {
    assert_eq!(ExportFormat::from_path(Path::new("out.JSON")), Some(ExportFormat::Json));
    assert_eq!(ExportFormat::from_path(Path::new("out.csv")), Some(ExportFormat::Csv));
    assert_eq!(ExportFormat::from_path(Path::new("out.txt")), None);
    assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    assert!("xml".parse::<ExportFormat>().is_err());
}

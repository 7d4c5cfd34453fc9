//! E2E tests for replaying feeds from disk
//!
//! Feeds are written into a hermetic input directory and driven through the
//! same loader, simulation and command handlers the binary uses.

use anyhow::Result;
use predicates::prelude::*;
use stalemate_lib::application::cli::Commands;
use stalemate_lib::application::commands::{Verdict, execute_command_with_session};
use stalemate_lib::feed::load_operations;
use stalemate_lib::simulation::{DetectionMode, Simulation};
use stalemate_tests::TestEnvironment;
use stalemate_tests::fixtures::{self, ALL};
use std::path::PathBuf;

fn run_command(file: &str) -> Commands {
    Commands::Run {
        file: PathBuf::from(file),
        export: None,
        export_format: None,
        stop_on_deadlock: false,
    }
}

#[test]
fn e2e_every_scenario_reaches_its_verdict() -> Result<()> {
    let env = TestEnvironment::with_scenarios(&ALL)?;
    let session = env.session();

    for scenario in ALL {
        let verdict = execute_command_with_session(run_command(&scenario.file_name()), &session)?;
        let expected = if scenario.deadlocked {
            Verdict::Deadlock
        } else {
            Verdict::Clean
        };
        assert_eq!(verdict, expected, "{}", scenario.name);
    }

    Ok(())
}

#[test]
fn e2e_check_agrees_with_run_on_every_scenario() -> Result<()> {
    let env = TestEnvironment::with_scenarios(&ALL)?;
    let session = env.session();

    for scenario in ALL {
        let run = execute_command_with_session(run_command(&scenario.file_name()), &session)?;
        let check = execute_command_with_session(
            Commands::Check {
                file: PathBuf::from(scenario.file_name()),
            },
            &session,
        )?;
        assert_eq!(run, check, "{}", scenario.name);
    }

    Ok(())
}

#[test]
fn e2e_per_step_and_on_demand_detection_agree() -> Result<()> {
    let env = TestEnvironment::with_scenarios(&ALL)?;

    for scenario in ALL {
        let operations = load_operations(&env.input_path.join(scenario.file_name()))?;

        let every_step = Simulation::new().run(&operations);
        let on_demand = Simulation::new()
            .with_detection(DetectionMode::OnDemand)
            .run(&operations);

        assert_eq!(every_step.report, on_demand.report, "{}", scenario.name);
        assert_eq!(every_step.deadlocked(), scenario.deadlocked, "{}", scenario.name);
    }

    Ok(())
}

#[test]
fn e2e_three_way_cycle_excludes_the_bystander() -> Result<()> {
    let env = TestEnvironment::new()?;
    let path = env.write_scenario(&fixtures::THREE_WAY_WITH_TAIL)?;

    let summary = Simulation::new().run(&load_operations(&path)?);

    assert!(summary.report.found);
    assert_eq!(summary.report.cycle.len(), 3);
    assert!(!summary.report.involves("P4"));
    assert_eq!(summary.first_deadlock_step, Some(7));

    Ok(())
}

#[test]
fn e2e_resolved_cycle_remembers_the_first_deadlock() -> Result<()> {
    let env = TestEnvironment::new()?;
    let path = env.write_scenario(&fixtures::RESOLVED_CYCLE)?;

    let summary = Simulation::new().run(&load_operations(&path)?);

    assert!(!summary.deadlocked());
    assert_eq!(summary.first_deadlock_step, Some(4));

    Ok(())
}

#[test]
fn e2e_stop_on_deadlock_leaves_later_operations_unapplied() -> Result<()> {
    let env = TestEnvironment::new()?;
    let path = env.write_scenario(&fixtures::RESOLVED_CYCLE)?;
    let operations = load_operations(&path)?;

    let mut simulation = Simulation::new().stop_on_deadlock(true);
    let summary = simulation.run(&operations);

    assert!(summary.stopped_early);
    assert_eq!(summary.applied, 4);
    assert_eq!(summary.total, 5);
    assert_eq!(simulation.steps().len(), 4);
    assert!(summary.deadlocked());

    Ok(())
}

#[test]
fn e2e_messy_feed_is_normalized() -> Result<()> {
    let env = TestEnvironment::new()?;
    let path = env.write_scenario(&fixtures::MESSY_FORMAT)?;

    let operations = load_operations(&path)?;
    assert_eq!(operations.len(), 2);
    assert_eq!(operations[1].to_string(), "P2 request R1");

    let mut simulation = Simulation::new();
    simulation.run(&operations);
    let p2 = simulation
        .model()
        .process_by_name("P2")
        .expect("P2 should exist");
    assert!(p2.waiting_for().is_some());

    Ok(())
}

#[test]
fn e2e_run_exports_csv_and_json() -> Result<()> {
    let env = TestEnvironment::with_scenarios(&[fixtures::TWO_PROCESS_CYCLE])?;
    let session = env.session();
    let csv_path = env.output_path("steps.csv");
    let json_path = env.output_path("steps.json");

    for export in [&csv_path, &json_path] {
        execute_command_with_session(
            Commands::Run {
                file: PathBuf::from(fixtures::TWO_PROCESS_CYCLE.file_name()),
                export: Some(export.clone()),
                export_format: None,
                stop_on_deadlock: false,
            },
            &session,
        )?;
    }

    let csv = std::fs::read_to_string(&csv_path)?;
    assert!(predicate::str::starts_with("step,process,action,resource").eval(&csv));
    assert_eq!(csv.lines().count(), 5);
    let on_cycle = predicate::str::contains("P1 -> P2").or(predicate::str::contains("P2 -> P1"));
    assert!(on_cycle.eval(csv.lines().last().unwrap_or_default()));

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json_path)?)?;
    let steps = json.as_array().expect("step log should be an array");
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[3]["outcome"]["kind"], "waiting");
    assert_eq!(steps[0]["deadlock"], serde_json::json!([]));

    Ok(())
}

#[test]
fn e2e_cases_lists_and_missing_feed_fails() -> Result<()> {
    let env = TestEnvironment::with_scenarios(&ALL)?;
    let session = env.session();

    let verdict = execute_command_with_session(
        Commands::Cases {
            dir: None,
            pick: false,
        },
        &session,
    )?;
    assert_eq!(verdict, Verdict::Clean);

    let err = execute_command_with_session(run_command("does_not_exist.csv"), &session)
        .expect_err("missing feed should fail");
    assert!(predicate::str::contains("does_not_exist.csv").eval(&format!("{err:#}")));

    Ok(())
}

#[test]
fn e2e_invalid_action_reports_line_number() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_feed("bad.csv", "process,action,resource\nP1,hold,R1\nP2,steal,R1\n")?;

    let err = execute_command_with_session(run_command("bad.csv"), &env.session())
        .expect_err("invalid action should fail");
    let message = format!("{err:#}");
    assert!(message.contains("steal"));
    assert!(message.contains("line 3"));

    Ok(())
}

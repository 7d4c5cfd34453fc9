//! Command execution handlers
//!
//! Each handler receives a [`Session`] and returns the [`Verdict`] that
//! decides the process exit code.

use crate::application::session::{CommandSession, Session};
use crate::application::{CliConfig, Commands};
use crate::display::interactive::InteractiveDisplay;
use crate::export::{self, ExportFormat};
use crate::feed::Operation;
use crate::render;
use crate::simulation::{DetectionMode, RunSummary, Simulation};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of a command, as seen by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Finished without finding a deadlock
    Clean,
    /// A deadlock remained in the final state
    Deadlock,
    /// The command could not complete
    Failed,
}

impl Verdict {
    pub fn from_deadlock(found: bool) -> Self {
        if found { Self::Deadlock } else { Self::Clean }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Failed => 1,
            Self::Deadlock => 2,
        }
    }
}

/// Execute a parsed command line against the real filesystem
pub fn execute_command(config: CliConfig) -> Result<Verdict> {
    let session = CommandSession::new(config.app_config);

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            session
                .display()
                .status()
                .message("stalemate - resource allocation tracker and deadlock detector");
            session
                .display()
                .status()
                .subtle("Run 'stalemate --help' for usage information");
            return Ok(Verdict::Clean);
        }
    };

    execute_command_with_session(command, &session)
}

/// Execute a specific command with a provided session
pub fn execute_command_with_session(command: Commands, session: &dyn Session) -> Result<Verdict> {
    debug!(?command, "executing command");

    match command {
        Commands::Run {
            file,
            export,
            export_format,
            stop_on_deadlock,
        } => handle_run(
            session,
            &file,
            export.as_deref(),
            export_format,
            stop_on_deadlock,
        ),
        Commands::Check { file } => handle_check(session, &file),
        Commands::State { file } => handle_state(session, &file),
        Commands::Graph { file } => handle_graph(session, &file),
        Commands::Cases { dir, pick } => handle_cases(session, dir, pick),
        Commands::Version => handle_version(session),
    }
}

fn load_feed(session: &dyn Session, file: &Path) -> Result<(PathBuf, Vec<Operation>)> {
    let path = session.resolve_feed_path(file);
    let operations = session
        .feeds()
        .load(&path)
        .with_context(|| format!("Failed to load feed {}", path.display()))?;
    debug!(path = %path.display(), operations = operations.len(), "feed loaded");
    Ok((path, operations))
}

fn handle_run(
    session: &dyn Session,
    file: &Path,
    export: Option<&Path>,
    export_format: Option<ExportFormat>,
    stop_on_deadlock: bool,
) -> Result<Verdict> {
    let (path, operations) = load_feed(session, file)?;
    let status = session.display().status();

    status.section(&format!("Replaying {}", path.display()));

    let mut simulation = Simulation::new().stop_on_deadlock(stop_on_deadlock);
    let summary = simulation.run(&operations);

    for record in simulation.steps() {
        let line = render::step_summary(record);
        if record.outcome.is_rejected() {
            status.warning(&format!("[{}/{}] {}", record.step, summary.total, line));
        } else {
            status.step(record.step, summary.total, &line);
        }
    }

    let rejected = simulation
        .steps()
        .iter()
        .filter(|record| record.outcome.is_rejected())
        .count();
    if rejected > 0 {
        status.warning(&format!("{rejected} operation(s) rejected"));
    }

    print_tables(session, &simulation);
    print_verdict(session, &summary);

    if let Some(export_path) = export {
        let format = export_format
            .or_else(|| ExportFormat::from_path(export_path))
            .unwrap_or_default();
        export::export_steps(simulation.steps(), export_path, format)
            .with_context(|| format!("Failed to export step log to {}", export_path.display()))?;
        status.success(
            "Exported",
            &format!(
                "{} step(s) to {}",
                simulation.steps().len(),
                export_path.display()
            ),
        );
    }

    Ok(Verdict::from_deadlock(summary.deadlocked()))
}

fn handle_check(session: &dyn Session, file: &Path) -> Result<Verdict> {
    let (_, operations) = load_feed(session, file)?;

    let mut simulation = Simulation::new().with_detection(DetectionMode::OnDemand);
    let summary = simulation.run(&operations);
    print_verdict(session, &summary);

    Ok(Verdict::from_deadlock(summary.deadlocked()))
}

fn handle_state(session: &dyn Session, file: &Path) -> Result<Verdict> {
    let (_, operations) = load_feed(session, file)?;

    let mut simulation = Simulation::new().with_detection(DetectionMode::OnDemand);
    simulation.run(&operations);
    print_tables(session, &simulation);

    Ok(Verdict::Clean)
}

fn handle_graph(session: &dyn Session, file: &Path) -> Result<Verdict> {
    let (_, operations) = load_feed(session, file)?;

    let mut simulation = Simulation::new().with_detection(DetectionMode::OnDemand);
    let summary = simulation.run(&operations);
    let dot = render::to_dot(&simulation.model().snapshot(), &summary.report);
    print!("{dot}");

    Ok(Verdict::Clean)
}

fn handle_cases(session: &dyn Session, dir: Option<PathBuf>, pick: bool) -> Result<Verdict> {
    let dir = dir.unwrap_or_else(|| session.config().input_dir.clone());
    let cases = session
        .feeds()
        .list(&dir)
        .with_context(|| format!("Failed to list feeds in {}", dir.display()))?;

    if cases.is_empty() {
        session
            .display()
            .status()
            .warning(&format!("No feed files in {}", dir.display()));
        return Ok(Verdict::Clean);
    }

    let names: Vec<String> = cases.iter().map(|path| case_name(path)).collect();

    if !pick {
        session
            .display()
            .status()
            .section(&format!("Cases in {}", dir.display()));
        let items: Vec<&str> = names.iter().map(String::as_str).collect();
        session.display().structured().numbered_list(&items);
        return Ok(Verdict::Clean);
    }

    if !InteractiveDisplay::is_interactive() {
        bail!("--pick needs an interactive terminal");
    }

    let selection = session
        .display()
        .prompt()
        .select("Choose a case to run")
        .options(&names)
        .default(0)
        .interact_opt()?;

    match selection {
        Some(index) => handle_run(session, &cases[index], None, None, false),
        None => {
            session.display().status().info("No case selected");
            Ok(Verdict::Clean)
        }
    }
}

fn handle_version(session: &dyn Session) -> Result<Verdict> {
    session
        .display()
        .status()
        .message(&format!("stalemate {}", env!("CARGO_PKG_VERSION")));
    Ok(Verdict::Clean)
}

fn case_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_tables(session: &dyn Session, simulation: &Simulation) {
    let snapshot = simulation.model().snapshot();
    let display = session.display();

    display.status().section("Processes");
    display
        .structured()
        .table()
        .header(&render::PROCESS_HEADERS)
        .rows(render::process_rows(&snapshot.processes))
        .render();

    display.status().section("Resources");
    display
        .structured()
        .table()
        .header(&render::RESOURCE_HEADERS)
        .rows(render::resource_rows(&snapshot.resources))
        .render();
}

fn print_verdict(session: &dyn Session, summary: &RunSummary) {
    let status = session.display().status();
    println!();

    if summary.stopped_early {
        status.subtle(&format!(
            "Stopped after step {} of {}",
            summary.applied, summary.total
        ));
    }

    if summary.report.found {
        status.alert(&format!("DEADLOCK DETECTED: {}", summary.report.path()));
        let edges: Vec<String> = summary.report.edges.iter().map(ToString::to_string).collect();
        let items: Vec<&str> = edges.iter().map(String::as_str).collect();
        status.list(&items);
        return;
    }

    status.success("No deadlock detected", "");
    if let Some(step) = summary.first_deadlock_step {
        status.info(&format!(
            "A deadlock first seen at step {step} was resolved by later operations"
        ));
    }
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}

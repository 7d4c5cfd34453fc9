//! # Step Log Export
//!
//! Writes the driver's [`StepRecord`]s as CSV or JSON.
//!
//! CSV columns are
//! `step,process,action,resource,outcome,holding,waiting,allocation,deadlock`
//! where the state columns compress each snapshot into one cell:
//!
//! - `holding`: `P1:R1|R2;P2:`
//! - `waiting`: `P1->R2;P2->`
//! - `allocation`: `R1->P1;R2->`
//! - `deadlock`: `P1 -> P2`, empty when no cycle

use crate::allocation::{ProcessState, ResourceState};
use crate::simulation::StepRecord;
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

pub const CSV_HEADER: &str = "step,process,action,resource,outcome,holding,waiting,allocation,deadlock";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess from a file extension, `None` for anything unrecognised
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

crate::impl_fromstr_for_value_enum!(ExportFormat, "export format");

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write step log to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write step log: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to serialize step log: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `steps` to `path` in the given format, replacing any existing file
pub fn export_steps(
    steps: &[StepRecord],
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => write_csv(steps, &mut writer)?,
        ExportFormat::Json => write_json(steps, &mut writer)?,
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), steps = steps.len(), ?format, "step log exported");
    Ok(())
}

pub fn write_csv<W: Write>(steps: &[StepRecord], mut out: W) -> Result<(), ExportError> {
    writeln!(out, "{CSV_HEADER}")?;
    for record in steps {
        let row = [
            record.step.to_string(),
            record.process.clone(),
            record.action.to_string(),
            record.resource.clone(),
            record.outcome.label().to_string(),
            holding_column(&record.processes),
            waiting_column(&record.processes),
            allocation_column(&record.resources),
            record.deadlock.join(" -> "),
        ];
        let row: Vec<String> = row.iter().map(|field| escape_field(field)).collect();
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}

pub fn write_json<W: Write>(steps: &[StepRecord], mut out: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut out, steps)?;
    writeln!(out)?;
    Ok(())
}

/// `P1:R1|R2;P2:` style cell
///
/// The packed state columns rely on names free of `;`, `|`, `:` and `->`,
/// which the feed loader enforces. Names built through the model API directly
/// are written as-is.
pub fn holding_column(processes: &[ProcessState]) -> String {
    processes
        .iter()
        .map(|p| format!("{}:{}", p.name, p.holding.join("|")))
        .collect::<Vec<_>>()
        .join(";")
}

pub fn waiting_column(processes: &[ProcessState]) -> String {
    processes
        .iter()
        .map(|p| format!("{}->{}", p.name, p.waiting_for.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join(";")
}

pub fn allocation_column(resources: &[ResourceState]) -> String {
    resources
        .iter()
        .map(|r| format!("{}->{}", r.name, r.allocated_to.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join(";")
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}

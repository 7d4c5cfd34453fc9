//! CSV operation-log loader

use super::{Action, Operation};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

const REQUIRED_COLUMNS: [&str; 3] = ["process", "action", "resource"];

/// Separators of the packed state columns in the CSV step log
pub const RESERVED_IN_NAMES: [&str; 4] = [";", "|", ":", "->"];

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to read feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Feed is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Invalid action '{action}' on line {line}, expected request, hold or release")]
    InvalidAction { line: usize, action: String },

    #[error("Name '{name}' on line {line} contains a reserved separator (; | : ->)")]
    ReservedName { line: usize, name: String },

    #[error("Unterminated quoted field on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("Feed contains no operations")]
    Empty,
}

/// Read and parse a feed file
pub fn load_operations(path: &Path) -> Result<Vec<Operation>, FeedError> {
    let text = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let operations = parse_operations(&text)?;
    debug!(path = %path.display(), count = operations.len(), "feed loaded");
    Ok(operations)
}

/// Parse feed text into operations, in file order
pub fn parse_operations(text: &str) -> Result<Vec<Operation>, FeedError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_line, header)) = lines.next() else {
        return Err(FeedError::Empty);
    };
    let columns = Columns::locate(&split_record(header, header_line)?)?;

    let mut operations = Vec::new();
    for (line, raw) in lines {
        let fields = split_record(raw, line)?;
        let process = columns.field(&fields, columns.process);
        let action = columns.field(&fields, columns.action).to_lowercase();
        let resource = columns.field(&fields, columns.resource);

        if process.is_empty() || action.is_empty() || resource.is_empty() {
            trace!(line, "skipping incomplete row");
            continue;
        }
        if process.starts_with('#') {
            trace!(line, "skipping comment row");
            continue;
        }

        let action: Action = action
            .parse()
            .map_err(|_| FeedError::InvalidAction { line, action })?;

        for name in [process, resource] {
            if is_reserved_name(name) {
                return Err(FeedError::ReservedName {
                    line,
                    name: name.to_string(),
                });
            }
        }

        operations.push(Operation {
            process: process.to_string(),
            action,
            resource: resource.to_string(),
            line,
        });
    }

    if operations.is_empty() {
        return Err(FeedError::Empty);
    }
    Ok(operations)
}

/// Whether `name` would make the packed step-log columns ambiguous
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_IN_NAMES.iter().any(|sep| name.contains(sep))
}

/// Positions of the required columns in the header
#[derive(Debug, Clone, Copy)]
struct Columns {
    process: usize,
    action: usize,
    resource: usize,
}

impl Columns {
    fn locate(header: &[String]) -> Result<Self, FeedError> {
        let position = |name: &str| {
            header
                .iter()
                .position(|column| column.trim().eq_ignore_ascii_case(name))
        };

        let found: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|c| position(c)).collect();
        match found.as_slice() {
            [Some(process), Some(action), Some(resource)] => Ok(Self {
                process: *process,
                action: *action,
                resource: *resource,
            }),
            _ => Err(FeedError::MissingColumns {
                missing: REQUIRED_COLUMNS
                    .iter()
                    .zip(&found)
                    .filter(|(_, pos)| pos.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect(),
            }),
        }
    }

    /// Trimmed field at `idx`, empty when the row is short
    fn field<'a>(&self, fields: &'a [String], idx: usize) -> &'a str {
        fields.get(idx).map(|f| f.trim()).unwrap_or("")
    }
}

/// Split one CSV record into fields
///
/// Fields may be wrapped in double quotes, inside which commas are literal
/// and `""` stands for one quote. A record must fit on one line.
fn split_record(line: &str, line_no: usize) -> Result<Vec<String>, FeedError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            ('"', false) if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            (',', false) => fields.push(std::mem::take(&mut current)),
            (other, _) => current.push(other),
        }
    }

    if in_quotes {
        return Err(FeedError::UnterminatedQuote { line: line_no });
    }
    fields.push(current);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}

//! # Operation Feed
//!
//! Operation records and the CSV loader that produces them.
//!
//! A feed is a header row naming at least the `process`, `action` and
//! `resource` columns, followed by one operation per line:
//!
//! ```text
//! process,action,resource
//! P1,request,R1
//! P2,hold,R2
//! # comment rows start with '#'
//! P1,release,R1
//! ```

pub mod loader;

pub use loader::{FeedError, load_operations, parse_operations};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// What a feed row asks the allocation model to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Request,
    /// Synonym of `Request`, kept so the step log echoes the feed
    Hold,
    Release,
}

impl Action {
    /// True for the actions that ask for a resource
    pub fn is_acquire(self) -> bool {
        matches!(self, Self::Request | Self::Hold)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Hold => "hold",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised action text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}', expected request, hold or release")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "request" => Ok(Self::Request),
            "hold" => Ok(Self::Hold),
            "release" => Ok(Self::Release),
            _ => Err(UnknownAction(s.to_string())),
        }
    }
}

/// One row of the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub process: String,
    pub action: Action,
    pub resource: String,
    /// 1-based line in the source file, header included
    #[serde(skip)]
    pub line: usize,
}

impl Operation {
    pub fn new(process: impl Into<String>, action: Action, resource: impl Into<String>) -> Self {
        Self {
            process: process.into(),
            action,
            resource: resource.into(),
            line: 0,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.process, self.action, self.resource)
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}

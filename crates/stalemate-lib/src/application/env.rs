//! Standard environment variables that affect color output
//!
//! These are the cross-tool conventions (`NO_COLOR`, `FORCE_COLOR`,
//! `CLICOLOR`, `CI`), not the `STALEMATE_*` settings, which clap reads.

use crate::primitives::{ConfigError, TerminalCapsDetectIntent};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnvironmentConfig {
    /// Any non-empty value disables color
    pub no_color: Option<String>,
    /// `0`/`false` disables, `1`/`2`/`3`/`true` forces color
    pub force_color: Option<String>,
    /// `0` disables color
    pub clicolor: Option<String>,
    /// Any value means a CI run
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    pub fn load() -> Result<Self, ConfigError> {
        envy::from_env().map_err(|source| ConfigError::EnvironmentParsingFailed { source })
    }

    /// Build from explicit `(NAME, value)` pairs instead of the process environment
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        envy::from_iter(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
        .map_err(|source| ConfigError::EnvironmentParsingFailed { source })
    }

    pub fn is_ci(&self) -> bool {
        self.ci.is_some()
    }

    /// Apply the variables to a color intent
    ///
    /// CI forces `Never` outright. Otherwise later rules win:
    /// `CLICOLOR=0`, then `NO_COLOR`, then `FORCE_COLOR`.
    pub fn apply_color_config(
        &self,
        mut color: TerminalCapsDetectIntent,
    ) -> TerminalCapsDetectIntent {
        if self.is_ci() {
            return TerminalCapsDetectIntent::Never;
        }

        if self.clicolor.as_deref() == Some("0") {
            color = TerminalCapsDetectIntent::Never;
        }

        if self.no_color.as_deref().is_some_and(|v| !v.is_empty()) {
            color = TerminalCapsDetectIntent::Never;
        }

        match self.force_color.as_deref() {
            Some("0" | "false") => color = TerminalCapsDetectIntent::Never,
            Some("1" | "2" | "3" | "true") => color = TerminalCapsDetectIntent::Always,
            _ => {}
        }

        color
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}

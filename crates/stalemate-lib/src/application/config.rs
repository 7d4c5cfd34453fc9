//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const INPUT_DIR: &str = "input";
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const TTY_CAPS_DETECT_INTENT: &str = "auto";
}

/// Typed defaults, parsed from [`defaults`]
mod default_fns {
    use super::*;

    pub fn input_dir() -> PathBuf {
        PathBuf::from(defaults::INPUT_DIR)
    }

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap_or(0)
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT.parse().unwrap_or(LogFormat::Text)
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT.parse().unwrap_or(LogOutput::Stderr)
    }

    pub fn tty_caps_detect_intent() -> TerminalCapsDetectIntent {
        defaults::TTY_CAPS_DETECT_INTENT
            .parse()
            .unwrap_or(TerminalCapsDetectIntent::Auto)
    }
}

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Parser, Deserialize)]
pub struct AppConfig {
    /// Directory holding the operation-feed CSV files
    #[arg(short, long, global = true, env = "STALEMATE_INPUT_DIR", default_value = defaults::INPUT_DIR)]
    #[serde(default = "default_fns::input_dir")]
    pub input_dir: PathBuf,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, global = true, env = "STALEMATE_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, global = true, env = "STALEMATE_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, global = true, env = "STALEMATE_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, global = true, env = "STALEMATE_COLOR", default_value = defaults::TTY_CAPS_DETECT_INTENT)]
    #[serde(default = "default_fns::tty_caps_detect_intent")]
    pub color: TerminalCapsDetectIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: default_fns::input_dir(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::tty_caps_detect_intent(),
        }
    }
}

impl AppConfig {
    /// Logger settings; `ansi` comes from the resolved color setting
    pub fn to_logger_config(&self, ansi: bool) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi,
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.input_dir != default_fns::input_dir() {
            self.input_dir = other.input_dir;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, TerminalCapsDetectIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level > 4 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("log level {} is out of range 0..=4", self.log_level),
            });
        }
        if self.input_dir.is_file() {
            return Err(ConfigError::ValidationFailed {
                reason: format!("input directory {} is a file", self.input_dir.display()),
            });
        }

        Ok(())
    }
}

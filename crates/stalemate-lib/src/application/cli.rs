use crate::export::ExportFormat;
use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;
use super::env::EnvironmentConfig;

/// stalemate - resource allocation tracker and deadlock detector
#[derive(Debug, Clone, Parser)]
#[command(name = "stalemate")]
#[command(about = "Replay resource-allocation feeds and detect deadlocks")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Resolved configuration plus the command to run
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    ///
    /// `.env` files are read before argument parsing so their
    /// `STALEMATE_*` entries reach clap.
    pub fn load() -> Result<Self, ConfigError> {
        super::loader::load_env_files()?;
        let cli = Cli::try_parse()?;
        let environment = EnvironmentConfig::load()?;
        Self::resolve(cli, &environment)
    }

    /// Combine parsed arguments with the standard environment variables
    pub fn resolve(cli: Cli, environment: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();
        config.color = environment.apply_color_config(config.color);
        let config = config.merge_with(cli.config);
        config.validate()?;

        Ok(Self {
            app_config: config,
            command: cli.command,
        })
    }
}

/// Available stalemate commands
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Apply a feed step by step and report the final verdict
    Run {
        /// Feed file, looked up in the input directory when not found as given
        file: PathBuf,

        /// Write the per-step log to this file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Step log format, guessed from the export extension when omitted
        #[arg(long, value_enum)]
        export_format: Option<ExportFormat>,

        /// Stop applying operations at the first step that deadlocks
        #[arg(long)]
        stop_on_deadlock: bool,
    },

    /// Apply a feed silently and print only the verdict
    Check { file: PathBuf },

    /// Print the final process and resource tables
    State { file: PathBuf },

    /// Print the final allocation graph in Graphviz DOT
    Graph { file: PathBuf },

    /// List the feed files in the input directory
    Cases {
        /// Directory to list instead of the configured input directory
        dir: Option<PathBuf>,

        /// Choose a case interactively and run it
        #[arg(long)]
        pick: bool,
    },

    /// Show version information
    Version,
}

impl Commands {
    /// Feed file the command replays, if any
    pub fn feed_file(&self) -> Option<&PathBuf> {
        match self {
            Commands::Run { file, .. }
            | Commands::Check { file }
            | Commands::State { file }
            | Commands::Graph { file } => Some(file),
            Commands::Cases { .. } | Commands::Version => None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}

//! # stalemate Library
//!
//! Resource-allocation tracking and deadlock detection.
//!
//! ## Core Modules
//!
//! - [`allocation`] - Processes, resources, and who holds or waits for what
//! - [`detector`] - Wait-for graph and cycle search
//! - [`feed`] - CSV operation feeds
//! - [`simulation`] - Step-by-step replay of a feed with per-step verdicts
//! - [`export`] - Step log export (CSV, JSON)
//! - [`render`] - Table rows, step summaries, and Graphviz output
//! - [`display`] - Terminal output for users
//! - [`logger`] - Structured logging through `tracing`
//! - [`primitives`] - Foundation types and errors
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```
//! use stalemate_lib::{AllocationModel, detect_deadlock};
//!
//! let mut model = AllocationModel::new();
//! for name in ["P1", "P2"] {
//!     model.create_process(name).unwrap();
//! }
//! for name in ["R1", "R2"] {
//!     model.create_resource(name).unwrap();
//! }
//! model.request_resource("P1", "R1").unwrap();
//! model.request_resource("P2", "R2").unwrap();
//! model.request_resource("P1", "R2").unwrap();
//! model.request_resource("P2", "R1").unwrap();
//!
//! let report = detect_deadlock(&model);
//! assert!(report.found);
//! assert_eq!(report.path(), "P1 -> P2 -> P1");
//! ```

pub mod allocation;
pub mod application;
pub mod detector;
pub mod display;
pub mod export;
pub mod feed;
pub mod logger;
pub mod primitives;
pub mod render;
pub mod simulation;

// Re-export commonly used types for convenience
pub use allocation::{AllocationError, AllocationModel};
pub use application::{AppConfig, Cli, Commands, Verdict, execute_command};
pub use detector::{DeadlockReport, WaitEdge, detect_deadlock, find_all_cycles};
pub use feed::{Action, Operation};
pub use logger::Logger;
pub use primitives::{
    ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, TerminalCapsDetectIntent,
};
pub use simulation::{DetectionMode, Simulation};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

/// Parse the command line, set up logging, and run the command
pub fn main() -> Result<Verdict> {
    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(ConfigError::ArgumentParsing { source }) => {
            // --help and --version arrive here too
            source.print()?;
            return Ok(if source.use_stderr() {
                Verdict::Failed
            } else {
                Verdict::Clean
            });
        }
        Err(e) => return Err(e.into()),
    };

    let logger_config = config
        .app_config
        .to_logger_config(config.app_config.color.resolve());
    match Logger::init(logger_config) {
        Ok(_) | Err(LoggerError::AlreadyInitialized) => {}
        Err(e) => return Err(e.into()),
    }

    execute_command(config)
}

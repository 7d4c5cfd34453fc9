//! Application layer modules
//!
//! Organizes CLI interface, configuration management, command sessions and
//! the command handlers.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;
pub mod session;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig, Commands};
pub use commands::{Verdict, execute_command, execute_command_with_session};
pub use config::AppConfig;
pub use loader::*;
pub use session::{CommandSession, FeedProvider, LiveFeedProvider, Session};
#[cfg(any(test, feature = "test-utils"))]
pub use session::MemoryFeedProvider;

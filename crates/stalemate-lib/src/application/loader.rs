//! Configuration file loading
//!
//! `.env.local` and `.env` are read into the process environment before
//! arguments are parsed, so `STALEMATE_*` entries in them act like real
//! environment variables. Variables already set are never overwritten.

use crate::primitives::ConfigError;
use std::path::Path;

/// Env files in load order; the first one to define a variable wins
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load the env files from the working directory
pub fn load_env_files() -> Result<(), ConfigError> {
    load_env_files_from(Path::new("."))
}

/// Load the env files from `dir`, skipping those that do not exist
pub fn load_env_files_from(dir: &Path) -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        let path = dir.join(env_file);
        match dotenvy::from_path(&path) {
            Ok(()) => tracing::debug!(file = %path.display(), "loaded env file"),
            Err(e) if e.not_found() => {}
            Err(source) => {
                return Err(ConfigError::EnvFileError {
                    file: path.display().to_string(),
                    source,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}

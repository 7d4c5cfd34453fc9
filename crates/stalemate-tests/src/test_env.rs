//! Hermetic test environment for E2E testing
//!
//! A [`TestEnvironment`] owns a temporary directory with an `input/` folder
//! for feeds and hands out sessions that read from it.

use crate::fixtures::Scenario;
use anyhow::Result;
use stalemate_lib::application::config::AppConfig;
use stalemate_lib::application::session::{CommandSession, LiveFeedProvider};
use stalemate_lib::display::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnvironment {
    /// Removed on drop
    pub temp_dir: TempDir,
    /// Directory the sessions use as their input directory
    pub input_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let input_path = temp_dir.path().join("input");
        fs::create_dir_all(&input_path)?;

        Ok(Self {
            temp_dir,
            input_path,
        })
    }

    /// Environment with every given scenario written to the input directory
    pub fn with_scenarios(scenarios: &[Scenario]) -> Result<Self> {
        let env = Self::new()?;
        for scenario in scenarios {
            env.write_scenario(scenario)?;
        }
        Ok(env)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a feed into the input directory and return its path
    pub fn write_feed(&self, file_name: &str, csv: &str) -> Result<PathBuf> {
        let path = self.input_path.join(file_name);
        fs::write(&path, csv)?;
        Ok(path)
    }

    pub fn write_scenario(&self, scenario: &Scenario) -> Result<PathBuf> {
        self.write_feed(&scenario.file_name(), scenario.csv)
    }

    /// Path for an output file under the environment root
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.root().join(file_name)
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            input_dir: self.input_path.clone(),
            ..AppConfig::default()
        }
    }

    /// Session over the real filesystem with plain output
    pub fn session(&self) -> CommandSession<LiveFeedProvider> {
        CommandSession::with_providers(self.app_config(), Display::plain(), LiveFeedProvider)
    }
}

//! Command session
//!
//! Each command execution creates a session that owns the resolved
//! configuration, the display, and the source of feed files. Handlers only
//! see the [`Session`] trait, so tests can swap the feed source.

use crate::application::config::AppConfig;
use crate::display::Display;
use crate::feed::{self, FeedError, Operation};
use std::io;
use std::path::{Path, PathBuf};

/// Where feed files come from
pub trait FeedProvider {
    /// Whether a feed exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Read and parse the feed at `path`
    fn load(&self, path: &Path) -> Result<Vec<Operation>, FeedError>;

    /// Feed files directly inside `dir`, sorted by name
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Feeds read from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveFeedProvider;

impl FeedProvider for LiveFeedProvider {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path) -> Result<Vec<Operation>, FeedError> {
        feed::load_operations(path)
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut cases = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_feed_file(&path) {
                cases.push(path);
            }
        }
        cases.sort();
        Ok(cases)
    }
}

/// Feeds held in memory, keyed by path
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Default)]
pub struct MemoryFeedProvider {
    feeds: std::collections::HashMap<PathBuf, String>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MemoryFeedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.feeds.insert(path.into(), text.into());
        self
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl FeedProvider for MemoryFeedProvider {
    fn exists(&self, path: &Path) -> bool {
        self.feeds.contains_key(path)
    }

    fn load(&self, path: &Path) -> Result<Vec<Operation>, FeedError> {
        match self.feeds.get(path) {
            Some(text) => feed::parse_operations(text),
            None => Err(FeedError::Io {
                path: path.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        }
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut cases: Vec<PathBuf> = self
            .feeds
            .keys()
            .filter(|path| path.parent() == Some(dir) && is_feed_file(path))
            .cloned()
            .collect();
        cases.sort();
        Ok(cases)
    }
}

/// `.csv` files, matched case-insensitively
pub fn is_feed_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// What command handlers can reach
pub trait Session {
    fn config(&self) -> &AppConfig;
    fn display(&self) -> &Display;
    fn feeds(&self) -> &dyn FeedProvider;

    /// Path of a feed: as given when it exists, else under the input directory
    fn resolve_feed_path(&self, file: &Path) -> PathBuf {
        if self.feeds().exists(file) || file.is_absolute() {
            return file.to_path_buf();
        }

        let candidate = self.config().input_dir.join(file);
        if self.feeds().exists(&candidate) {
            candidate
        } else {
            file.to_path_buf()
        }
    }
}

/// Session for one command execution
#[derive(Debug, Clone)]
pub struct CommandSession<F: FeedProvider = LiveFeedProvider> {
    config: AppConfig,
    display: Display,
    feeds: F,
}

impl CommandSession<LiveFeedProvider> {
    /// Session over real files, with a display matching the color setting
    pub fn new(config: AppConfig) -> Self {
        let display = Display::detect(config.color);
        Self::with_providers(config, display, LiveFeedProvider)
    }
}

impl<F: FeedProvider> CommandSession<F> {
    pub fn with_providers(config: AppConfig, display: Display, feeds: F) -> Self {
        Self {
            config,
            display,
            feeds,
        }
    }
}

impl<F: FeedProvider> Session for CommandSession<F> {
    fn config(&self) -> &AppConfig {
        &self.config
    }

    fn display(&self) -> &Display {
        &self.display
    }

    fn feeds(&self) -> &dyn FeedProvider {
        &self.feeds
    }
}

#[cfg(test)]
mod tests {
    include!("session.test.rs");
}

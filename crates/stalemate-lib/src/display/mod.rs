//! Terminal display system
//!
//! User-facing output (status lines, tables, prompts), kept apart from
//! logging, which goes through `tracing`. A [`Display`] is built once from the
//! resolved color setting and handed to command handlers.

use crate::primitives::TerminalCapsDetectIntent;
use console::Term;

pub mod interactive;
pub mod status;
pub mod structured;
pub mod styling;

pub use styling::StyleManager;

/// Entry point to every display facility
#[derive(Debug, Clone)]
pub struct Display {
    styling: StyleManager,
}

impl Display {
    pub fn new(styling: StyleManager) -> Self {
        Self { styling }
    }

    /// Resolve color and Unicode support for stdout
    pub fn detect(color: TerminalCapsDetectIntent) -> Self {
        let color = color.resolve();
        let unicode = Term::stdout().features().wants_emoji();
        Self::new(StyleManager::new(color, unicode))
    }

    /// No color, ASCII symbols
    pub fn plain() -> Self {
        Self::new(StyleManager::plain())
    }

    pub fn status(&self) -> status::StatusDisplay<'_> {
        status::StatusDisplay::new(&self.styling)
    }

    pub fn structured(&self) -> structured::StructuredDisplay<'_> {
        structured::StructuredDisplay::new(&self.styling)
    }

    pub fn prompt(&self) -> interactive::InteractiveDisplay {
        interactive::InteractiveDisplay::new(&self.styling)
    }

    pub fn styling(&self) -> &StyleManager {
        &self.styling
    }
}

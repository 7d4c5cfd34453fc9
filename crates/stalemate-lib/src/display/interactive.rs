//! Interactive selection prompts
//!
//! Thin builders over `dialoguer`, themed from the resolved color setting.

use super::styling::StyleManager;
use anyhow::Result;
use dialoguer::{
    Select,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};
use std::io::{self, IsTerminal};

/// Interactive display manager for prompts and selections
pub struct InteractiveDisplay {
    theme: Box<dyn Theme>,
}

impl InteractiveDisplay {
    pub(crate) fn new(styling: &StyleManager) -> Self {
        let theme: Box<dyn Theme> = if styling.color_enabled() {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        };

        Self { theme }
    }

    pub fn select(&self, message: &str) -> SelectPrompt<'_> {
        SelectPrompt::new(message, &*self.theme)
    }

    /// True when stdin and stderr are both terminals
    pub fn is_interactive() -> bool {
        io::stdin().is_terminal() && io::stderr().is_terminal()
    }
}

/// Selection prompt builder
pub struct SelectPrompt<'a> {
    select: Select<'a>,
    options: Vec<String>,
}

impl<'a> SelectPrompt<'a> {
    fn new(message: &str, theme: &'a dyn Theme) -> Self {
        let select = Select::with_theme(theme).with_prompt(message);

        Self {
            select,
            options: Vec::new(),
        }
    }

    pub fn options(mut self, options: &[String]) -> Self {
        self.options = options.to_vec();
        for option in &self.options {
            self.select = self.select.item(option);
        }
        self
    }

    pub fn default(mut self, index: usize) -> Self {
        self.select = self.select.default(index);
        self
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Show the prompt; `None` when the user cancels with Esc or `q`
    pub fn interact_opt(self) -> Result<Option<usize>> {
        Ok(self.select.interact_opt()?)
    }
}

#[cfg(test)]
mod tests {
    include!("interactive.test.rs");
}

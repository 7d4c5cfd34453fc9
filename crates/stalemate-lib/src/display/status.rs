//! Status lines for user feedback
//!
//! Every method has a `format_*`-style counterpart on [`StyleManager`];
//! this type only adds the printing.

use super::styling::StyleManager;

/// Status display manager for semantic user feedback
pub struct StatusDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> StatusDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    /// `✓ item: details`
    pub fn success(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_success(&join_details(item, details)));
    }

    /// `✗ item: details`
    pub fn error(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_error(&join_details(item, details)));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.styling.format_warning(message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.styling.format_info(message));
    }

    /// Plain line without a symbol
    pub fn message(&self, text: &str) {
        println!("{}", text);
    }

    pub fn emphasis(&self, text: &str) {
        println!("{}", self.styling.style_emphasis(text));
    }

    pub fn subtle(&self, text: &str) {
        println!("{}", self.styling.style_subtle(text));
    }

    /// Bulleted list
    pub fn list(&self, items: &[&str]) {
        for item in items {
            println!("  {} {}", self.styling.bullet(), item);
        }
    }

    /// Blank line followed by a bold title
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", self.styling.style_emphasis(title));
    }

    /// `[3/7] description`
    pub fn step(&self, current: usize, total: usize, description: &str) {
        println!("{} {}", self.styling.style_subtle(&step_prefix(current, total)), description);
    }

    /// Deadlock verdict line
    pub fn alert(&self, message: &str) {
        println!(
            "{} {}",
            self.styling.style_alert(self.styling.symbols().cross),
            self.styling.style_alert(message)
        );
    }
}

fn join_details(item: &str, details: &str) -> String {
    if details.is_empty() {
        item.to_string()
    } else {
        format!("{}: {}", item, details)
    }
}

fn step_prefix(current: usize, total: usize) -> String {
    format!("[{}/{}]", current, total)
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}

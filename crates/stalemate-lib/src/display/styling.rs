//! Semantic styling on top of `console::Style`
//!
//! Styling is forced on or off from the resolved color setting rather than
//! left to `console`'s own detection, so output is reproducible in tests.

use console::Style;

/// Symbols for terminals with and without Unicode support
#[derive(Debug, Clone, Copy)]
pub struct Symbols {
    pub checkmark: &'static str,
    pub cross: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub arrow: &'static str,
    pub bullet: &'static str,
}

impl Symbols {
    pub const UNICODE: Self = Self {
        checkmark: "✓",
        cross: "✗",
        warning: "⚠",
        info: "·",
        arrow: "→",
        bullet: "•",
    };

    pub const ASCII: Self = Self {
        checkmark: "+",
        cross: "x",
        warning: "!",
        info: "-",
        arrow: ">",
        bullet: "*",
    };
}

/// Semantic color scheme and symbol set
#[derive(Debug, Clone)]
pub struct StyleManager {
    color: bool,
    symbols: Symbols,
}

impl StyleManager {
    pub fn new(color: bool, unicode: bool) -> Self {
        Self {
            color,
            symbols: if unicode {
                Symbols::UNICODE
            } else {
                Symbols::ASCII
            },
        }
    }

    /// No color, ASCII symbols
    pub fn plain() -> Self {
        Self::new(false, false)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    fn apply(&self, style: Style, text: &str) -> String {
        style.force_styling(self.color).apply_to(text).to_string()
    }

    pub fn style_success(&self, text: &str) -> String {
        self.apply(Style::new().green(), text)
    }

    pub fn style_error(&self, text: &str) -> String {
        self.apply(Style::new().red(), text)
    }

    pub fn style_warning(&self, text: &str) -> String {
        self.apply(Style::new().yellow(), text)
    }

    pub fn style_info(&self, text: &str) -> String {
        self.apply(Style::new().cyan(), text)
    }

    pub fn style_emphasis(&self, text: &str) -> String {
        self.apply(Style::new().bold(), text)
    }

    pub fn style_subtle(&self, text: &str) -> String {
        self.apply(Style::new().dim(), text)
    }

    /// Bold red, for deadlock verdicts
    pub fn style_alert(&self, text: &str) -> String {
        self.apply(Style::new().red().bold(), text)
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} {}", self.style_success(self.symbols.checkmark), message)
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} {}", self.style_error(self.symbols.cross), message)
    }

    pub fn format_warning(&self, message: &str) -> String {
        format!("{} {}", self.style_warning(self.symbols.warning), message)
    }

    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.style_info(self.symbols.info), message)
    }

    pub fn bullet(&self) -> &'static str {
        self.symbols.bullet
    }

    pub fn arrow(&self) -> &'static str {
        self.symbols.arrow
    }
}

//! Structured output (tables, lists)

use super::styling::StyleManager;
use console::{Alignment, measure_text_width, pad_str};

/// Structured display manager for tables and lists
pub struct StructuredDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> StructuredDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    /// Start a table
    ///
    /// ```ignore
    /// display.table()
    ///     .header(&["Process", "Holding", "Waiting for"])
    ///     .row(vec!["P1".into(), "R1".into(), "-".into()])
    ///     .render();
    /// ```
    pub fn table(&self) -> TableDisplay<'a> {
        TableDisplay::new(self.styling)
    }

    /// Aligned `key | value` pairs
    pub fn pairs(&self, pairs: &[(&str, &str)]) {
        let max_key_len = pairs
            .iter()
            .map(|(key, _)| measure_text_width(key))
            .max()
            .unwrap_or(0);

        for (key, value) in pairs {
            let key = pad_str(key, max_key_len, Alignment::Left, None);
            println!("{} | {}", self.styling.style_subtle(&key), value);
        }
    }

    pub fn numbered_list(&self, items: &[&str]) {
        for (i, item) in items.iter().enumerate() {
            println!("{}. {}", self.styling.style_subtle(&(i + 1).to_string()), item);
        }
    }
}

/// Table display builder
pub struct TableDisplay<'a> {
    styling: &'a StyleManager,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl<'a> TableDisplay<'a> {
    fn new(styling: &'a StyleManager) -> Self {
        Self {
            styling,
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn header(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<String>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Table as lines, header and separator first
    pub fn to_lines(&self) -> Vec<String> {
        let num_cols = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        if num_cols == 0 {
            return Vec::new();
        }

        let mut widths = vec![0; num_cols];
        for row in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(measure_text_width(cell));
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        if !self.headers.is_empty() {
            lines.push(self.format_row(&self.headers, &widths, true));
            let separator = widths
                .iter()
                .map(|&w| "-".repeat(w))
                .collect::<Vec<_>>()
                .join("-+-");
            lines.push(self.styling.style_subtle(&separator));
        }
        for row in &self.rows {
            lines.push(self.format_row(row, &widths, false));
        }
        lines
    }

    pub fn render(self) {
        for line in self.to_lines() {
            println!("{}", line);
        }
    }

    fn format_row(&self, cells: &[String], widths: &[usize], is_header: bool) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| {
                let padded = pad_str(cell, width, Alignment::Left, None);
                if is_header {
                    self.styling.style_emphasis(&padded)
                } else {
                    padded.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    include!("structured.test.rs");
}

//! Key hints bar.
//!
//! Builds the `key description · key description` line shown under the
//! template.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// A single key hint (key + description).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// The key or key combination
    pub key: String,
    /// Description of what the key does
    pub description: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }

    fn width(&self) -> usize {
        self.key.width() + 1 + self.description.width()
    }
}

impl<'a, 'b> From<(&'a str, &'b str)> for KeyHint {
    fn from((key, desc): (&'a str, &'b str)) -> Self {
        Self::new(key, desc)
    }
}

/// Drawn between two hints.
pub const SEPARATOR: &str = " · ";

/// A horizontal bar of key hints.
///
/// Renders as `Enter select · Esc cancel · ↑↓ navigate`.
#[derive(Debug, Clone)]
pub struct KeyHintsBar {
    hints: Vec<KeyHint>,
    key_style: Style,
    desc_style: Style,
}

impl KeyHintsBar {
    /// Create a new key hints bar.
    pub fn new() -> Self {
        Self {
            hints: Vec::new(),
            key_style: Style::default(),
            desc_style: Style::default(),
        }
    }

    /// Add a hint.
    pub fn hint(mut self, key: impl Into<String>, description: impl Into<String>) -> Self {
        self.hints.push(KeyHint::new(key, description));
        self
    }

    /// Add multiple hints.
    pub fn hints(mut self, hints: impl IntoIterator<Item = KeyHint>) -> Self {
        self.hints.extend(hints);
        self
    }

    /// Set the styles for keys and descriptions.
    pub fn styles(mut self, key_style: Style, desc_style: Style) -> Self {
        self.key_style = key_style;
        self.desc_style = desc_style;
        self
    }

    /// Total width needed for all hints.
    pub fn total_width(&self) -> usize {
        self.hints
            .iter()
            .enumerate()
            .map(|(i, hint)| {
                let sep = if i > 0 { SEPARATOR.width() } else { 0 };
                sep + hint.width()
            })
            .sum()
    }

    /// Hints that fit within the given width, in order.
    fn hints_that_fit(&self, max_width: usize) -> Vec<&KeyHint> {
        let mut result = Vec::new();
        let mut current_width = 0;

        for hint in &self.hints {
            let needed = if result.is_empty() {
                hint.width()
            } else {
                SEPARATOR.width() + hint.width()
            };

            if current_width + needed <= max_width {
                result.push(hint);
                current_width += needed;
            }
        }

        result
    }

    /// Build the styled line, dropping hints that do not fit `max_width`.
    pub fn to_line(&self, max_width: Option<usize>) -> Line<'static> {
        let hints = match max_width {
            Some(width) => self.hints_that_fit(width),
            None => self.hints.iter().collect(),
        };

        let mut spans = Vec::with_capacity(hints.len() * 4);
        for (i, hint) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, self.desc_style));
            }
            spans.push(Span::styled(hint.key.clone(), self.key_style));
            spans.push(Span::styled(" ", self.desc_style));
            spans.push(Span::styled(hint.description.clone(), self.desc_style));
        }
        Line::from(spans)
    }
}

impl Default for KeyHintsBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_hint_from_tuple() {
        let hint: KeyHint = ("Esc", "cancel").into();
        assert_eq!(hint.key, "Esc");
        assert_eq!(hint.description, "cancel");
    }

    #[test]
    fn test_total_width() {
        let bar = KeyHintsBar::new().hint("Enter", "save").hint("Esc", "cancel");
        // "Enter save" + " · " + "Esc cancel"
        assert_eq!(bar.total_width(), 10 + 3 + 10);
    }

    #[test]
    fn test_to_line_joins_hints() {
        let bar = KeyHintsBar::new().hint("Enter", "save").hint("Esc", "cancel");
        assert_eq!(bar.to_line(None).to_string(), "Enter save · Esc cancel");
    }

    #[test]
    fn test_narrow_width_drops_hints() {
        let bar = KeyHintsBar::new()
            .hint("Enter", "select")
            .hint("Esc", "cancel")
            .hint("Tab", "next");

        let line = bar.to_line(Some(20));
        assert_eq!(line.to_string(), "Enter select");
    }
}

//! Context-sensitive help line.

use std::fmt;

use ratatui::text::{Line, Span};

use crate::config::KeyBinding;
use crate::field::Field;
use crate::key_hints::{KeyHint, KeyHintsBar};
use crate::state::Mode;
use crate::theme::Theme;

/// Instructions for the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpText {
    /// Names the field being edited or selected
    pub context: Option<String>,
    pub hints: Vec<KeyHint>,
}

impl HelpText {
    /// Styled help line.
    pub fn to_line(&self, theme: &Theme) -> Line<'static> {
        let bar = KeyHintsBar::new()
            .hints(self.hints.iter().cloned())
            .styles(theme.key_label, theme.help_text);

        let mut spans = Vec::new();
        if let Some(context) = &self.context {
            spans.push(Span::styled(format!("{}: ", context), theme.help_text));
        }
        spans.extend(bar.to_line(None).spans);
        Line::from(spans)
    }
}

impl fmt::Display for HelpText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_line(&Theme::plain()))
    }
}

/// Compose the help text for a mode.
pub fn compose_help(mode: &Mode, fields: &[Field], submit: &KeyBinding) -> HelpText {
    let label = |index: usize| {
        fields
            .get(index)
            .map(|f| f.label.clone())
            .unwrap_or_default()
    };

    match mode {
        Mode::Navigating => HelpText {
            context: None,
            hints: vec![
                KeyHint::new("Enter", "edit/select"),
                KeyHint::new("↑↓", "navigate"),
                KeyHint::new("Tab", "next field"),
                KeyHint::new(submit.to_string(), "submit"),
            ],
        },
        Mode::EditingText { field, .. } => HelpText {
            context: Some(format!("Editing {}", label(*field))),
            hints: vec![KeyHint::new("Enter", "save"), KeyHint::new("Esc", "cancel")],
        },
        Mode::SelectingOption { field, .. } => HelpText {
            context: Some(format!("Selecting {}", label(*field))),
            hints: vec![
                KeyHint::new("↑↓", "navigate options"),
                KeyHint::new("Enter", "select"),
                KeyHint::new("Esc", "cancel"),
            ],
        },
    }
}

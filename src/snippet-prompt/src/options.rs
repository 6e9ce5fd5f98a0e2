//! Option normalization for select fields.

use serde::{Deserialize, Serialize};

/// A raw option as declared by the caller.
///
/// Deserializes from either a bare string or a `{ name, value }` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionSpec {
    /// Display name and stored value are the same string
    Label(String),
    /// Explicit display name and stored value
    Pair { name: String, value: String },
}

impl OptionSpec {
    /// Create an option whose stored value differs from its display name.
    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        OptionSpec::Pair {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for OptionSpec {
    fn from(label: &str) -> Self {
        OptionSpec::Label(label.to_string())
    }
}

impl From<String> for OptionSpec {
    fn from(label: String) -> Self {
        OptionSpec::Label(label)
    }
}

impl From<(&str, &str)> for OptionSpec {
    fn from((name, value): (&str, &str)) -> Self {
        OptionSpec::pair(name, value)
    }
}

/// A normalized option: what is shown and what gets stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Display name
    pub name: String,
    /// Stored value
    pub value: String,
}

/// Convert raw options into ordered `(name, value)` choices.
///
/// Order is preserved and duplicates are kept.
pub fn normalize_options(options: &[OptionSpec]) -> Vec<Choice> {
    options
        .iter()
        .map(|option| match option {
            OptionSpec::Label(label) => Choice {
                name: label.clone(),
                value: label.clone(),
            },
            OptionSpec::Pair { name, value } => Choice {
                name: name.clone(),
                value: value.clone(),
            },
        })
        .collect()
}

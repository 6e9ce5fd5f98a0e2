//! Prompt configuration.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::field::{FieldSpec, ValueMap};
use crate::theme::Theme;
use crate::validation::{Validator, Verdict, validator};

/// A key plus modifiers, e.g. Ctrl+S.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Control plus a letter.
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Whether the event is this binding. Letters match case-insensitively so
    /// Ctrl+Shift+S still counts as Ctrl+S.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let modifiers = key.modifiers.difference(KeyModifiers::SHIFT);
        if modifiers != self.modifiers.difference(KeyModifiers::SHIFT) {
            return false;
        }
        match (self.code, key.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }
}

impl Default for KeyBinding {
    fn default() -> Self {
        Self::ctrl('s')
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            other => write!(f, "{}", other),
        }
    }
}

/// Option rows shown at once while selecting.
pub const DEFAULT_MAX_VISIBLE_OPTIONS: usize = 5;

/// Everything needed to start a snippet prompt.
pub struct PromptConfig {
    /// Header line shown above the template
    pub message: String,
    /// Template with `{{field}}` placeholders
    pub template: String,
    pub fields: Vec<FieldSpec>,
    /// Optional check run on submit
    pub validate: Option<Validator>,
    pub theme: Theme,
    /// Key that submits the form
    pub submit: KeyBinding,
    /// Option rows drawn at once; longer lists scroll with the selection
    pub max_visible_options: usize,
}

impl PromptConfig {
    pub fn new(message: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            template: template.into(),
            fields: Vec::new(),
            validate: None,
            theme: Theme::default(),
            submit: KeyBinding::default(),
            max_visible_options: DEFAULT_MAX_VISIBLE_OPTIONS,
        }
    }

    /// Add a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Add multiple fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Set the submit validator.
    ///
    /// The closure may return `bool`, a message (`String`/`&str`, empty means
    /// the default error), `Result<(), String>` or a [`Verdict`].
    pub fn validate<F, R>(mut self, f: F) -> Self
    where
        F: Fn(&ValueMap) -> R + 'static,
        R: Into<Verdict>,
    {
        self.validate = Some(validator(f));
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn submit_key(mut self, binding: KeyBinding) -> Self {
        self.submit = binding;
        self
    }

    /// Set how many options are drawn at once (at least one).
    pub fn max_visible_options(mut self, max: usize) -> Self {
        self.max_visible_options = max.max(1);
        self
    }
}

impl fmt::Debug for PromptConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptConfig")
            .field("message", &self.message)
            .field("template", &self.template)
            .field("fields", &self.fields)
            .field("validate", &self.validate.is_some())
            .field("submit", &self.submit)
            .field("max_visible_options", &self.max_visible_options)
            .finish()
    }
}

/// Serializable prompt definition (message, template and fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSpec {
    #[serde(default)]
    pub message: String,
    pub template: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_visible_options: Option<usize>,
}

impl PromptSpec {
    /// Parse a definition written in TOML.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a definition written in JSON.
    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Turn the definition into a config with default theme and no validator.
    pub fn into_config(self) -> PromptConfig {
        let config = PromptConfig::new(self.message, self.template).fields(self.fields);
        match self.max_visible_options {
            Some(max) => config.max_visible_options(max),
            None => config,
        }
    }
}

impl From<PromptSpec> for PromptConfig {
    fn from(spec: PromptSpec) -> Self {
        spec.into_config()
    }
}

//! Field descriptors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::options::{Choice, OptionSpec, normalize_options};

/// Current value of every declared field, in declaration order.
pub type ValueMap = IndexMap<String, String>;

/// A field as declared by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field key; matches `{{name}}` in the template
    pub name: String,
    /// Display label, defaults to the name
    #[serde(default)]
    pub label: Option<String>,
    /// Initial value, defaults to an empty string
    #[serde(default, alias = "initial_value")]
    pub initial: Option<String>,
    /// Informational only; validators decide what "required" means
    #[serde(default)]
    pub required: bool,
    /// Selectable options; empty means free text
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl FieldSpec {
    /// Create a free-text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            initial: None,
            required: false,
            options: Vec::new(),
        }
    }

    /// Create a select field.
    pub fn select<I, O>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OptionSpec>,
    {
        Self::text(name).with_options(options)
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the initial value.
    pub fn with_initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Mark as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Replace the option list.
    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OptionSpec>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Kind of field, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-text input
    Text,
    /// Choice from a non-empty option list
    Select(Vec<Choice>),
}

/// A normalized field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub initial: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl Field {
    /// Normalize a declared field. An empty option list yields a text field.
    pub fn from_spec(spec: &FieldSpec) -> Self {
        let choices = normalize_options(&spec.options);
        let kind = if choices.is_empty() {
            FieldKind::Text
        } else {
            FieldKind::Select(choices)
        };

        Self {
            name: spec.name.clone(),
            label: spec
                .label
                .clone()
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| spec.name.clone()),
            initial: spec.initial.clone().unwrap_or_default(),
            required: spec.required,
            kind,
        }
    }

    /// Options of a select field; `None` for text fields.
    pub fn choices(&self) -> Option<&[Choice]> {
        match &self.kind {
            FieldKind::Select(choices) => Some(choices),
            FieldKind::Text => None,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self.kind, FieldKind::Select(_))
    }

    /// Placeholder token for this field, e.g. `{{env}}`.
    pub fn token(&self) -> String {
        format!("{{{{{}}}}}", self.name)
    }
}

/// Normalize all declared fields. Later duplicates of a name are dropped.
pub fn normalize_fields(specs: &[FieldSpec]) -> Vec<Field> {
    let mut fields: Vec<Field> = Vec::with_capacity(specs.len());
    for spec in specs {
        if fields.iter().any(|f| f.name == spec.name) {
            tracing::warn!("Ignoring duplicate field declaration: {}", spec.name);
            continue;
        }
        fields.push(Field::from_spec(spec));
    }
    fields
}

/// Initial value map: one entry per field.
pub fn initial_values(fields: &[Field]) -> ValueMap {
    fields
        .iter()
        .map(|f| (f.name.clone(), f.initial.clone()))
        .collect()
}

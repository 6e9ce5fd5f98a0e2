//! Interaction state.
//!
//! A single value describing everything the renderer needs. Transitions build
//! a new [`InteractionState`] and replace the old one.

/// Working copy of a text field being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub text: String,
    /// Cursor position in grapheme clusters
    pub cursor: usize,
}

/// What the prompt is currently doing. Field indices point into the field list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Arrow/Tab keys move focus
    #[default]
    Navigating,
    /// A text field is open in the line editor
    EditingText { field: usize, buffer: EditBuffer },
    /// A select field's option list is open
    SelectingOption { field: usize, selection: usize },
}

impl Mode {
    /// Field being edited or selected, if any.
    pub fn field(&self) -> Option<usize> {
        match self {
            Mode::Navigating => None,
            Mode::EditingText { field, .. } | Mode::SelectingOption { field, .. } => Some(*field),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Navigating => "navigating",
            Mode::EditingText { .. } => "editing",
            Mode::SelectingOption { .. } => "selecting",
        }
    }
}

/// Submission status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    /// Validation is running
    Loading,
    /// Values were accepted
    Done,
}

/// Complete interaction state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    /// Focused field
    pub active: usize,
    pub mode: Mode,
    pub status: Status,
    /// Last validation error; stays until the next submit attempt
    pub error: Option<String>,
}

impl InteractionState {
    /// Copy of this state with a different mode.
    pub fn with_mode(&self, mode: Mode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Copy of this state focusing another field.
    pub fn with_active(&self, active: usize) -> Self {
        Self {
            active,
            ..self.clone()
        }
    }

    pub fn is_navigating(&self) -> bool {
        matches!(self.mode, Mode::Navigating)
    }
}

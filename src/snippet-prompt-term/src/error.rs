//! Errors raised while running a prompt on a terminal.

use std::io;

use thiserror::Error;

/// Why a terminal prompt did not produce values.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Terminal setup, drawing or input failed
    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// The user pressed Ctrl+C or Ctrl+D
    #[error("Prompt interrupted")]
    Interrupted,

    /// Input ended before the form was submitted
    #[error("Input closed before the prompt was submitted")]
    InputClosed,
}

impl PromptError {
    /// Whether the user cancelled the prompt.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, PromptError::Interrupted)
    }
}

/// Result type for terminal prompts.
pub type Result<T> = std::result::Result<T, PromptError>;

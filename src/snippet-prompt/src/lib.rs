//! # Snippet Prompt
//!
//! An interactive form laid over a text template. The template contains
//! `{{field}}` placeholders; the user moves between fields, types values or
//! picks them from an option list, and submits the whole form once an
//! optional validator accepts it.
//!
//! This crate holds the terminal-independent core: the state machine, the
//! renderer and the help line. It never touches a real terminal. Hosts feed
//! it [`KeyEvent`](crossterm::event::KeyEvent)s and draw its
//! [`PromptFrame`](frame::PromptFrame); `snippet-prompt-term` does both for a
//! real terminal.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use snippet_prompt::prelude::*;
//!
//! let mut prompt = SnippetPrompt::new(
//!     PromptConfig::new("Create greeting", "Hello {{name}}, welcome to {{team}}!")
//!         .field(FieldSpec::text("name").with_label("Your name"))
//!         .field(FieldSpec::select("team", ["core", "infra"]))
//!         .validate(|values: &ValueMap| !values["name"].is_empty()),
//! );
//!
//! match prompt.handle_key(key_event) {
//!     ComponentResult::Done(values) => { /* submitted */ }
//!     ComponentResult::Handled | ComponentResult::NotHandled => {}
//! }
//!
//! prompt.render(area, buf);
//! ```
//!
//! ## Layout
//!
//! ```text
//! ? Create greeting                          <- header (status + message)
//! Hello Ada, welcome to team!                <- rendered template
//!
//! ❯ core                                     <- options, while selecting
//!   infra
//!
//! Enter edit/select · ↑↓ navigate · ...      <- help line
//! > You must provide a valid value           <- validation error
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod field;
pub mod frame;
pub mod help;
pub mod input;
pub mod key_hints;
pub mod options;
pub mod prompt;
pub mod state;
pub mod template;
pub mod theme;
pub mod validation;

/// Commonly used types and traits for quick imports.
///
/// ```rust,ignore
/// use snippet_prompt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::component::{Component, ComponentResult};
    pub use crate::config::{KeyBinding, PromptConfig, PromptSpec};
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::field::{Field, FieldKind, FieldSpec, ValueMap};
    pub use crate::frame::PromptFrame;
    pub use crate::help::HelpText;
    pub use crate::input::{InputState, LineEditor};
    pub use crate::key_hints::{KeyHint, KeyHintsBar};
    pub use crate::options::{Choice, OptionSpec};
    pub use crate::prompt::SnippetPrompt;
    pub use crate::state::{EditBuffer, InteractionState, Mode, Status};
    pub use crate::theme::{Palette, Theme};
    pub use crate::validation::{Validation, Validator, Verdict};
}

pub use prelude::*;

/// Snippet prompt version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

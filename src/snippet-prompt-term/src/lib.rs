//! # Snippet Prompt Terminal Runtime
//!
//! Runs a [`snippet_prompt::SnippetPrompt`] on a real terminal: raw mode,
//! crossterm key events in, ratatui frames out.
//!
//! ```rust,ignore
//! use snippet_prompt::prelude::*;
//! use snippet_prompt_term::run_snippet_prompt;
//!
//! let values = run_snippet_prompt(
//!     PromptConfig::new("Create branch", "git switch -c {{kind}}/{{topic}}")
//!         .field(FieldSpec::select("kind", ["feat", "fix", "chore"]))
//!         .field(FieldSpec::text("topic")),
//! )?;
//! ```
//!
//! [`runner::drive`] is the loop itself. It only needs a [`KeySource`] and a
//! [`FrameSink`], so it can be driven by scripted input in tests.

pub mod error;
pub mod runner;
pub mod terminal;

pub use error::{PromptError, Result};
pub use runner::{
    CrosstermKeys, FrameSink, KeySource, PromptInput, drive, run_snippet_prompt,
    run_snippet_prompt_with,
};
pub use terminal::{TerminalOptions, TerminalSink};

//! Event loop connecting a [`SnippetPrompt`] to input and output.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use snippet_prompt::component::{Component, ComponentResult};
use snippet_prompt::config::PromptConfig;
use snippet_prompt::field::ValueMap;
use snippet_prompt::frame::PromptFrame;
use snippet_prompt::input::LineEditor;
use snippet_prompt::prompt::SnippetPrompt;

use crate::error::{PromptError, Result};
use crate::terminal::{TerminalOptions, TerminalSink};

/// One decoded input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    Key(KeyEvent),
    /// Bracketed paste
    Paste(String),
    /// Terminal size changed; redraw only
    Resize,
}

impl From<KeyEvent> for PromptInput {
    fn from(key: KeyEvent) -> Self {
        PromptInput::Key(key)
    }
}

/// Where input comes from.
pub trait KeySource {
    /// Block until the next event. `None` means input has ended.
    fn next_input(&mut self) -> io::Result<Option<PromptInput>>;
}

/// Where frames go.
pub trait FrameSink {
    fn draw(&mut self, frame: &PromptFrame) -> io::Result<()>;
}

/// Reads events from the real terminal.
#[derive(Debug, Clone)]
pub struct CrosstermKeys {
    poll_interval: Duration,
}

impl CrosstermKeys {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

impl Default for CrosstermKeys {
    fn default() -> Self {
        Self::new(TerminalOptions::default().poll_interval)
    }
}

impl KeySource for CrosstermKeys {
    fn next_input(&mut self) -> io::Result<Option<PromptInput>> {
        loop {
            if !event::poll(self.poll_interval)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(Some(PromptInput::Key(key)));
                }
                Event::Paste(text) => return Ok(Some(PromptInput::Paste(text))),
                Event::Resize(..) => return Ok(Some(PromptInput::Resize)),
                _ => {}
            }
        }
    }
}

/// Ctrl+C always cancels. Ctrl+D cancels unless it is the submit key.
fn is_interrupt<E: LineEditor>(prompt: &SnippetPrompt<E>, key: &KeyEvent) -> bool {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => true,
        KeyCode::Char('d') => !prompt.submit_key().matches(key),
        _ => false,
    }
}

/// Run the prompt until it is submitted.
///
/// Draws the initial frame, then for each event: update the prompt, redraw,
/// and return once the prompt resolves. One event is fully processed before
/// the next one is read.
pub fn drive<E, K, S>(prompt: &mut SnippetPrompt<E>, keys: &mut K, sink: &mut S) -> Result<ValueMap>
where
    E: LineEditor,
    K: KeySource + ?Sized,
    S: FrameSink + ?Sized,
{
    sink.draw(&prompt.frame())?;

    loop {
        let Some(input) = keys.next_input()? else {
            tracing::debug!("Input closed before submit");
            return Err(PromptError::InputClosed);
        };

        let outcome = match input {
            PromptInput::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if is_interrupt(prompt, &key) {
                    tracing::debug!("Prompt interrupted");
                    return Err(PromptError::Interrupted);
                }
                prompt.handle_key(key)
            }
            PromptInput::Paste(text) => {
                prompt.handle_paste(&text);
                ComponentResult::Handled
            }
            PromptInput::Resize => ComponentResult::Handled,
        };

        sink.draw(&prompt.frame())?;
        if let Some(values) = outcome.into_done() {
            return Ok(values);
        }
    }
}

/// Run a snippet prompt on the terminal with default options.
pub fn run_snippet_prompt(config: PromptConfig) -> Result<ValueMap> {
    run_snippet_prompt_with(config, TerminalOptions::default())
}

/// Run a snippet prompt on the terminal.
///
/// The terminal is restored before this returns, whether the prompt was
/// submitted, interrupted or failed.
pub fn run_snippet_prompt_with(config: PromptConfig, options: TerminalOptions) -> Result<ValueMap> {
    let mut prompt = SnippetPrompt::new(config);

    let outcome = {
        let mut sink = TerminalSink::new(&options)?;
        let mut keys = CrosstermKeys::new(options.poll_interval);
        drive(&mut prompt, &mut keys, &mut sink)
    };

    // An inline viewport already shows the final frame.
    if options.needs_summary() && outcome.is_ok() {
        println!("{}", prompt.frame().to_plain_string());
    }
    outcome
}

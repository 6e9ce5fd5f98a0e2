//! Contract between an interactive widget and the loop hosting it.
//!
//! The host feeds key and paste events in, redraws after every event, and
//! stops once a key yields [`ComponentResult::Done`]. Cancellation belongs to
//! the host: a component never reports it.

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::key_hints::KeyHint;

/// What handling one key did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentResult<T = ()> {
    /// Consumed; state may have changed
    Handled,
    /// Ignored; state is unchanged
    NotHandled,
    /// Finished with a value
    Done(T),
}

impl<T> ComponentResult<T> {
    pub fn is_handled(&self) -> bool {
        !matches!(self, ComponentResult::NotHandled)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ComponentResult::Done(_))
    }

    /// The finished value, if any.
    pub fn into_done(self) -> Option<T> {
        match self {
            ComponentResult::Done(value) => Some(value),
            ComponentResult::Handled | ComponentResult::NotHandled => None,
        }
    }
}

/// An interactive widget driven one key at a time.
///
/// ```rust,ignore
/// loop {
///     terminal.draw(|f| component.render(f.area(), f.buffer_mut()))?;
///     if let Some(value) = component.handle_key(read_key()?).into_done() {
///         break value;
///     }
/// }
/// ```
pub trait Component {
    /// Value produced when the component finishes.
    type Output;

    /// Draw the current state into `area`.
    fn render(&self, area: Rect, buf: &mut Buffer);

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Self::Output>;

    /// Keys that do something right now.
    fn key_hints(&self) -> Vec<KeyHint>;

    /// Handle pasted text. Returns true if it was used.
    fn handle_paste(&mut self, _text: &str) -> bool {
        false
    }
}

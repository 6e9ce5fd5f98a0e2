//! Line buffer used while a text field is being edited.
//!
//! The prompt only talks to the buffer through [`LineEditor`], so hosts can
//! plug in their own readline. [`InputState`] is the built-in one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

/// Editable single-line buffer.
pub trait LineEditor {
    /// Insert text at the cursor.
    fn write(&mut self, text: &str);

    /// Empty the buffer and reset the cursor.
    fn clear(&mut self);

    /// Current text.
    fn text(&self) -> &str;

    /// Cursor position in grapheme clusters.
    fn cursor(&self) -> usize;

    /// Apply an editing key (insertion, deletion, cursor movement).
    fn handle_key(&mut self, key: KeyEvent);
}

/// Grapheme-aware line buffer with readline-style bindings.
///
/// | Key                 | Action                    |
/// |---------------------|---------------------------|
/// | ← → Home End        | move                      |
/// | Ctrl+A / Ctrl+E     | start / end of line       |
/// | Backspace / Delete  | delete before / at cursor |
/// | Ctrl+W              | delete word before cursor |
/// | Ctrl+K              | delete to end of line     |
/// | Ctrl+U              | delete whole line         |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    value: String,
    /// In graphemes, `0..=len`
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a value, cursor at its end.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value.clear();
        self.cursor = 0;
        self.insert_str(&value.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Byte offset where grapheme `index` starts.
    fn offset(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.value.len(), |(offset, _)| offset)
    }

    /// Remove graphemes `from..to` and leave the cursor at `from`.
    fn remove(&mut self, from: usize, to: usize) {
        if from >= to {
            return;
        }
        let range = self.offset(from)..self.offset(to);
        self.value.replace_range(range, "");
        self.cursor = from;
    }

    pub fn insert(&mut self, c: char) {
        self.insert_str(c.encode_utf8(&mut [0; 4]));
    }

    pub fn insert_str(&mut self, text: &str) {
        let before = self.len();
        let at = self.offset(self.cursor);
        self.value.insert_str(at, text);
        // A combining mark joins the grapheme before it and adds nothing.
        self.cursor += self.len().saturating_sub(before);
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.remove(self.cursor - 1, self.cursor);
        }
    }

    pub fn delete(&mut self) {
        self.remove(self.cursor, (self.cursor + 1).min(self.len()));
    }

    /// Delete trailing whitespace before the cursor, then the word before it.
    pub fn delete_word(&mut self) {
        let start = {
            let graphemes: Vec<&str> = self.value.graphemes(true).take(self.cursor).collect();
            let blank = |g: &str| g.chars().all(char::is_whitespace);
            let mut start = graphemes.len();
            while start > 0 && blank(graphemes[start - 1]) {
                start -= 1;
            }
            while start > 0 && !blank(graphemes[start - 1]) {
                start -= 1;
            }
            start
        };
        self.remove(start, self.cursor);
    }

    pub fn delete_to_end(&mut self) {
        self.remove(self.cursor, self.len());
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }
}

impl LineEditor for InputState {
    fn write(&mut self, text: &str) {
        self.insert_str(text);
    }

    fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn text(&self) -> &str {
        &self.value
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Char(c) if ctrl => match c {
                'a' => self.move_home(),
                'e' => self.move_end(),
                'w' => self.delete_word(),
                'k' => self.delete_to_end(),
                'u' => LineEditor::clear(self),
                _ => {}
            },
            KeyCode::Char(_) if alt => {}
            KeyCode::Char(c) => self.insert(c),
            _ => {}
        }
    }
}

//! The snippet prompt state machine.
//!
//! Keys are handled per mode:
//!
//! | Mode       | ↑ / ↓                     | Tab        | Enter               | Esc     |
//! |------------|---------------------------|------------|---------------------|---------|
//! | navigating | move focus, clamped       | next, wraps| open edit/selection | -       |
//! | editing    | line editor               | line editor| commit buffer       | discard |
//! | selecting  | move selection, clamped   | -          | commit option       | discard |
//!
//! The submit binding (Ctrl+S by default) only acts while navigating.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};

use crate::component::{Component, ComponentResult};
use crate::config::{KeyBinding, PromptConfig};
use crate::field::{Field, FieldKind, ValueMap, initial_values, normalize_fields};
use crate::frame::{PromptFrame, error_line, header_line, option_lines};
use crate::help::{HelpText, compose_help};
use crate::input::{InputState, LineEditor};
use crate::key_hints::KeyHint;
use crate::state::{EditBuffer, InteractionState, Mode, Status};
use crate::template::{RenderContext, TemplateRenderer};
use crate::theme::Theme;
use crate::validation::{Validation, Validator, run_gate};

/// Interactive template form.
pub struct SnippetPrompt<E: LineEditor = InputState> {
    message: String,
    fields: Vec<Field>,
    values: ValueMap,
    state: InteractionState,
    renderer: TemplateRenderer,
    validate: Option<Validator>,
    theme: Theme,
    submit: KeyBinding,
    max_visible_options: usize,
    editor: E,
}

impl SnippetPrompt<InputState> {
    /// Create a prompt using the built-in line editor.
    pub fn new(config: PromptConfig) -> Self {
        Self::with_editor(config, InputState::new())
    }
}

impl<E: LineEditor> SnippetPrompt<E> {
    /// Create a prompt editing text through the given line editor.
    pub fn with_editor(config: PromptConfig, editor: E) -> Self {
        let fields = normalize_fields(&config.fields);
        if fields.is_empty() {
            tracing::warn!("Snippet prompt started without fields");
        }
        let values = initial_values(&fields);
        let renderer = TemplateRenderer::new(config.template, &fields);

        Self {
            message: config.message,
            fields,
            values,
            state: InteractionState::default(),
            renderer,
            validate: config.validate,
            theme: config.theme,
            submit: config.submit,
            max_visible_options: config.max_visible_options.max(1),
            editor,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    /// Current value of one field.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn submit_key(&self) -> &KeyBinding {
        &self.submit
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn is_done(&self) -> bool {
        self.state.status == Status::Done
    }

    /// The template with current values and decorations.
    pub fn render_template(&self) -> Text<'static> {
        self.renderer.render(&RenderContext {
            fields: &self.fields,
            values: &self.values,
            state: &self.state,
            theme: &self.theme,
            highlight: !self.is_done(),
        })
    }

    /// Help text for the current mode.
    pub fn help(&self) -> HelpText {
        compose_help(&self.state.mode, &self.fields, &self.submit)
    }

    /// Build the frame for the current state.
    pub fn frame(&self) -> PromptFrame {
        let header = header_line(self.state.status, &self.message, &self.theme);
        let mut lines = self.render_template().lines;

        if !self.is_done() {
            if let Some(options) = self.selecting_options() {
                lines.push(Line::default());
                lines.extend(options);
            }
            lines.push(Line::default());
            lines.push(self.help().to_line(&self.theme));
            if let Some(error) = &self.state.error {
                lines.push(error_line(error, &self.theme));
            }
        }

        PromptFrame {
            header,
            body: Text::from(lines),
        }
    }

    /// Visible part of the option list, when a field is being selected.
    fn selecting_options(&self) -> Option<Vec<Line<'static>>> {
        let Mode::SelectingOption { field, selection } = &self.state.mode else {
            return None;
        };
        let field = self.fields.get(*field)?;
        let choices = field.choices()?;
        let committed = self.value(&field.name).unwrap_or_default();
        Some(option_lines(
            choices,
            *selection,
            committed,
            self.max_visible_options,
            &self.theme,
        ))
    }

    fn transition(&mut self, next: InteractionState) {
        if next.mode.name() != self.state.mode.name() || next.active != self.state.active {
            tracing::debug!(
                "Snippet prompt: {} -> {} (field {})",
                self.state.mode.name(),
                next.mode.name(),
                next.active
            );
        }
        self.state = next;
    }

    fn commit(&mut self, index: usize, value: String) {
        if let Some(field) = self.fields.get(index) {
            tracing::debug!("Committing value for field {}", field.name);
            self.values.insert(field.name.clone(), value);
        }
    }

    fn handle_navigating(&mut self, key: KeyEvent) -> ComponentResult<ValueMap> {
        if self.submit.matches(&key) {
            return self.submit();
        }

        let count = self.fields.len();
        if count == 0 {
            return ComponentResult::NotHandled;
        }
        let active = self.state.active;

        let next = match key.code {
            KeyCode::Up => self.state.with_active(active.saturating_sub(1)),
            KeyCode::Down => self.state.with_active((active + 1).min(count - 1)),
            KeyCode::Tab => self.state.with_active((active + 1) % count),
            KeyCode::Enter => self.open_field(active),
            _ => return ComponentResult::NotHandled,
        };
        self.transition(next);
        ComponentResult::Handled
    }

    /// State after pressing Enter on a field.
    fn open_field(&mut self, index: usize) -> InteractionState {
        let field = &self.fields[index];
        let value = self.values.get(&field.name).cloned().unwrap_or_default();

        match &field.kind {
            FieldKind::Select(choices) => {
                let selection = choices.iter().position(|c| c.value == value).unwrap_or(0);
                self.state.with_mode(Mode::SelectingOption {
                    field: index,
                    selection,
                })
            }
            FieldKind::Text => {
                self.editor.clear();
                self.editor.write(&value);
                let buffer = self.sync_buffer();
                self.state.with_mode(Mode::EditingText {
                    field: index,
                    buffer,
                })
            }
        }
    }

    fn sync_buffer(&self) -> EditBuffer {
        EditBuffer {
            text: self.editor.text().to_string(),
            cursor: self.editor.cursor(),
        }
    }

    fn handle_editing(
        &mut self,
        field: usize,
        buffer: EditBuffer,
        key: KeyEvent,
    ) -> ComponentResult<ValueMap> {
        match key.code {
            KeyCode::Enter => {
                self.commit(field, buffer.text);
                self.editor.clear();
                self.transition(self.state.with_mode(Mode::Navigating));
            }
            KeyCode::Esc => {
                self.editor.clear();
                self.transition(self.state.with_mode(Mode::Navigating));
            }
            _ => {
                tracing::trace!("Delegating {:?} to line editor", key.code);
                self.editor.handle_key(key);
                let buffer = self.sync_buffer();
                self.transition(self.state.with_mode(Mode::EditingText { field, buffer }));
            }
        }
        ComponentResult::Handled
    }

    fn handle_selecting(
        &mut self,
        field: usize,
        selection: usize,
        key: KeyEvent,
    ) -> ComponentResult<ValueMap> {
        let Some(choices) = self.fields.get(field).and_then(Field::choices) else {
            // Text fields never open a selection; recover to navigation.
            self.transition(self.state.with_mode(Mode::Navigating));
            return ComponentResult::Handled;
        };
        let last = choices.len() - 1;

        match key.code {
            KeyCode::Up => {
                let selection = selection.saturating_sub(1);
                self.transition(
                    self.state
                        .with_mode(Mode::SelectingOption { field, selection }),
                );
            }
            KeyCode::Down => {
                let selection = (selection + 1).min(last);
                self.transition(
                    self.state
                        .with_mode(Mode::SelectingOption { field, selection }),
                );
            }
            KeyCode::Enter => {
                let value = choices[selection.min(last)].value.clone();
                self.commit(field, value);
                self.transition(self.state.with_mode(Mode::Navigating));
            }
            KeyCode::Esc => {
                self.transition(self.state.with_mode(Mode::Navigating));
            }
            _ => return ComponentResult::NotHandled,
        }
        ComponentResult::Handled
    }

    fn submit(&mut self) -> ComponentResult<ValueMap> {
        self.transition(InteractionState {
            status: Status::Loading,
            ..self.state.clone()
        });

        match run_gate(self.validate.as_ref(), &self.values) {
            Validation::Valid => {
                tracing::debug!("Snippet prompt submitted with {} values", self.values.len());
                self.transition(InteractionState {
                    status: Status::Done,
                    error: None,
                    ..self.state.clone()
                });
                ComponentResult::Done(self.values.clone())
            }
            Validation::Invalid(message) => {
                self.transition(InteractionState {
                    status: Status::Idle,
                    error: Some(message),
                    ..self.state.clone()
                });
                ComponentResult::Handled
            }
        }
    }
}

impl<E: LineEditor> Component for SnippetPrompt<E> {
    type Output = ValueMap;

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.frame().render(area, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ComponentResult<Self::Output> {
        if key.kind == KeyEventKind::Release || self.is_done() {
            return ComponentResult::NotHandled;
        }

        match self.state.mode.clone() {
            Mode::Navigating => self.handle_navigating(key),
            Mode::EditingText { field, buffer } => self.handle_editing(field, buffer, key),
            Mode::SelectingOption { field, selection } => {
                self.handle_selecting(field, selection, key)
            }
        }
    }

    fn key_hints(&self) -> Vec<KeyHint> {
        self.help().hints
    }

    fn handle_paste(&mut self, text: &str) -> bool {
        let Mode::EditingText { field, .. } = self.state.mode else {
            return false;
        };
        // Pasted newlines would end the edit; keep the value single-line.
        let text = text.replace(['\r', '\n'], " ");
        self.editor.write(&text);
        let buffer = self.sync_buffer();
        self.transition(self.state.with_mode(Mode::EditingText { field, buffer }));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn prompt() -> SnippetPrompt {
        SnippetPrompt::new(
            PromptConfig::new("Fill in", "{{name}} likes {{color}} ({{note}})").fields([
                FieldSpec::text("name").with_initial("Ada"),
                FieldSpec::select("color", ["red", "green", "blue"]),
                FieldSpec::text("note"),
            ]),
        )
    }

    fn press(prompt: &mut SnippetPrompt, codes: &[KeyCode]) {
        for code in codes {
            prompt.handle_key(key(*code));
        }
    }

    #[test]
    fn test_initial_state() {
        let prompt = prompt();
        assert_eq!(prompt.state(), &InteractionState::default());
        assert_eq!(prompt.value("name"), Some("Ada"));
        assert_eq!(prompt.value("color"), Some(""));
    }

    #[test]
    fn test_arrows_clamp() {
        let mut prompt = prompt();
        press(&mut prompt, &[KeyCode::Up, KeyCode::Up]);
        assert_eq!(prompt.state().active, 0);
        press(&mut prompt, &[KeyCode::Down; 5]);
        assert_eq!(prompt.state().active, 2);
    }

    #[test]
    fn test_tab_wraps() {
        let mut prompt = prompt();
        press(&mut prompt, &[KeyCode::Tab, KeyCode::Tab]);
        assert_eq!(prompt.state().active, 2);
        press(&mut prompt, &[KeyCode::Tab]);
        assert_eq!(prompt.state().active, 0);
    }

    #[test]
    fn test_edit_then_escape_keeps_value() {
        let mut prompt = prompt();
        press(
            &mut prompt,
            &[KeyCode::Enter, KeyCode::Char('x'), KeyCode::Esc],
        );
        assert_eq!(prompt.value("name"), Some("Ada"));
        assert!(prompt.state().is_navigating());
    }

    #[test]
    fn test_edit_commit_appends_to_seed() {
        let mut prompt = prompt();
        press(&mut prompt, &[KeyCode::Enter]);
        assert_eq!(
            prompt.state().mode,
            Mode::EditingText {
                field: 0,
                buffer: EditBuffer {
                    text: "Ada".into(),
                    cursor: 3
                }
            }
        );
        press(
            &mut prompt,
            &[KeyCode::Char(' '), KeyCode::Char('L'), KeyCode::Enter],
        );
        assert_eq!(prompt.value("name"), Some("Ada L"));
        assert_eq!(prompt.editor().text(), "");
    }

    #[test]
    fn test_select_down_enter_commits_green() {
        let mut prompt = prompt();
        press(
            &mut prompt,
            &[KeyCode::Down, KeyCode::Enter, KeyCode::Down, KeyCode::Enter],
        );
        assert_eq!(prompt.value("color"), Some("green"));
        assert!(prompt.state().is_navigating());
    }

    #[test]
    fn test_selection_clamps_and_reopens_at_current() {
        let mut prompt = prompt();
        press(&mut prompt, &[KeyCode::Down, KeyCode::Enter]);
        press(&mut prompt, &[KeyCode::Down; 10]);
        assert_eq!(
            prompt.state().mode,
            Mode::SelectingOption {
                field: 1,
                selection: 2
            }
        );
        press(&mut prompt, &[KeyCode::Enter, KeyCode::Enter]);
        assert_eq!(
            prompt.state().mode,
            Mode::SelectingOption {
                field: 1,
                selection: 2
            }
        );
        press(&mut prompt, &[KeyCode::Up; 10]);
        assert_eq!(
            prompt.state().mode,
            Mode::SelectingOption {
                field: 1,
                selection: 0
            }
        );
        press(&mut prompt, &[KeyCode::Esc]);
        assert_eq!(prompt.value("color"), Some("blue"));
    }

    #[test]
    fn test_other_keys_are_noops() {
        let mut prompt = prompt();
        let before = prompt.state().clone();
        assert_eq!(
            prompt.handle_key(key(KeyCode::Char('q'))),
            ComponentResult::NotHandled
        );
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), ComponentResult::NotHandled);
        assert_eq!(prompt.state(), &before);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut prompt = prompt();
        let mut release = key(KeyCode::Down);
        release.kind = KeyEventKind::Release;
        assert_eq!(prompt.handle_key(release), ComponentResult::NotHandled);
        assert_eq!(prompt.state().active, 0);
    }

    #[test]
    fn test_submit_without_validator() {
        let mut prompt = prompt();
        let result = prompt.handle_key(ctrl_s());
        let ComponentResult::Done(values) = result else {
            panic!("expected Done, got {:?}", result);
        };
        assert_eq!(&values, prompt.values());
        assert!(prompt.is_done());
        assert_eq!(prompt.handle_key(key(KeyCode::Down)), ComponentResult::NotHandled);
    }

    #[test]
    fn test_accepting_validator_resolves_with_values() {
        let mut prompt = SnippetPrompt::new(
            PromptConfig::new("Fill in", "{{name}} likes {{color}} ({{note}})")
                .fields([
                    FieldSpec::text("name").with_initial("Ada"),
                    FieldSpec::select("color", ["red", "green", "blue"]),
                    FieldSpec::text("note"),
                ])
                .validate(|_: &ValueMap| true),
        );
        press(
            &mut prompt,
            &[
                KeyCode::Enter,
                KeyCode::Char('!'),
                KeyCode::Enter,
                KeyCode::Down,
                KeyCode::Enter,
                KeyCode::Down,
                KeyCode::Enter,
            ],
        );

        let snapshot = prompt.values().clone();
        let values = prompt.handle_key(ctrl_s()).into_done();
        assert_eq!(values, Some(snapshot));

        let values = values.unwrap_or_default();
        let pairs: Vec<(&str, &str)> = values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, vec![("name", "Ada!"), ("color", "green"), ("note", "")]);
        assert_eq!(prompt.state().status, Status::Done);
        assert_eq!(prompt.state().error, None);
    }

    #[test]
    fn test_submit_ignored_while_editing() {
        let mut prompt = prompt();
        press(&mut prompt, &[KeyCode::Enter]);
        assert_eq!(prompt.handle_key(ctrl_s()), ComponentResult::Handled);
        assert!(!prompt.is_done());
        assert_eq!(prompt.editor().text(), "Ada");
    }

    #[test]
    fn test_validation_error_is_sticky() {
        let mut prompt = SnippetPrompt::new(
            PromptConfig::new("m", "{{a}}")
                .field(FieldSpec::text("a"))
                .validate(|values: &ValueMap| {
                    if values["a"].is_empty() {
                        Err("a is required".to_string())
                    } else {
                        Ok(())
                    }
                }),
        );

        assert_eq!(prompt.handle_key(ctrl_s()), ComponentResult::Handled);
        assert_eq!(prompt.state().status, Status::Idle);
        assert_eq!(prompt.state().error.as_deref(), Some("a is required"));

        press(&mut prompt, &[KeyCode::Down, KeyCode::Tab]);
        assert_eq!(prompt.state().error.as_deref(), Some("a is required"));

        press(&mut prompt, &[KeyCode::Enter, KeyCode::Char('1'), KeyCode::Enter]);
        let result = prompt.handle_key(ctrl_s());
        assert!(result.is_done());
        assert_eq!(prompt.state().error, None);
    }

    #[test]
    fn test_zero_fields() {
        let mut prompt = SnippetPrompt::new(PromptConfig::new("m", "static"));
        press(&mut prompt, &[KeyCode::Down, KeyCode::Tab, KeyCode::Enter]);
        assert_eq!(prompt.state().active, 0);
        assert!(prompt.state().is_navigating());
        assert!(prompt.handle_key(ctrl_s()).is_done());
    }

    #[test]
    fn test_paste_while_editing() {
        let mut prompt = prompt();
        assert!(!prompt.handle_paste("ignored"));
        press(&mut prompt, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Enter]);
        assert!(prompt.handle_paste("a\nb"));
        press(&mut prompt, &[KeyCode::Enter]);
        assert_eq!(prompt.value("note"), Some("a b"));
    }

    #[test]
    fn test_frame_contents() {
        let mut prompt = prompt();
        assert_eq!(
            prompt.frame().to_plain_string(),
            "? Fill in\nAda likes color (note)\n\n\
             Enter edit/select · ↑↓ navigate · Tab next field · Ctrl+S submit"
        );

        press(&mut prompt, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(
            prompt.frame().to_plain_string(),
            "? Fill in\nAda likes color (note)\n\n❯ red\n  green\n  blue\n\n\
             Selecting color: ↑↓ navigate options · Enter select · Esc cancel"
        );

        press(&mut prompt, &[KeyCode::Enter]);
        prompt.handle_key(ctrl_s());
        assert_eq!(prompt.frame().to_plain_string(), "✔ Fill in\nAda likes red (note)");
    }
}

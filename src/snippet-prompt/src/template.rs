//! Template rendering.
//!
//! Substitutes every `{{field}}` placeholder with the field's display
//! fragment. Tokens are matched literally: field names are escaped before the
//! pattern is built, so names like `field+plus` or `a.b` are safe. Unknown and
//! malformed placeholders stay as literal text.

use std::collections::HashMap;

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::field::{Field, ValueMap};
use crate::state::{EditBuffer, InteractionState, Mode};
use crate::theme::Theme;

/// Inputs of one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub fields: &'a [Field],
    pub values: &'a ValueMap,
    pub state: &'a InteractionState,
    pub theme: &'a Theme,
    /// Draw focus, selection and cursor decorations
    pub highlight: bool,
}

/// Template compiled against a fixed field list.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template: String,
    pattern: Option<Regex>,
    /// Placeholder token to field index
    tokens: HashMap<String, usize>,
}

impl TemplateRenderer {
    pub fn new(template: impl Into<String>, fields: &[Field]) -> Self {
        let tokens: HashMap<String, usize> = fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.token(), i))
            .collect();

        Self {
            template: template.into(),
            pattern: build_pattern(tokens.keys()),
            tokens,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the template. Each field's fragment is built once and reused for
    /// all of its occurrences.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Text<'static> {
        let mut out = LineBuilder::default();
        let Some(pattern) = &self.pattern else {
            out.push(&self.template, Style::default());
            return out.finish();
        };

        let mut fragments: HashMap<usize, Vec<Span<'static>>> = HashMap::new();
        let mut last = 0;
        for found in pattern.find_iter(&self.template) {
            let Some(&index) = self.tokens.get(found.as_str()) else {
                continue;
            };
            out.push(&self.template[last..found.start()], Style::default());
            let fragment = fragments
                .entry(index)
                .or_insert_with(|| display_fragment(index, ctx));
            for span in fragment.iter() {
                out.push(&span.content, span.style);
            }
            last = found.end();
        }
        out.push(&self.template[last..], Style::default());
        out.finish()
    }
}

/// Alternation of all escaped tokens, longest first so a token never loses to
/// one of its own prefixes.
fn build_pattern<'a>(tokens: impl Iterator<Item = &'a String>) -> Option<Regex> {
    let mut tokens: Vec<&String> = tokens.collect();
    if tokens.is_empty() {
        return None;
    }
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = tokens
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&alternation) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!("Placeholders left unsubstituted, pattern failed to build: {}", e);
            None
        }
    }
}

/// Display fragment of one field for the current state.
fn display_fragment(index: usize, ctx: &RenderContext<'_>) -> Vec<Span<'static>> {
    let field = &ctx.fields[index];
    let theme = ctx.theme;
    let value = ctx
        .values
        .get(&field.name)
        .map(String::as_str)
        .unwrap_or_default();

    if ctx.highlight {
        match &ctx.state.mode {
            Mode::EditingText { field: f, buffer } if *f == index => {
                return cursor_spans(buffer, theme.cursor);
            }
            Mode::SelectingOption { field: f, .. } if *f == index => {
                let shown = if value.is_empty() { field.label.as_str() } else { value };
                return vec![Span::styled(shown.to_string(), theme.selecting)];
            }
            _ => {}
        }
    }

    let focused = ctx.highlight && ctx.state.is_navigating() && ctx.state.active == index;
    if !value.is_empty() {
        let style = if focused { theme.active_field } else { theme.field };
        vec![Span::styled(value.to_string(), style)]
    } else {
        let style = if focused {
            theme.active_placeholder
        } else {
            theme.placeholder
        };
        vec![Span::styled(field.label.clone(), style)]
    }
}

/// Edit buffer with the grapheme under the cursor highlighted. A cursor at the
/// end (or in an empty buffer) highlights a trailing space.
fn cursor_spans(buffer: &EditBuffer, cursor_style: Style) -> Vec<Span<'static>> {
    let graphemes: Vec<&str> = buffer.text.graphemes(true).collect();
    let cursor = buffer.cursor.min(graphemes.len());

    let before = graphemes[..cursor].concat();
    let at = graphemes.get(cursor).copied().unwrap_or(" ");
    let after = graphemes
        .get(cursor + 1..)
        .map(|rest| rest.concat())
        .unwrap_or_default();

    let mut spans = Vec::with_capacity(3);
    if !before.is_empty() {
        spans.push(Span::raw(before));
    }
    spans.push(Span::styled(at.to_string(), cursor_style));
    if !after.is_empty() {
        spans.push(Span::raw(after));
    }
    spans
}

/// Accumulates styled text, starting a new line at every `\n`.
#[derive(Debug, Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl LineBuilder {
    fn push(&mut self, text: &str, style: Style) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.push_segment(first, style);
        }
        for part in parts {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
            self.push_segment(part, style);
        }
    }

    fn push_segment(&mut self, text: &str, style: Style) {
        let text = text.strip_suffix('\r').unwrap_or(text);
        if !text.is_empty() {
            self.current.push(Span::styled(text.to_string(), style));
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.lines.push(Line::from(self.current));
        Text::from(self.lines)
    }
}

/// Flatten rendered text into a plain string, one line per `\n`.
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldSpec, initial_values, normalize_fields};
    use pretty_assertions::assert_eq;

    struct Fixture {
        fields: Vec<Field>,
        values: ValueMap,
        state: InteractionState,
        theme: Theme,
    }

    impl Fixture {
        fn new(specs: &[FieldSpec]) -> Self {
            let fields = normalize_fields(specs);
            let values = initial_values(&fields);
            Self {
                fields,
                values,
                state: InteractionState::default(),
                theme: Theme::default(),
            }
        }

        fn render(&self, template: &str) -> Text<'static> {
            let renderer = TemplateRenderer::new(template, &self.fields);
            renderer.render(&RenderContext {
                fields: &self.fields,
                values: &self.values,
                state: &self.state,
                theme: &self.theme,
                highlight: true,
            })
        }

        fn plain(&self, template: &str) -> String {
            plain_text(&self.render(template))
        }
    }

    #[test]
    fn test_substitutes_initial_value() {
        let fx = Fixture::new(&[FieldSpec::text("name").with_initial("World")]);
        assert_eq!(fx.plain("Hello {{name}}!"), "Hello World!");
    }

    #[test]
    fn test_empty_value_shows_label() {
        let fx = Fixture::new(&[FieldSpec::text("name").with_label("Your name")]);
        assert_eq!(fx.plain("Hello {{name}}!"), "Hello Your name!");
    }

    #[test]
    fn test_repeated_placeholder_renders_identically() {
        let fx = Fixture::new(&[FieldSpec::text("x").with_initial("v")]);
        let text = fx.render("{{x}} and {{x}}");
        let spans = &text.lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0], spans[2]);
        assert_eq!(spans[0].style, fx.theme.active_field);
    }

    #[test]
    fn test_metacharacter_names() {
        let fx = Fixture::new(&[
            FieldSpec::text("field+plus").with_initial("P"),
            FieldSpec::text("a.b").with_initial("D"),
        ]);
        assert_eq!(
            fx.plain("[{{field+plus}}] {{fieldplus}} {{a.b}} {{aXb}}"),
            "[P] {{fieldplus}} D {{aXb}}"
        );
    }

    #[test]
    fn test_unknown_and_malformed_placeholders_are_literal() {
        let fx = Fixture::new(&[FieldSpec::text("name").with_initial("W")]);
        assert_eq!(
            fx.plain("{{other}} {name} {{name} {{ name }} name"),
            "{{other}} {name} {{name} {{ name }} name"
        );
    }

    #[test]
    fn test_field_name_with_braces() {
        let fx = Fixture::new(&[FieldSpec::text("a}b").with_initial("X")]);
        assert_eq!(fx.plain("<{{a}b}}>"), "<X>");
    }

    #[test]
    fn test_prefix_names_prefer_longest_token() {
        let fx = Fixture::new(&[
            FieldSpec::text("a").with_initial("short"),
            FieldSpec::text("a}}b").with_initial("long"),
        ]);
        assert_eq!(fx.plain("{{a}}b}} {{a}}"), "long short");
    }

    #[test]
    fn test_multiline_template() {
        let fx = Fixture::new(&[FieldSpec::text("name").with_initial("W")]);
        let text = fx.render("line one\nHello {{name}}\n");
        assert_eq!(text.lines.len(), 3);
        assert_eq!(plain_text(&text), "line one\nHello W\n");
    }

    #[test]
    fn test_no_fields_keeps_template() {
        let fx = Fixture::new(&[]);
        assert_eq!(fx.plain("static {{text}}"), "static {{text}}");
    }

    #[test]
    fn test_focus_styles() {
        let mut fx = Fixture::new(&[
            FieldSpec::text("a").with_initial("1"),
            FieldSpec::text("b"),
        ]);
        fx.state.active = 1;
        let text = fx.render("{{a}}{{b}}");
        let spans = &text.lines[0].spans;
        assert_eq!(spans[0].style, fx.theme.field);
        assert_eq!(spans[1].style, fx.theme.active_placeholder);
    }

    #[test]
    fn test_editing_cursor_in_middle() {
        let mut fx = Fixture::new(&[FieldSpec::text("a").with_initial("old")]);
        fx.state.mode = Mode::EditingText {
            field: 0,
            buffer: EditBuffer {
                text: "abc".into(),
                cursor: 1,
            },
        };
        let text = fx.render("[{{a}}]");
        let spans = &text.lines[0].spans;
        assert_eq!(plain_text(&text), "[abc]");
        assert_eq!(spans[1], Span::raw("a"));
        assert_eq!(spans[2], Span::styled("b", fx.theme.cursor));
        assert_eq!(spans[3], Span::raw("c"));
    }

    #[test]
    fn test_editing_cursor_at_end_and_empty() {
        let mut fx = Fixture::new(&[FieldSpec::text("a")]);
        fx.state.mode = Mode::EditingText {
            field: 0,
            buffer: EditBuffer {
                text: "ab".into(),
                cursor: 2,
            },
        };
        assert_eq!(fx.plain("{{a}}"), "ab ");

        fx.state.mode = Mode::EditingText {
            field: 0,
            buffer: EditBuffer::default(),
        };
        let text = fx.render("{{a}}");
        assert_eq!(text.lines[0].spans, vec![Span::styled(" ", fx.theme.cursor)]);
    }

    #[test]
    fn test_selecting_emphasis() {
        let mut fx = Fixture::new(&[
            FieldSpec::select("color", ["red", "green"]),
            FieldSpec::text("b").with_initial("x"),
        ]);
        fx.state.mode = Mode::SelectingOption {
            field: 0,
            selection: 1,
        };
        let text = fx.render("{{color}} {{b}}");
        let spans = &text.lines[0].spans;
        assert_eq!(spans[0], Span::styled("color", fx.theme.selecting));
        assert_eq!(spans[2].style, fx.theme.field);
    }

    #[test]
    fn test_without_highlight_everything_is_plain_style() {
        let mut fx = Fixture::new(&[FieldSpec::text("a").with_initial("1")]);
        fx.state.mode = Mode::EditingText {
            field: 0,
            buffer: EditBuffer {
                text: "typing".into(),
                cursor: 0,
            },
        };
        let renderer = TemplateRenderer::new("{{a}}", &fx.fields);
        let text = renderer.render(&RenderContext {
            fields: &fx.fields,
            values: &fx.values,
            state: &fx.state,
            theme: &fx.theme,
            highlight: false,
        });
        assert_eq!(text.lines[0].spans, vec![Span::styled("1", fx.theme.field)]);
    }
}

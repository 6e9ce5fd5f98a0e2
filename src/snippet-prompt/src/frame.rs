//! Frame assembled on every render: header line plus body text.

use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::options::Choice;
use crate::state::Status;
use crate::template::plain_text;
use crate::theme::Theme;

/// Marker in front of the highlighted option.
pub const POINTER: &str = "❯";

/// One rendered frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptFrame {
    pub header: Line<'static>,
    pub body: Text<'static>,
}

impl PromptFrame {
    /// Header and body as one text, header first.
    pub fn to_text(&self) -> Text<'static> {
        let mut lines = Vec::with_capacity(self.body.lines.len() + 1);
        lines.push(self.header.clone());
        lines.extend(self.body.lines.iter().cloned());
        Text::from(lines)
    }

    /// Unstyled rendering, one terminal line per `\n`.
    pub fn to_plain_string(&self) -> String {
        plain_text(&self.to_text())
    }

    /// Number of terminal rows needed without wrapping.
    pub fn height(&self) -> u16 {
        u16::try_from(self.body.lines.len() + 1).unwrap_or(u16::MAX)
    }

    /// Draw the frame into a buffer area, wrapping long lines.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        Paragraph::new(self.to_text())
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// `? message` while open, `✔ message` once resolved.
pub fn header_line(status: Status, message: &str, theme: &Theme) -> Line<'static> {
    let (prefix, style) = match status {
        Status::Idle => ("?", theme.prefix),
        Status::Loading => ("…", theme.prefix),
        Status::Done => ("✔", theme.done_prefix),
    };
    Line::from(vec![
        Span::styled(prefix, style),
        Span::raw(" "),
        Span::styled(message.to_string(), theme.message_style()),
    ])
}

/// Range of options drawn for a selection, at most `max_visible` long.
///
/// The window starts at the top and scrolls just enough to keep the
/// selection on its last row.
pub fn option_window(len: usize, selection: usize, max_visible: usize) -> Range<usize> {
    if len == 0 {
        return 0..0;
    }
    let visible = max_visible.max(1).min(len);
    let selection = selection.min(len - 1);
    let start = (selection + 1).saturating_sub(visible);
    start..start + visible
}

/// Option list shown under the template while selecting.
pub fn option_lines(
    choices: &[Choice],
    selection: usize,
    committed: &str,
    max_visible: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let window = option_window(choices.len(), selection, max_visible);
    choices[window.clone()]
        .iter()
        .zip(window)
        .map(|(choice, i)| {
            let (pointer, style) = if i == selection {
                (POINTER, theme.active_option)
            } else {
                (" ", theme.option)
            };
            let mut spans = vec![
                Span::styled(format!("{} ", pointer), style),
                Span::styled(choice.name.clone(), style),
            ];
            if !committed.is_empty() && choice.value == committed {
                spans.push(Span::styled(" (current)", theme.help_text));
            }
            Line::from(spans)
        })
        .collect()
}

/// Error line shown under the help line.
pub fn error_line(message: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(format!("> {}", message), theme.error_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn choices() -> Vec<Choice> {
        ["red", "green", "blue"]
            .iter()
            .map(|c| Choice {
                name: c.to_string(),
                value: c.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_header_prefix_follows_status() {
        let theme = Theme::plain();
        assert_eq!(header_line(Status::Idle, "Fill in", &theme).to_string(), "? Fill in");
        assert_eq!(header_line(Status::Done, "Fill in", &theme).to_string(), "✔ Fill in");
    }

    #[test]
    fn test_option_lines_mark_selection_and_current() {
        let lines = option_lines(&choices(), 1, "blue", 5, &Theme::plain());
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["  red", "❯ green", "  blue (current)"]);
    }

    #[test]
    fn test_prefix_and_option_styles_come_from_theme() {
        use ratatui::style::{Color, Style};

        let green = Style::default().fg(Color::Green);
        let red = Style::default().fg(Color::Red);
        let theme = Theme::plain()
            .with_done_prefix(green)
            .with_active_option(red);

        assert_eq!(header_line(Status::Done, "m", &theme).spans[0].style, green);
        assert_eq!(header_line(Status::Idle, "m", &theme).spans[0].style, Style::default());
        let lines = option_lines(&choices(), 0, "", 5, &theme);
        assert_eq!(lines[0].spans[1].style, red);
        assert_eq!(lines[1].spans[1].style, Style::default());
    }

    #[test]
    fn test_option_window_follows_selection() {
        assert_eq!(option_window(20, 0, 5), 0..5);
        assert_eq!(option_window(20, 4, 5), 0..5);
        assert_eq!(option_window(20, 15, 5), 11..16);
        assert_eq!(option_window(20, 19, 5), 15..20);
        assert_eq!(option_window(3, 2, 5), 0..3);
        assert_eq!(option_window(3, 1, 0), 1..2);
        assert_eq!(option_window(0, 0, 5), 0..0);
    }

    #[test]
    fn test_option_lines_scroll() {
        let lines = option_lines(&choices(), 2, "", 2, &Theme::plain());
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["  green", "❯ blue"]);
    }

    #[test]
    fn test_plain_string_and_height() {
        let frame = PromptFrame {
            header: Line::from("? Title"),
            body: Text::from(vec![Line::from("Hello World!"), Line::from("help")]),
        };
        assert_eq!(frame.to_plain_string(), "? Title\nHello World!\nhelp");
        assert_eq!(frame.height(), 3);
    }

    #[test]
    fn test_render_into_buffer() {
        let frame = PromptFrame {
            header: Line::from("? T"),
            body: Text::from("Hi"),
        };
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        frame.render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "?");
        assert_eq!(buf[(0, 1)].symbol(), "H");
    }
}

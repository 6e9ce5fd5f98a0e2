//! Snippet prompt theme.
//!
//! Every decoration the prompt draws comes from a [`Theme`] entry. The
//! defaults are built from a [`Palette`]; any entry can be replaced with the
//! `with_*` builders.

use ratatui::style::{Color, Modifier, Style};

// ============================================================
// PALETTE COLORS - Cyan accents on a navy base
// ============================================================

/// Primary accent
pub const CYAN_PRIMARY: Color = Color::Rgb(0, 255, 163); // #00FFA3

/// Secondary accent, used for the selecting emphasis
pub const SKY_BLUE: Color = Color::Rgb(100, 255, 180); // #64FFB4

/// Darkest surface
pub const SURFACE_0: Color = Color::Rgb(13, 27, 42); // #0D1B2A

/// Mid surface
pub const SURFACE_1: Color = Color::Rgb(27, 40, 56); // #1B2838

/// Primary text
pub const TEXT: Color = Color::Rgb(255, 255, 255); // #FFFFFF

/// Secondary text
pub const TEXT_DIM: Color = Color::Rgb(130, 154, 177); // #829AB1

/// Background text
pub const TEXT_MUTED: Color = Color::Rgb(72, 101, 129); // #486581

/// Success states
pub const SUCCESS: Color = Color::Rgb(0, 245, 212); // #00F5D4

/// Errors
pub const ERROR: Color = Color::Rgb(255, 107, 107); // #FF6B6B

/// Set of colors a theme is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Primary accent color
    pub primary: Color,
    /// Secondary accent color
    pub secondary: Color,
    /// Cursor foreground
    pub surface: Color,
    /// Primary text color
    pub text: Color,
    /// Dimmed text color
    pub text_dim: Color,
    /// Muted text color
    pub text_muted: Color,
    /// Success color
    pub success: Color,
    /// Error color
    pub error: Color,
}

impl Palette {
    /// Dark palette (default).
    pub fn dark() -> Self {
        Self {
            primary: CYAN_PRIMARY,
            secondary: SKY_BLUE,
            surface: SURFACE_0,
            text: TEXT,
            text_dim: TEXT_DIM,
            text_muted: TEXT_MUTED,
            success: SUCCESS,
            error: ERROR,
        }
    }

    /// Light palette - darker accents for light terminals.
    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(0, 150, 100),
            secondary: Color::Rgb(0, 100, 70),
            surface: Color::Rgb(245, 245, 245),
            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(100, 100, 100),
            text_muted: Color::Rgb(150, 150, 150),
            success: Color::Rgb(0, 150, 0),
            error: Color::Rgb(200, 50, 50),
        }
    }

    /// Get a palette by name. Unknown names fall back to the dark palette.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// All palette names accepted by [`Palette::from_name`].
    pub fn available() -> &'static [&'static str] {
        &["dark", "light"]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Styles applied to each part of the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Committed value of an unfocused field
    pub field: Style,
    /// Committed value of the focused field
    pub active_field: Style,
    /// Label of an empty, unfocused field
    pub placeholder: Style,
    /// Label of the empty, focused field
    pub active_placeholder: Style,
    /// Prompt message; `None` leaves it unstyled
    pub message: Option<Style>,
    /// Field currently open in the option list
    pub selecting: Style,
    /// Cell under the edit cursor
    pub cursor: Style,
    /// Key names in the help line
    pub key_label: Style,
    /// Descriptions in the help line
    pub help_text: Style,
    /// Validation error line
    pub error_text: Style,
    /// Status prefix while the prompt is open
    pub prefix: Style,
    /// Status prefix once the prompt resolved
    pub done_prefix: Style,
    /// Unhighlighted entry of the option list
    pub option: Style,
    /// Highlighted entry of the option list
    pub active_option: Style,
}

impl Theme {
    /// Build a theme from a palette.
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            field: Style::default().fg(palette.text),
            active_field: Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            placeholder: Style::default().fg(palette.text_muted),
            active_placeholder: Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::UNDERLINED),
            message: Some(Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
            selecting: Style::default()
                .fg(palette.secondary)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            cursor: Style::default().fg(palette.surface).bg(palette.primary),
            key_label: Style::default().fg(palette.primary),
            help_text: Style::default().fg(palette.text_dim),
            error_text: Style::default().fg(palette.error),
            prefix: Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
            done_prefix: Style::default().fg(palette.success).add_modifier(Modifier::BOLD),
            option: Style::default().fg(palette.text_dim),
            active_option: Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Theme without any colors or modifiers. Handy for plain terminals.
    pub fn plain() -> Self {
        let none = Style::default();
        Self {
            field: none,
            active_field: none,
            placeholder: none,
            active_placeholder: none,
            message: None,
            selecting: none,
            cursor: none.add_modifier(Modifier::REVERSED),
            key_label: none,
            help_text: none,
            error_text: none,
            prefix: none,
            done_prefix: none,
            option: none,
            active_option: none,
        }
    }

    pub fn with_field(mut self, style: Style) -> Self {
        self.field = style;
        self
    }

    pub fn with_active_field(mut self, style: Style) -> Self {
        self.active_field = style;
        self
    }

    pub fn with_placeholder(mut self, style: Style) -> Self {
        self.placeholder = style;
        self
    }

    pub fn with_active_placeholder(mut self, style: Style) -> Self {
        self.active_placeholder = style;
        self
    }

    /// Set the message style; `None` renders the message unstyled.
    pub fn with_message(mut self, style: Option<Style>) -> Self {
        self.message = style;
        self
    }

    pub fn with_selecting(mut self, style: Style) -> Self {
        self.selecting = style;
        self
    }

    pub fn with_cursor(mut self, style: Style) -> Self {
        self.cursor = style;
        self
    }

    pub fn with_key_label(mut self, style: Style) -> Self {
        self.key_label = style;
        self
    }

    pub fn with_help_text(mut self, style: Style) -> Self {
        self.help_text = style;
        self
    }

    pub fn with_error_text(mut self, style: Style) -> Self {
        self.error_text = style;
        self
    }

    pub fn with_prefix(mut self, style: Style) -> Self {
        self.prefix = style;
        self
    }

    pub fn with_done_prefix(mut self, style: Style) -> Self {
        self.done_prefix = style;
        self
    }

    pub fn with_option(mut self, style: Style) -> Self {
        self.option = style;
        self
    }

    pub fn with_active_option(mut self, style: Style) -> Self {
        self.active_option = style;
        self
    }

    /// Style of the message, or the default style when none is set.
    pub fn message_style(&self) -> Style {
        self.message.unwrap_or_default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette(&Palette::default())
    }
}

//! Terminal setup and teardown.
//!
//! [`TerminalSink`] owns a [`TerminalGuard`], so raw mode, the alternate
//! screen and bracketed paste are undone when the sink is dropped, including
//! on early returns. A panic hook does the same if the prompt panics.

use std::io::{self, Stdout, stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::Clear;
use ratatui::{Terminal, Viewport};

use snippet_prompt::frame::PromptFrame;

use crate::runner::FrameSink;

/// Track whether the panic hook has been installed.
static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Terminal features used while a prompt runs.
///
/// ```rust,ignore
/// let options = TerminalOptions::new()
///     .alternate_screen(false)
///     .inline_height(8)
///     .print_summary(false);
/// ```
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// Draw on the alternate screen; otherwise draw inline below the cursor
    pub alternate_screen: bool,
    /// Rows reserved for the prompt when drawing inline
    pub inline_height: u16,
    /// How long to wait for input before polling again
    pub poll_interval: Duration,
    /// Print the final frame as plain text after a successful submit. Only
    /// applies on the alternate screen; inline drawing leaves it in place.
    pub print_summary: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            inline_height: 12,
            poll_interval: Duration::from_millis(100),
            print_summary: true,
        }
    }
}

impl TerminalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    pub fn inline_height(mut self, rows: u16) -> Self {
        self.inline_height = rows.max(1);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn print_summary(mut self, enabled: bool) -> Self {
        self.print_summary = enabled;
        self
    }

    /// Whether the final frame must be printed once the terminal is restored.
    pub fn needs_summary(&self) -> bool {
        self.print_summary && self.alternate_screen
    }
}

/// Restores the terminal when dropped.
pub struct TerminalGuard {
    alternate_screen: bool,
}

impl TerminalGuard {
    fn new(alternate_screen: bool) -> Self {
        Self { alternate_screen }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal_impl(self.alternate_screen) {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Frame sink drawing through ratatui on the real terminal.
pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    // Dropped after the terminal so the last frame is flushed first.
    _guard: TerminalGuard,
}

impl TerminalSink {
    /// Put the terminal into prompt mode.
    pub fn new(options: &TerminalOptions) -> io::Result<Self> {
        install_panic_hook();

        let guard = TerminalGuard::new(options.alternate_screen);
        init_terminal(options.alternate_screen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = if options.alternate_screen {
            let mut terminal = Terminal::new(backend)?;
            terminal.clear()?;
            terminal
        } else {
            Terminal::with_options(
                backend,
                ratatui::TerminalOptions {
                    viewport: Viewport::Inline(options.inline_height),
                },
            )?
        };
        tracing::debug!(
            "Terminal ready (alternate screen: {})",
            options.alternate_screen
        );

        Ok(Self {
            terminal,
            _guard: guard,
        })
    }
}

impl FrameSink for TerminalSink {
    fn draw(&mut self, frame: &PromptFrame) -> io::Result<()> {
        self.terminal.draw(|f| {
            let area = f.area();
            f.render_widget(Clear, area);
            frame.render(area, f.buffer_mut());
        })?;
        Ok(())
    }
}

fn init_terminal(alternate_screen: bool) -> io::Result<()> {
    enable_raw_mode()?;

    let mut stdout = stdout();
    if alternate_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    execute!(stdout, EnableBracketedPaste, cursor::Hide)?;
    Ok(())
}

/// Every step is attempted even if an earlier one fails.
fn restore_terminal_impl(alternate_screen: bool) -> io::Result<()> {
    let mut stdout = stdout();

    let shown = execute!(stdout, cursor::Show, DisableBracketedPaste);
    let left = if alternate_screen {
        execute!(stdout, LeaveAlternateScreen)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();

    shown.and(left).and(raw)
}

/// Restore the terminal assuming every feature was enabled.
pub fn restore_terminal() -> io::Result<()> {
    restore_terminal_impl(true)
}

fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

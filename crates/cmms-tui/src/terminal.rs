//! Terminal lifecycle for the login screen.
//!
//! `enter` switches to raw mode on the alternate screen; `leave` undoes it.
//! The runtime calls `leave` from `Drop` and the panic hook calls it before
//! the panic message is printed, so either path leaves a usable shell.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type LoginTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Takes over the terminal.
///
/// Raw mode delivers Ctrl+C as a key event. Bracketed paste lets a pasted
/// password arrive as one `Paste` event instead of a burst of keys.
///
/// # Errors
/// Returns an error if raw mode or the alternate screen cannot be entered.
pub fn enter() -> Result<LoginTerminal> {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = leave();
            previous(info);
        }));
    });

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Gives the terminal back. Safe to call more than once.
///
/// # Errors
/// Returns an error if the alternate screen or raw mode cannot be left.
pub fn leave() -> Result<()> {
    // Paste mode has to go while still in raw mode
    let _ = execute!(io::stdout(), DisableBracketedPaste);

    execute!(io::stdout(), LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")
}

//! Terminal lifecycle management.
//!
//! This module handles terminal setup, restore, and panic hooks.
//! Terminal state is guaranteed to be restored on:
//! - Normal exit (via Drop on the runtime)
//! - Panic

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Sets up the terminal for the shell.
///
/// - Enables raw mode
/// - Enters alternate screen
/// - Creates the terminal instance
///
/// Call `install_panic_hook()` before this to ensure terminal restore on panic.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores terminal state.
///
/// - Leaves alternate screen (while still in raw mode)
/// - Disables raw mode
///
/// This function is idempotent and safe to call multiple times.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
///
/// Call this BEFORE `setup_terminal()` to ensure terminal restore on panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    // Note: Terminal tests are difficult to run in CI since they require a real TTY.
    // Key guarantees to test manually:
    // - Terminal is restored on normal exit (via Drop)
    // - Terminal is restored on panic
}

//! Terminal lifecycle and the widget event loop.
//!
//! One cooperative loop drives everything: it keeps the mount container
//! tracking the terminal size, advances the runtime (bootstrap, timers,
//! animations), draws every instance, and polls input with a 100 ms
//! timeout until the user quits.

pub mod digits;
pub mod panel;
pub mod widget;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::runtime::WidgetRuntime;

/// Puts the terminal into raw mode on the alternate screen.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its normal state.
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Runs the widget loop until the user quits (q, Esc, or Ctrl+C).
pub fn run(
    runtime: &mut WidgetRuntime,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    container: &str,
) -> Result<()> {
    loop {
        // Keep the mount container tracking the terminal size
        let size = terminal.size().context("Failed to query terminal size")?;
        runtime.set_container(container, Rect::new(0, 0, size.width, size.height));

        runtime.tick(Utc::now().timestamp_millis());
        terminal.draw(|f| runtime.render(f))?;

        // Poll for input with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) || ctrl_c {
                    break;
                }
            }
        }
    }

    Ok(())
}

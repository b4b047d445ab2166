//! Terminal setup and teardown around the calendar loop.

use std::io;

use chrono::NaiveDate;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::config::DisplayConfig;
use crate::error::CalError;
use crate::store::Store;
use crate::tui::app::CalendarApp;

/// Initialise the terminal, run the interactive calendar, and restore the
/// terminal before reporting the loop's outcome. Errors raised inside the
/// loop surface only after the restore, so the shell is never left in raw
/// mode.
pub fn run_tui(store: Store, config: DisplayConfig, start: NaiveDate) -> Result<(), CalError> {
    let mut app = CalendarApp::new(store, config, start)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

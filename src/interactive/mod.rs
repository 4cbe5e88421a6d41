//! Interactive terminal UI for browsing the customer reports
//!
//! Switch reports and value units, inspect chart points through the tooltip
//! pane, and open any chart full screen.

pub mod app;
pub mod charts;
pub mod events;
pub mod messages;
pub mod panels;
pub mod ui;
pub mod utils;

pub use app::App;
pub use events::EventHandler;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Take over the terminal and run until the user quits
pub fn run_interactive(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore the terminal before reporting any error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "interactive session failed");
    }
    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let event_handler = EventHandler::new();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Some(event) = event_handler.next()? {
            if !app.handle_event(event)? {
                break;
            }
        }
    }

    tracing::info!("interactive session ended");
    Ok(())
}

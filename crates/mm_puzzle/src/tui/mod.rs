//! Terminal frontend for M&M Puzzle.

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{HOME_MENU, KeyOutcome, LEVEL_COLUMNS, RESULTS_MENU, map_key, menu_len};
pub use ui::draw;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tokio::time::{Duration, sleep};
use tracing::{error, info, instrument};

use crate::GameController;

/// Runs the terminal game until the player quits.
///
/// Sets up the terminal, drives the event loop, and restores the terminal
/// on exit even when the loop fails.
#[instrument(skip(controller))]
pub async fn run_tui(controller: GameController) -> Result<()> {
    info!("Starting terminal frontend");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(controller)).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Event loop: render, apply background events, read keys.
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| draw(f, &app))?;

        // Poll for input with short timeout to keep the loop responsive.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind != KeyEventKind::Release {
                app.handle_key(key.code);
            }
        }

        if app.should_quit() {
            info!("Player quit");
            return Ok(());
        }

        // Yield so spawned provider and timer tasks make progress.
        sleep(Duration::from_millis(10)).await;
    }
}

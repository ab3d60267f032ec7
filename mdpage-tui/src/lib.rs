//! mdpage TUI - terminal presentation layer
//!
//! This crate contains all ratatui/crossterm integration:
//! - App state wrapping a core reading session
//! - Event loop and input handling
//! - Rendering (page, contents sidebar, position gauge, status bar)
//! - Theme system and render cache

pub mod app;
pub mod input;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod ui;

#[cfg(feature = "watch")]
pub mod watcher;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use crate::input::Action;
use std::time::Duration;

// Re-export main types
pub use app::App;

/// Run the TUI application
pub fn run(mut app: App) -> Result<()> {
    terminal::install_panic_hook();
    let mut terminal = terminal::init().context("Failed to initialize terminal")?;

    let result = run_loop(&mut terminal, &mut app);

    // Always restore terminal, even if run_loop fails
    terminal::restore().context("Failed to restore terminal")?;

    result
}

fn run_loop(terminal: &mut terminal::Tui, app: &mut App) -> Result<()> {
    loop {
        // Gauge and status bar take a row each, page borders two more
        let viewport_height = usize::from(terminal.size()?.height.saturating_sub(4));

        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("Failed to draw frame")?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(100)).context("Failed to poll events")? {
            if let Event::Key(key) = crossterm::event::read().context("Failed to read event")? {
                // Only handle key press events, ignore release
                if key.kind == KeyEventKind::Press
                    && input::handle_input(app, key, viewport_height) == Action::Quit
                {
                    break;
                }
            }
        }

        #[cfg(feature = "watch")]
        {
            let changed = app
                .watcher
                .as_mut()
                .is_some_and(|watcher| watcher.poll_changed());
            if changed {
                let auto_reload = app.config.watch.auto_reload;
                app.on_file_changed(auto_reload);
            }
        }
    }

    Ok(())
}

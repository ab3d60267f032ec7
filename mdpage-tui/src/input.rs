//! Input handling and keybindings

use crate::app::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Handle a key event; `viewport_height` sizes the half-page scroll commands
pub fn handle_input(app: &mut App, key: KeyEvent, viewport_height: usize) -> Action {
    // Messages last until the next keystroke, except while typing a page number
    if !matches!(key.code, KeyCode::Modifier(_)) && app.goto_input.is_none() {
        app.clear_status_message();
    }

    if matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    ) {
        app.quit();
        return Action::Quit;
    }

    // Help overlay swallows everything except its close keys
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return Action::Continue;
    }

    if app.goto_input.is_some() {
        handle_goto_key(app, key);
        return Action::Continue;
    }

    let half_page = u16::try_from(viewport_height / 2).unwrap_or(u16::MAX).max(1);

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('d') => app.scroll_down(half_page),
            KeyCode::Char('u') => app.scroll_up(half_page),
            _ => {}
        }
        return Action::Continue;
    }

    if app.focus == Focus::Sidebar && handle_sidebar_key(app, key) {
        return Action::Continue;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return Action::Quit;
        }

        // Page navigation
        KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Char(' ') | KeyCode::Right | KeyCode::PageDown => {
            app.next_page();
        }
        KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Backspace | KeyCode::Left | KeyCode::PageUp => {
            app.prev_page();
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.first_page();
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.last_page();
        }
        KeyCode::Char(':') => app.start_goto(None),
        KeyCode::Char(c) if c.is_ascii_digit() => app.start_goto(Some(c)),

        // Scrolling within the page
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),

        // Sidebar
        KeyCode::Char('t') => app.toggle_sidebar(),
        KeyCode::Tab => app.toggle_focus(),

        KeyCode::Char('T') => app.toggle_theme(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('r') => {
            if let Err(e) = app.reload_document() {
                app.set_status_message(format!("Reload failed: {e}"));
            }
        }
        _ => {}
    }

    Action::Continue
}

/// Keys specific to the sidebar list; returns false to fall through to page keys
fn handle_sidebar_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.sidebar_down(),
        KeyCode::Char('k') | KeyCode::Up => app.sidebar_up(),
        KeyCode::Enter => {
            app.sidebar_confirm();
            app.focus = Focus::Page;
        }
        KeyCode::Esc => app.focus = Focus::Page,
        _ => return false,
    }
    true
}

fn handle_goto_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_goto(),
        KeyCode::Esc => app.cancel_goto(),
        KeyCode::Backspace => app.goto_backspace(),
        KeyCode::Char(c) => app.goto_push(c),
        _ => {}
    }
}

//! Integration tests for mdpage-tui
//!
//! These tests exercise the application flow end-to-end: loading a
//! document, paging through it, the contents sidebar, the go-to prompt,
//! rendering and reloading from disk.

use mdpage_core::config::ThemeVariant;
use mdpage_core::{load_document, Config, Document, NavState, Session, Strategy, Transition};
use mdpage_tui::render::line_text;
use mdpage_tui::App;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::io::Write as _;
use tempfile::NamedTempFile;

/// Helper to create a test app from inline text
fn create_test_app(content: &str) -> App {
    App::new(Config::default(), load_document(content))
}

/// Helper to create a test app backed by a file
/// Returns (App, NamedTempFile) - keep the file alive for the duration of the test
fn create_file_app(content: &str) -> (App, NamedTempFile) {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write test content");
    file.flush().expect("Failed to flush");

    let doc = Document::load(file.path()).expect("Failed to load test document");
    #[allow(unused_mut)]
    let mut config = Config::default();
    #[cfg(feature = "watch")]
    {
        config.watch.enabled = false;
    }
    (App::new(config, Session::new(doc)), file)
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn integration_app_initialization() {
    let app = create_test_app("Intro\n---\nChapter 1\n---\nChapter 2");

    assert!(!app.should_quit);
    assert_eq!(app.page_count(), 3);
    assert_eq!(app.current_page(), 0);
    assert!(!app.sidebar_visible());
    assert_eq!(app.session.nav(), NavState::initial());
    assert_eq!(
        app.session.labels(),
        ["1. Intro", "2. Chapter 1", "3. Chapter 2"]
    );
}

#[test]
fn integration_next_stops_at_end() {
    let mut app = create_test_app("# A\none\n# B\ntwo\n# C\nthree\n");

    assert_eq!(app.next_page(), Transition::Changed);
    assert_eq!(app.next_page(), Transition::Changed);
    assert_eq!(app.next_page(), Transition::Unchanged);
    assert_eq!(app.current_page(), 2);

    assert_eq!(app.first_page(), Transition::Changed);
    assert_eq!(app.prev_page(), Transition::Unchanged);
    assert_eq!(app.current_page(), 0);
}

#[test]
fn integration_page_change_resets_scroll() {
    let mut body = String::from("# First\n");
    for i in 0..50 {
        body.push_str(&format!("line {i}\n"));
    }
    body.push_str("# Second\n");
    let mut app = create_test_app(&body);

    app.scroll_down(10);
    assert_eq!(app.scroll, 10);

    app.next_page();
    assert_eq!(app.scroll, 0);
}

#[test]
fn integration_scroll_reaches_end_of_wrapped_paragraph() {
    let mut body = String::from("# A\n");
    body.push_str(&"word ".repeat(399));
    body.push_str("END\n# B\n");
    let mut app = create_test_app(&body);

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
    terminal
        .draw(|frame| mdpage_tui::ui::draw(frame, &mut app))
        .expect("draw");
    assert!(!screen_text(&terminal).contains("END"));

    // Heading, blank row and 27 wrapped rows in a 20-row pane
    app.scroll_down(1000);
    assert_eq!(app.page_rows(), 29);
    assert_eq!(app.scroll, 9);

    terminal
        .draw(|frame| mdpage_tui::ui::draw(frame, &mut app))
        .expect("draw");
    assert!(screen_text(&terminal).contains("END"));
    assert_eq!(app.scroll, 9);
}

#[test]
fn integration_boundary_navigation_reports() {
    let mut app = create_test_app("# A\n# B\n");
    app.prev_page();
    assert_eq!(app.status_message.as_deref(), Some("Already on the first page"));

    app.last_page();
    app.next_page();
    assert_eq!(app.status_message.as_deref(), Some("Already on the last page"));
}

#[test]
fn integration_jump_out_of_range() {
    let mut app = create_test_app("# A\n# B\n");
    app.next_page();

    assert!(app.jump_to_page(2).is_err());
    assert_eq!(app.current_page(), 1);
    assert_eq!(app.jump_to_page(0), Ok(Transition::Changed));
}

#[test]
fn integration_goto_zero_is_rejected() {
    let mut app = create_test_app("# A\n# B\n");
    app.start_goto(Some('0'));
    app.submit_goto();

    assert_eq!(app.current_page(), 0);
    assert!(app
        .status_message
        .as_deref()
        .is_some_and(|m| m.contains("from 1 to 2")));
}

#[test]
fn integration_select_label_first_match() {
    let mut app = create_test_app("**Same**\na\n**Other**\nb\n**Same**\nc\n");
    assert_eq!(app.session.strategy(), Strategy::BoldLabel);

    app.last_page();
    assert_eq!(app.select_label("1. Same"), Ok(Transition::Changed));
    assert_eq!(app.current_page(), 0);
    assert_eq!(app.select_label("Same"), Ok(Transition::Unchanged));
}

#[test]
fn integration_sidebar_toggle() {
    let mut app = create_test_app("# A\n# B\n# C\n");
    app.next_page();

    app.toggle_sidebar();
    assert!(app.sidebar_visible());
    assert_eq!(app.sidebar_selected, 1);

    app.toggle_focus();
    app.sidebar_down();
    app.sidebar_confirm();
    assert_eq!(app.current_page(), 2);

    app.toggle_sidebar();
    assert!(!app.sidebar_visible());
    assert_eq!(app.focus, mdpage_tui::app::Focus::Page);
}

#[test]
fn integration_theme_toggle() {
    let mut app = create_test_app("# Test\n");

    let initial = app.theme_variant;
    app.toggle_theme();
    assert_ne!(app.theme_variant, initial);
    assert_eq!(app.theme_variant, ThemeVariant::Light);

    app.toggle_theme();
    assert_eq!(app.theme_variant, initial);
}

#[test]
fn integration_rendered_page_follows_navigation() {
    let mut app = create_test_app("# Alpha\nfirst\n# Beta\nsecond\n");

    let first: Vec<String> = app.rendered_page().iter().map(line_text).collect();
    assert_eq!(first, vec!["Alpha", "", "first"]);

    app.next_page();
    let second: Vec<String> = app.rendered_page().iter().map(line_text).collect();
    assert_eq!(second, vec!["Beta", "", "second"]);
    assert_eq!(app.render_cache.len(), 2);
}

#[test]
fn integration_draw_shows_page_and_sidebar() {
    let mut app = create_test_app("# Alpha\nfirst page\n# Beta\nsecond page\n");
    app.toggle_sidebar();

    let mut terminal = Terminal::new(TestBackend::new(80, 12)).expect("terminal");
    terminal
        .draw(|frame| mdpage_tui::ui::draw(frame, &mut app))
        .expect("draw");

    let screen = screen_text(&terminal);
    assert!(screen.contains("Contents"));
    assert!(screen.contains("1. Alpha"));
    assert!(screen.contains("2. Beta"));
    assert!(screen.contains("first page"));
    assert!(screen.contains("page 1/2"));
}

#[test]
fn integration_draw_help_overlay() {
    let mut app = create_test_app("text");
    app.toggle_help();

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
    terminal
        .draw(|frame| mdpage_tui::ui::draw(frame, &mut app))
        .expect("draw");

    assert!(screen_text(&terminal).contains("toggle contents sidebar"));
}

#[test]
fn integration_empty_document() {
    let mut app = create_test_app("");

    assert_eq!(app.page_count(), 1);
    assert_eq!(app.session.labels(), ["1. "]);
    assert!(app.rendered_page().is_empty());
    assert_eq!(app.next_page(), Transition::Unchanged);
}

#[test]
fn integration_reload_resets_navigation() {
    let (mut app, mut file) = create_file_app("# A\n# B\n");
    app.next_page();
    app.toggle_sidebar();

    file.write_all(b"# C\n").expect("append");
    file.flush().expect("flush");

    app.on_file_changed(true);
    assert_eq!(app.page_count(), 3);
    assert_eq!(app.current_page(), 0);
    assert!(!app.sidebar_visible());
    assert!(!app.dirty_on_disk);
}

#[test]
fn integration_change_without_auto_reload_marks_dirty() {
    let (mut app, _file) = create_file_app("# A\n# B\n");

    app.on_file_changed(false);
    assert!(app.dirty_on_disk);
    assert_eq!(app.page_count(), 2);

    app.reload_document().expect("reload");
    assert!(!app.dirty_on_disk);
}

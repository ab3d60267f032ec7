//! UI rendering

use crate::app::{App, Focus};
use mdpage_core::config::{SidebarSide, ThemeVariant};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

const HELP_LINES: &[(&str, &str)] = &[
    ("n l Space → PgDn", "next page"),
    ("p h Bksp ← PgUp", "previous page"),
    ("g Home / G End", "first / last page"),
    (": or digits", "go to page number"),
    ("j k ↓ ↑", "scroll page (sidebar: move)"),
    ("Ctrl-d / Ctrl-u", "scroll half a screen"),
    ("t", "toggle contents sidebar"),
    ("Tab", "focus sidebar / page"),
    ("Enter", "open selected sidebar entry"),
    ("T", "toggle theme"),
    ("r", "reload from disk"),
    ("q Ctrl-c", "quit"),
];

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Page and sidebar
            Constraint::Length(1), // Position gauge
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let page_area = if app.sidebar_visible() {
        let width = app.config.sidebar.width.min(chunks[0].width / 2);
        let (constraints, sidebar_slot, page_slot) = match app.config.sidebar.side {
            SidebarSide::Left => ([Constraint::Length(width), Constraint::Min(1)], 0, 1),
            SidebarSide::Right => ([Constraint::Min(1), Constraint::Length(width)], 1, 0),
        };
        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(chunks[0]);

        render_sidebar(frame, app, main_chunks[sidebar_slot]);
        main_chunks[page_slot]
    } else {
        chunks[0]
    };

    render_page(frame, app, page_area);
    render_gauge(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        render_help(frame, app);
    }
}

fn border_style(app: &App, focused: bool) -> Style {
    if focused {
        Style::default().fg(app.theme.focus_border)
    } else {
        Style::default().fg(app.theme.border)
    }
}

fn render_page(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(" {} ", app.session.current_label());
    let focused = app.focus == Focus::Page && app.sidebar_visible();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app, focused))
        .title(title);
    let inner = block.inner(area);
    app.set_page_viewport(inner.width, inner.height);
    let base = app.theme.base;
    let scroll = app.scroll;

    let lines = app.rendered_page().to_vec();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(base)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.current_page();
    let focused = app.focus == Focus::Sidebar;
    // Borders take two columns
    let text_width = usize::from(area.width.saturating_sub(2));

    let items: Vec<ListItem> = app
        .session
        .labels()
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let style = if idx == current {
                app.theme.sidebar_current
            } else {
                app.theme.base
            };
            ListItem::new(Line::from(fit_width(label, text_width))).style(style)
        })
        .collect();

    let title = if focused { "Contents [focused]" } else { "Contents" };
    let highlight = if focused {
        app.theme.sidebar_cursor
    } else {
        Style::default()
    };
    let selected = if focused { app.sidebar_selected } else { current };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app, focused))
                .title(title),
        )
        .highlight_style(highlight);

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.page_count().max(1);
    let position = app.current_page() + 1;
    let ratio = position as f64 / count as f64;

    let gauge = LineGauge::default()
        .filled_style(app.theme.gauge_filled)
        .unfilled_style(app.theme.gauge_unfilled)
        .label(format!(" {position}/{count} "))
        .ratio(ratio.clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bar_style = Style::default()
        .fg(app.theme.status_bar_fg)
        .bg(app.theme.status_bar_bg)
        .add_modifier(Modifier::BOLD);

    if let Some(input) = &app.goto_input {
        let prompt = format!(" Go to page (1-{}): {}_", app.page_count(), input);
        frame.render_widget(Paragraph::new(Line::from(Span::styled(prompt, bar_style))), area);
        return;
    }

    let text = status_text(app);
    let mut spans = vec![Span::styled(text, bar_style)];
    if let Some(message) = &app.status_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(message.clone(), app.theme.status_message));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Status bar summary: file, position, strategy and mode flags
pub fn status_text(app: &App) -> String {
    let sidebar_str = match (app.sidebar_visible(), app.focus) {
        (true, Focus::Sidebar) => "  [TOC*]",
        (true, Focus::Page) => "  [TOC]",
        (false, _) => "",
    };

    let theme_str = match app.theme_variant {
        ThemeVariant::Dark => "DARK",
        ThemeVariant::Light => "LIGHT",
    };

    #[cfg(feature = "watch")]
    let watch_str = match &app.watcher {
        _ if app.dirty_on_disk => "  [DIRTY]",
        Some(watcher) if watcher.has_pending() => "  [WATCH*]",
        Some(_) => "  [WATCH]",
        None => "",
    };
    #[cfg(not(feature = "watch"))]
    let watch_str = if app.dirty_on_disk { "  [DIRTY]" } else { "" };

    format!(
        " mdpage  {}  page {}/{}  [{}]{}  [{}]{} ",
        app.session.doc().display_name(),
        app.current_page() + 1,
        app.page_count(),
        app.session.strategy(),
        sidebar_str,
        theme_str,
        watch_str
    )
}

/// Clip `text` to `width` terminal columns, marking the cut with `…`
pub fn fit_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

fn render_help(frame: &mut Frame, app: &App) {
    let height = u16::try_from(HELP_LINES.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect(52, height, frame.area());

    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!(" {keys:<20}"), app.theme.heading[1]),
                Span::styled(*what, app.theme.base),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.focus_border))
            .title(" Help (Esc to close) "),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

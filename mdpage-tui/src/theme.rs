//! Theme system for dark/light modes

use mdpage_core::config::ThemeVariant;
use ratatui::style::{Color, Modifier, Style};

/// Theme definition
#[derive(Clone, Debug)]
pub struct Theme {
    pub base: Style,
    pub heading: [Style; 6],
    pub code: Style,
    pub link: Style,
    pub quote: Style,
    pub list_marker: Style,
    pub rule: Style,
    pub border: Color,
    pub focus_border: Color,
    pub sidebar_current: Style,
    pub sidebar_cursor: Style,
    pub gauge_filled: Style,
    pub gauge_unfilled: Style,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub status_message: Style,
}

impl Theme {
    /// Create a theme for the given variant
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        Self {
            base: Style::default().fg(Color::White),
            heading: [
                bold(Color::LightBlue),
                bold(Color::LightCyan),
                bold(Color::LightGreen),
                bold(Color::LightYellow),
                bold(Color::LightMagenta),
                bold(Color::Gray),
            ],
            code: Style::default().fg(Color::Yellow),
            link: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
            quote: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            list_marker: Style::default().fg(Color::LightRed),
            rule: Style::default().fg(Color::DarkGray),
            border: Color::DarkGray,
            focus_border: Color::LightCyan,
            sidebar_current: bold(Color::LightCyan),
            sidebar_cursor: Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            gauge_filled: Style::default().fg(Color::LightBlue),
            gauge_unfilled: Style::default().fg(Color::DarkGray),
            status_bar_fg: Color::Black,
            status_bar_bg: Color::LightBlue,
            status_message: bold(Color::LightYellow),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        Self {
            base: Style::default().fg(Color::Black),
            heading: [
                bold(Color::Blue),
                bold(Color::Cyan),
                bold(Color::Green),
                bold(Color::Rgb(150, 100, 0)), // Dark yellow
                bold(Color::Magenta),
                bold(Color::DarkGray),
            ],
            code: Style::default().fg(Color::Rgb(150, 75, 0)), // Orange-brown
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            quote: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            list_marker: Style::default().fg(Color::Red),
            rule: Style::default().fg(Color::Gray),
            border: Color::Gray,
            focus_border: Color::Blue,
            sidebar_current: bold(Color::Blue),
            sidebar_cursor: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            gauge_filled: Style::default().fg(Color::Blue),
            gauge_unfilled: Style::default().fg(Color::Gray),
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
            status_message: bold(Color::Red),
        }
    }

    /// Style for a heading of the given level (1-based, clamped to 1..=6)
    pub fn heading_style(&self, level: usize) -> Style {
        self.heading[level.clamp(1, 6) - 1]
    }
}

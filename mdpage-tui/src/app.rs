//! Application state

use crate::render::{wrapped_rows, RenderKey, RendererCache};
use crate::theme::Theme;
use mdpage_core::config::ThemeVariant;
use mdpage_core::{Config, NavError, Session, Transition};
use ratatui::text::Line;

#[cfg(feature = "watch")]
use crate::watcher::FileWatcher;

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    Sidebar,
}

/// Main application state
pub struct App {
    pub config: Config,
    pub session: Session,
    pub theme: Theme,
    pub theme_variant: ThemeVariant,
    pub focus: Focus,
    /// Cursor in the sidebar list, independent of the current page until confirmed
    pub sidebar_selected: usize,
    /// Scroll offset within the current page, in wrapped screen rows
    pub scroll: u16,
    /// Inner width and height of the page pane from the last draw, zero before it
    pub page_viewport: (u16, u16),
    /// Digits typed into the go-to-page prompt, if it is open
    pub goto_input: Option<String>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    pub dirty_on_disk: bool,
    pub render_cache: RendererCache,
    #[cfg(feature = "watch")]
    pub watcher: Option<FileWatcher>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, session: Session) -> Self {
        let theme_variant = config.theme;

        #[cfg(feature = "watch")]
        let watcher = if config.watch.enabled {
            session.doc().path().and_then(|path| {
                let debounce = std::time::Duration::from_millis(config.watch.debounce_ms);
                FileWatcher::new(path, debounce)
                    .map_err(|e| log::warn!("file watching disabled: {e:#}"))
                    .ok()
            })
        } else {
            None
        };
        #[cfg(feature = "watch")]
        {
            if let Some(watcher) = &watcher {
                log::debug!("watching {}", watcher.path().display());
            }
        }

        Self {
            config,
            session,
            theme: Theme::for_variant(theme_variant),
            theme_variant,
            focus: Focus::Page,
            sidebar_selected: 0,
            scroll: 0,
            page_viewport: (0, 0),
            goto_input: None,
            status_message: None,
            show_help: false,
            should_quit: false,
            dirty_on_disk: false,
            render_cache: RendererCache::new(),
            #[cfg(feature = "watch")]
            watcher,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn current_page(&self) -> usize {
        self.session.current_index()
    }

    pub fn page_count(&self) -> usize {
        self.session.page_count()
    }

    pub fn sidebar_visible(&self) -> bool {
        self.session.nav().sidebar_visible
    }

    /// Rendered lines of the current page
    pub fn rendered_page(&mut self) -> &[Line<'static>] {
        let key = RenderKey {
            doc_rev: self.session.rev(),
            page: self.session.current_index(),
            theme: self.theme_variant,
        };
        self.render_cache
            .get_or_render(key, self.session.current_page(), &self.theme)
    }

    fn page_changed(&mut self, transition: Transition) -> Transition {
        if transition.is_changed() {
            self.scroll = 0;
            self.sidebar_selected = self.session.current_index();
        }
        transition
    }

    pub fn next_page(&mut self) -> Transition {
        let t = self.session.next();
        if !t.is_changed() && self.session.pager().is_last() {
            self.set_status_message("Already on the last page");
        }
        self.page_changed(t)
    }

    pub fn prev_page(&mut self) -> Transition {
        let t = self.session.prev();
        if !t.is_changed() && self.session.pager().is_first() {
            self.set_status_message("Already on the first page");
        }
        self.page_changed(t)
    }

    pub fn first_page(&mut self) -> Transition {
        let t = self.session.first();
        self.page_changed(t)
    }

    pub fn last_page(&mut self) -> Transition {
        let t = self.session.last();
        self.page_changed(t)
    }

    /// Jump to a 0-based page index
    pub fn jump_to_page(&mut self, index: usize) -> Result<Transition, NavError> {
        let t = self.session.jump_to(index)?;
        Ok(self.page_changed(t))
    }

    /// Jump to the first page carrying `label`
    pub fn select_label(&mut self, label: &str) -> Result<Transition, NavError> {
        let t = self.session.select_by_label(label)?;
        Ok(self.page_changed(t))
    }

    pub fn toggle_sidebar(&mut self) {
        self.session.toggle_sidebar();
        if self.sidebar_visible() {
            self.sidebar_selected = self.session.current_index();
        } else {
            self.focus = Focus::Page;
        }
    }

    /// Switch keyboard focus between page and sidebar (only while the sidebar is shown)
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Page if self.sidebar_visible() => Focus::Sidebar,
            _ => Focus::Page,
        };
    }

    pub fn sidebar_up(&mut self) {
        self.sidebar_selected = self.sidebar_selected.saturating_sub(1);
    }

    pub fn sidebar_down(&mut self) {
        let last = self.page_count().saturating_sub(1);
        self.sidebar_selected = (self.sidebar_selected + 1).min(last);
    }

    /// Open the page under the sidebar cursor
    pub fn sidebar_confirm(&mut self) {
        if let Err(e) = self.jump_to_page(self.sidebar_selected) {
            self.set_status_message(e.to_string());
        }
    }

    /// Record the page pane size and keep the scroll offset inside the page
    pub fn set_page_viewport(&mut self, width: u16, height: u16) {
        if self.page_viewport != (width, height) {
            self.page_viewport = (width, height);
            self.scroll = self.scroll.min(self.max_scroll());
        }
    }

    /// Screen rows of the current page at the last drawn width
    pub fn page_rows(&mut self) -> usize {
        let width = usize::from(self.page_viewport.0);
        let lines = self.rendered_page();
        if width == 0 {
            return lines.len();
        }
        lines.iter().map(|line| wrapped_rows(line, width)).sum()
    }

    /// Largest offset that still leaves the last row on screen
    fn max_scroll(&mut self) -> u16 {
        let height = usize::from(self.page_viewport.1).max(1);
        let max = self.page_rows().saturating_sub(height);
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.max_scroll();
        self.scroll = self.scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Open the go-to-page prompt, optionally seeded with a first digit
    pub fn start_goto(&mut self, first: Option<char>) {
        self.goto_input = Some(first.map(String::from).unwrap_or_default());
    }

    pub fn goto_push(&mut self, c: char) {
        if let Some(input) = self.goto_input.as_mut() {
            if c.is_ascii_digit() && input.len() < 9 {
                input.push(c);
            }
        }
    }

    pub fn goto_backspace(&mut self) {
        if let Some(input) = self.goto_input.as_mut() {
            input.pop();
        }
    }

    pub fn cancel_goto(&mut self) {
        self.goto_input = None;
    }

    /// Close the prompt and jump to the typed 1-based page number
    pub fn submit_goto(&mut self) {
        let Some(input) = self.goto_input.take() else {
            return;
        };
        if input.is_empty() {
            return;
        }

        let count = self.page_count();
        match input.parse::<usize>() {
            Ok(0) | Err(_) => {
                self.set_status_message(format!("Page numbers run from 1 to {count}"));
            }
            Ok(position) => {
                if self.jump_to_page(position - 1).is_err() {
                    self.set_status_message(format!("No page {position} (document has {count} pages)"));
                }
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_variant = self.theme_variant.toggled();
        self.theme = Theme::for_variant(self.theme_variant);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Re-read the document from disk, resetting navigation if it changed
    pub fn reload_document(&mut self) -> anyhow::Result<()> {
        let changed = self.session.reload()?;
        self.dirty_on_disk = false;
        if changed {
            if !self.render_cache.is_empty() {
                log::debug!("dropping {} rendered pages", self.render_cache.len());
                self.render_cache.clear();
            }
            self.scroll = 0;
            self.sidebar_selected = 0;
            self.focus = Focus::Page;
            self.set_status_message(format!("Reloaded ({} pages)", self.page_count()));
        }
        Ok(())
    }

    /// Handle a settled change of the document on disk
    pub fn on_file_changed(&mut self, auto_reload: bool) {
        if !auto_reload {
            self.dirty_on_disk = true;
            self.set_status_message("File changed on disk, press r to reload");
            return;
        }
        if let Err(e) = self.reload_document() {
            log::warn!("reload failed: {e:#}");
            self.set_status_message(format!("Reload failed: {e}"));
        }
    }
}

//! Markdown page rendering and the rendered-page cache

use crate::theme::Theme;
use mdpage_core::config::ThemeVariant;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use std::num::NonZeroUsize;
use unicode_width::UnicodeWidthStr;

const CACHE_PAGES: usize = 32;

/// Key for render cache
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub struct RenderKey {
    pub doc_rev: u64,
    pub page: usize,
    pub theme: ThemeVariant,
}

/// LRU cache of rendered pages
pub struct RendererCache {
    cache: lru::LruCache<RenderKey, Vec<Line<'static>>>,
}

impl RendererCache {
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(CACHE_PAGES).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: lru::LruCache::new(capacity),
        }
    }

    /// Rendered lines for `key`, rendering `source` on a miss
    pub fn get_or_render(&mut self, key: RenderKey, source: &str, theme: &Theme) -> &[Line<'static>] {
        self.cache
            .get_or_insert(key, || render_markdown(source, theme))
            .as_slice()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for RendererCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates spans into lines, applying block-quote gutters on flush
struct LineBuilder<'t> {
    theme: &'t Theme,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    quote_depth: usize,
}

impl<'t> LineBuilder<'t> {
    fn new(theme: &'t Theme) -> Self {
        Self {
            theme,
            lines: Vec::new(),
            spans: Vec::new(),
            quote_depth: 0,
        }
    }

    fn push(&mut self, span: Span<'static>) {
        self.spans.push(span);
    }

    /// Finish the current line if it has content
    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.break_line();
        }
    }

    /// Finish the current line, even if empty
    fn break_line(&mut self) {
        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled("│ ".repeat(self.quote_depth), self.theme.quote));
        }
        spans.append(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    /// Separate blocks with a single empty line
    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Convert one page of markdown into styled terminal lines
pub fn render_markdown(source: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut out = LineBuilder::new(theme);
    let mut heading_level: Option<usize> = None;
    let mut in_code_block = false;
    let mut in_bold = false;
    let mut in_italic = false;
    let mut in_link = false;
    // One entry per open list: Some(next number) for ordered lists
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new(source) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    out.flush();
                    heading_level = Some(level as usize);
                }
                Tag::CodeBlock(_) => {
                    out.flush();
                    in_code_block = true;
                }
                Tag::BlockQuote(_) => {
                    out.flush();
                    out.quote_depth += 1;
                }
                Tag::List(start) => {
                    out.flush();
                    lists.push(start);
                }
                Tag::Item => {
                    out.flush();
                    let indent = "  ".repeat(lists.len().saturating_sub(1));
                    let marker = match lists.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{indent}{n}. ");
                            *n += 1;
                            marker
                        }
                        _ => format!("{indent}• "),
                    };
                    out.push(Span::styled(marker, theme.list_marker));
                }
                Tag::Strong => in_bold = true,
                Tag::Emphasis => in_italic = true,
                Tag::Link { .. } => in_link = true,
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Heading(_) => {
                    heading_level = None;
                    out.blank();
                }
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    out.blank();
                }
                TagEnd::BlockQuote(_) => {
                    out.flush();
                    out.quote_depth = out.quote_depth.saturating_sub(1);
                    out.blank();
                }
                TagEnd::List(_) => {
                    lists.pop();
                    if lists.is_empty() {
                        out.blank();
                    }
                }
                TagEnd::Item => out.flush(),
                TagEnd::Paragraph => {
                    if lists.is_empty() {
                        out.blank();
                    } else {
                        out.flush();
                    }
                }
                TagEnd::Strong => in_bold = false,
                TagEnd::Emphasis => in_italic = false,
                TagEnd::Link => in_link = false,
                _ => {}
            },
            Event::Text(text) => {
                let style = if let Some(level) = heading_level {
                    theme.heading_style(level)
                } else if in_code_block {
                    theme.code
                } else {
                    let mut style = if in_link { theme.link } else { theme.base };
                    if in_bold {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    if in_italic {
                        style = style.add_modifier(Modifier::ITALIC);
                    }
                    if out.quote_depth > 0 {
                        style = style.patch(theme.quote);
                    }
                    style
                };

                if in_code_block {
                    // Code block text carries its own newlines; keep every line,
                    // including blank ones.
                    for line in text.lines() {
                        out.push(Span::styled(format!("    {line}"), style));
                        out.break_line();
                    }
                } else {
                    for (i, part) in text.split('\n').enumerate() {
                        if i > 0 {
                            out.flush();
                        }
                        if !part.is_empty() {
                            out.push(Span::styled(part.to_string(), style));
                        }
                    }
                }
            }
            Event::Code(code) => {
                out.push(Span::styled(code.to_string(), theme.code));
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                for (i, part) in html.trim_end_matches('\n').split('\n').enumerate() {
                    if i > 0 {
                        out.flush();
                    }
                    out.push(Span::styled(part.to_string(), theme.base));
                }
            }
            Event::SoftBreak | Event::HardBreak => out.flush(),
            Event::Rule => {
                out.flush();
                out.push(Span::styled("─".repeat(40), theme.rule));
                out.blank();
            }
            _ => {}
        }
    }

    out.finish()
}

/// Plain text of a rendered line
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

/// Screen rows `line` takes when word-wrapped to `width` columns
///
/// Mirrors the greedy word wrapping of `Paragraph` with `Wrap { trim: false }`:
/// a word that does not fit starts a new row, a word wider than the row is
/// broken across rows, and spaces at a row break take no room.
pub fn wrapped_rows(line: &Line<'_>, width: usize) -> usize {
    if width == 0 {
        return 1;
    }

    let text = line_text(line);
    let mut rows = 1;
    let mut used = 0;
    for word in text.split_inclusive(' ') {
        let visible = word.trim_end_matches(' ').width();
        let spaces = word.width() - visible;

        if used > 0 && used + visible > width {
            rows += 1;
            used = 0;
        }
        used += visible;
        while used > width {
            rows += 1;
            used -= width;
        }
        used = (used + spaces).min(width);
    }
    rows
}

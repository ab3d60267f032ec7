//! Page segmentation
//!
//! A document is split into pages by trying a fixed list of separator
//! strategies in priority order. The first strategy that yields more than
//! one page wins; if none does, the whole document is a single page.

use std::fmt;

/// The separator line consumed by [`Strategy::ExplicitSeparator`].
pub const EXPLICIT_SEPARATOR: &str = "---\n";

/// How a document was split into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Split on lines consisting of exactly `---`; separator lines are dropped.
    ExplicitSeparator,
    /// A `#`-heading line starts a new page.
    Heading,
    /// A line wrapped in `**` starts a new page.
    BoldLabel,
    /// No separator matched; the whole document is one page.
    Fallback,
}

impl Strategy {
    fn as_str(&self) -> &'static str {
        match self {
            Strategy::ExplicitSeparator => "separator",
            Strategy::Heading => "heading",
            Strategy::BoldLabel => "bold",
            Strategy::Fallback => "single",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a matching line is treated when building pages.
#[derive(Clone, Copy)]
enum Boundary {
    /// The line ends the current page and is not kept.
    Consume,
    /// The line opens a new page and belongs to it.
    Open,
}

struct SplitRule {
    strategy: Strategy,
    boundary: Boundary,
    matches: fn(&str) -> bool,
}

/// Strategies in the order they are tried.
const SPLIT_RULES: [SplitRule; 3] = [
    SplitRule {
        strategy: Strategy::ExplicitSeparator,
        boundary: Boundary::Consume,
        matches: is_explicit_separator,
    },
    SplitRule {
        strategy: Strategy::Heading,
        boundary: Boundary::Open,
        matches: is_heading_line,
    },
    SplitRule {
        strategy: Strategy::BoldLabel,
        boundary: Boundary::Open,
        matches: is_bold_label_line,
    },
];

/// Result of segmenting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub strategy: Strategy,
    pub pages: Vec<String>,
}

/// Split `text` into pages. Never fails and never returns an empty vector.
pub fn segment(text: &str) -> Vec<String> {
    segment_with_strategy(text).pages
}

/// Split `text` into pages and report which strategy produced them.
pub fn segment_with_strategy(text: &str) -> Segmentation {
    for rule in &SPLIT_RULES {
        let pages = split_lines(text, rule);
        if pages.len() > 1 {
            log::debug!("segmented by {} into {} pages", rule.strategy, pages.len());
            return Segmentation {
                strategy: rule.strategy,
                pages,
            };
        }
    }

    log::debug!("no separator matched, using a single page");
    Segmentation {
        strategy: Strategy::Fallback,
        pages: vec![text.to_string()],
    }
}

fn split_lines(text: &str, rule: &SplitRule) -> Vec<String> {
    let mut pages = Vec::new();
    let mut current = String::new();

    // `split_inclusive` keeps line terminators, so pages concatenate back
    // into the original text.
    for line in text.split_inclusive('\n') {
        if !(rule.matches)(line) {
            current.push_str(line);
            continue;
        }

        match rule.boundary {
            Boundary::Consume => {
                pages.push(std::mem::take(&mut current));
            }
            Boundary::Open => {
                if !current.is_empty() {
                    pages.push(std::mem::take(&mut current));
                }
                current.push_str(line);
            }
        }
    }

    match rule.boundary {
        // Every separator closes a page, so the tail is a page even if empty.
        Boundary::Consume => pages.push(current),
        Boundary::Open => {
            if !current.is_empty() || pages.is_empty() {
                pages.push(current);
            }
        }
    }

    pages
}

/// Strip a trailing `\n` or `\r\n` from a line produced by `split_inclusive`.
fn line_content(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn is_explicit_separator(line: &str) -> bool {
    line == EXPLICIT_SEPARATOR
}

/// `#`-run, then whitespace, then anything (including nothing).
pub(crate) fn is_heading_line(line: &str) -> bool {
    let content = line_content(line);
    let rest = content.trim_start_matches('#');
    rest.len() < content.len() && rest.starts_with(char::is_whitespace)
}

fn is_bold_label_line(line: &str) -> bool {
    bold_inner(line_content(line)).is_some()
}

/// Text between a leading and trailing `**` pair, if the line has both.
pub(crate) fn bold_inner(line: &str) -> Option<&str> {
    line.strip_prefix("**")?.strip_suffix("**")
}

//! Page label extraction

use crate::segment::bold_inner;

/// Maximum number of characters kept from a page's first line.
pub const MAX_LABEL_CHARS: usize = 30;

/// Appended to labels that were cut at [`MAX_LABEL_CHARS`].
pub const ELLIPSIS: &str = "...";

/// Derive the table-of-contents label for the page at `index` (0-based).
///
/// The first non-blank line of the page is stripped of heading hashes or a
/// surrounding `**` pair, then of a trailing colon, cut to
/// [`MAX_LABEL_CHARS`] and numbered from 1. Identical labels are possible.
pub fn extract_label(page: &str, index: usize) -> String {
    let first_line = page.trim().lines().next().unwrap_or("");
    let title = truncate(strip_decorators(first_line));
    format!("{}. {}", index + 1, title)
}

fn strip_decorators(line: &str) -> &str {
    let line = if line.starts_with('#') {
        line.trim_start_matches('#').trim_start()
    } else {
        bold_inner(line).unwrap_or(line)
    };
    line.strip_suffix(':').unwrap_or(line)
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_LABEL_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_hashes_are_removed() {
        assert_eq!(extract_label("# A\ntext1\n", 0), "1. A");
        assert_eq!(extract_label("###   Deep heading\n", 4), "5. Deep heading");
        assert_eq!(extract_label("#NoSpace", 0), "1. NoSpace");
    }

    #[test]
    fn bold_pair_is_removed() {
        assert_eq!(extract_label("**Section Name**\nbody", 1), "2. Section Name");
    }

    #[test]
    fn trailing_colon_is_removed() {
        assert_eq!(extract_label("**Usage:**\nrun", 0), "1. Usage");
        assert_eq!(extract_label("## Steps:\n", 0), "1. Steps");
        assert_eq!(extract_label("Notes:", 2), "3. Notes");
    }

    #[test]
    fn only_one_colon_is_removed() {
        assert_eq!(extract_label("Ratio::", 0), "1. Ratio:");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(extract_label("\n\n  Chapter 1\nbody\n", 1), "2. Chapter 1");
    }

    #[test]
    fn crlf_line_endings() {
        assert_eq!(extract_label("# Title:\r\nbody\r\n", 0), "1. Title");
    }

    #[test]
    fn empty_page_gives_empty_label() {
        assert_eq!(extract_label("", 0), "1. ");
        assert_eq!(extract_label("   \n\n", 6), "7. ");
    }

    #[test]
    fn long_heading_is_truncated() {
        let heading = "a".repeat(40);
        let label = extract_label(&format!("# {heading}\nbody"), 0);
        assert_eq!(label, format!("1. {}...", "a".repeat(30)));
    }

    #[test]
    fn thirty_chars_are_kept_whole() {
        let heading = "b".repeat(30);
        assert_eq!(extract_label(&heading, 0), format!("1. {heading}"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let heading = "é".repeat(31);
        let label = extract_label(&heading, 0);
        assert_eq!(label, format!("1. {}...", "é".repeat(30)));
    }

    #[test]
    fn label_body_never_exceeds_limit() {
        let pages = ["", "x", &"y".repeat(100), "# ### ## mixed", "**bold**"];
        for (i, page) in pages.iter().enumerate() {
            let label = extract_label(page, i);
            let body = label.split_once(". ").map(|(_, b)| b).unwrap_or("");
            assert!(body.chars().count() <= MAX_LABEL_CHARS + ELLIPSIS.len());
        }
    }
}

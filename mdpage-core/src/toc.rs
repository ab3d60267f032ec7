//! Table of contents built from page labels

use crate::label::extract_label;

/// Build one label per page, in page order.
pub fn build_index<S: AsRef<str>>(pages: &[S]) -> Vec<String> {
    pages
        .iter()
        .enumerate()
        .map(|(idx, page)| extract_label(page.as_ref(), idx))
        .collect()
}

/// Position of the first label equal to `label`.
///
/// Labels may repeat; later duplicates are never returned.
pub fn find_label(labels: &[String], label: &str) -> Option<usize> {
    labels.iter().position(|l| l == label)
}

//! Errors raised by page navigation

use thiserror::Error;

/// Errors that can occur while navigating pages
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// Requested page index is outside `0..page_count`
    #[error("page index {index} is out of range (document has {page_count} pages)")]
    OutOfRange {
        /// The requested 0-based index
        index: usize,
        /// Number of pages in the document
        page_count: usize,
    },
}

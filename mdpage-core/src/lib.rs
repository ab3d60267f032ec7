//! mdpage core - document segmentation, labels and page navigation
//!
//! This crate contains the UI-independent logic of mdpage:
//! - Splitting markdown into pages with prioritized separator strategies
//! - Table of contents labels derived from each page
//! - The page navigation state machine
//! - Document loading, sessions and configuration

pub mod config;
pub mod doc;
pub mod error;
pub mod label;
pub mod nav;
pub mod segment;
pub mod toc;

// Re-export commonly used types
pub use config::Config;
pub use doc::{load_document, Document, Session, Source};
pub use error::NavError;
pub use label::extract_label;
pub use nav::{NavEvent, NavState, Pager, Transition};
pub use segment::{segment, segment_with_strategy, Segmentation, Strategy};
pub use toc::build_index;

//! Document model and paged reading session

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::NavError;
use crate::nav::{NavEvent, NavState, Pager, Transition};
use crate::segment::{segment_with_strategy, Strategy};
use crate::toc;

/// Where a document's text came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
    Inline,
}

/// Raw markdown text, immutable once loaded
#[derive(Clone, Debug)]
pub struct Document {
    pub source: Source,
    pub text: String,
    pub mtime: Option<SystemTime>,
}

impl Document {
    /// Wrap text that did not come from disk
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: Source::Inline,
            text: text.into(),
            mtime: None,
        }
    }

    /// Load a document from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize path: {}", path.display()))?;

        let text = fs::read_to_string(&abs_path)
            .with_context(|| format!("Failed to read file: {}", abs_path.display()))?;
        let text = normalize_line_endings(text);

        let mtime = fs::metadata(&abs_path).and_then(|m| m.modified()).ok();

        Ok(Self {
            source: Source::File(abs_path),
            text,
            mtime,
        })
    }

    /// Read a whole document from a reader, typically stdin
    pub fn read_from(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;

        Ok(Self {
            source: Source::Stdin,
            text: normalize_line_endings(text),
            mtime: None,
        })
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File(path) => Some(path),
            Source::Stdin | Source::Inline => None,
        }
    }

    /// Short name for display
    pub fn display_name(&self) -> String {
        match &self.source {
            Source::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Source::Stdin => "<stdin>".to_string(),
            Source::Inline => "untitled".to_string(),
        }
    }

    /// Re-read the backing file. Documents without a file are returned as is.
    pub fn reread(&self) -> Result<Self> {
        match self.path() {
            Some(path) => Self::load(path),
            None => Ok(self.clone()),
        }
    }
}

/// Text read from disk or stdin uses `\n` line endings only, so that
/// `---\r\n` separator lines split like `---\n`
fn normalize_line_endings(text: String) -> String {
    if text.contains("\r\n") {
        text.replace("\r\n", "\n")
    } else {
        text
    }
}

/// A loaded document with its pages, labels and navigation state
#[derive(Clone, Debug)]
pub struct Session {
    doc: Document,
    pages: Vec<String>,
    labels: Vec<String>,
    strategy: Strategy,
    pager: Pager,
    rev: u64,
}

/// Segment raw text and start a session on its first page.
pub fn load_document(raw_text: &str) -> Session {
    Session::new(Document::from_text(raw_text))
}

impl Session {
    pub fn new(doc: Document) -> Self {
        let segmentation = segment_with_strategy(&doc.text);
        let labels = toc::build_index(&segmentation.pages);
        let pager = Pager::new(segmentation.pages.len());

        Self {
            doc,
            pages: segmentation.pages,
            labels,
            strategy: segmentation.strategy,
            pager,
            rev: 1,
        }
    }

    /// Replace the document wholesale.
    ///
    /// When the text differs, pages and labels are rebuilt and navigation
    /// starts over; identical text keeps the current position. Returns
    /// whether the content changed.
    pub fn replace(&mut self, doc: Document) -> bool {
        if doc.text == self.doc.text {
            self.doc = doc;
            return false;
        }

        let rev = self.rev + 1;
        *self = Self::new(doc);
        self.rev = rev;
        log::debug!(
            "document replaced: rev {} with {} pages ({})",
            self.rev,
            self.pages.len(),
            self.strategy
        );
        true
    }

    /// Re-read the backing file and replace the document with it.
    pub fn reload(&mut self) -> Result<bool> {
        let doc = self.doc.reread()?;
        Ok(self.replace(doc))
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Revision counter, bumped whenever the content changes
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn nav(&self) -> NavState {
        self.pager.state()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_index(&self) -> usize {
        self.pager.current()
    }

    pub fn current_page(&self) -> &str {
        self.pages
            .get(self.pager.current())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn current_label(&self) -> &str {
        self.labels
            .get(self.pager.current())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn next(&mut self) -> Transition {
        self.pager.next()
    }

    pub fn prev(&mut self) -> Transition {
        self.pager.prev()
    }

    pub fn first(&mut self) -> Transition {
        self.pager.first()
    }

    pub fn last(&mut self) -> Transition {
        self.pager.last()
    }

    pub fn jump_to(&mut self, index: usize) -> Result<Transition, NavError> {
        self.pager.jump_to(index)
    }

    pub fn toggle_sidebar(&mut self) -> Transition {
        self.pager.toggle_sidebar()
    }

    pub fn select_by_label(&mut self, label: &str) -> Result<Transition, NavError> {
        self.pager.select_by_label(label, &self.labels)
    }

    pub fn apply(&mut self, event: NavEvent) -> Result<Transition, NavError> {
        self.pager.apply(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_document_initial_state() {
        let session = load_document("Intro\n---\nChapter 1\n---\nChapter 2");
        assert_eq!(session.page_count(), 3);
        assert_eq!(session.labels(), ["1. Intro", "2. Chapter 1", "3. Chapter 2"]);
        assert_eq!(session.nav(), NavState::initial());
        assert_eq!(session.strategy(), Strategy::ExplicitSeparator);
        assert_eq!(session.current_page(), "Intro\n");
    }

    #[test]
    fn test_load_empty_document() {
        let session = load_document("");
        assert_eq!(session.pages(), [""]);
        assert_eq!(session.labels(), ["1. "]);
        assert_eq!(session.current_page(), "");
    }

    #[test]
    fn test_navigation_through_session() {
        let mut session = load_document("# A\ntext1\n# B\ntext2");
        assert_eq!(session.next(), Transition::Changed);
        assert_eq!(session.current_label(), "2. B");
        assert_eq!(session.current_page(), "# B\ntext2");
        assert_eq!(session.next(), Transition::Unchanged);
        assert!(session.jump_to(2).is_err());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_select_by_label_uses_session_labels() {
        let mut session = load_document("# A\n# B\n# C\n");
        assert_eq!(session.select_by_label("3. C"), Ok(Transition::Changed));
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.select_by_label("C"), Ok(Transition::Unchanged));
    }

    #[test]
    fn test_replace_resets_navigation() {
        let mut session = load_document("# A\n# B\n# C\n");
        session.last();
        session.toggle_sidebar();

        assert!(session.replace(Document::from_text("x\n---\ny\n")));
        assert_eq!(session.nav(), NavState::initial());
        assert_eq!(session.page_count(), 2);
        assert_eq!(session.rev(), 2);
    }

    #[test]
    fn test_replace_with_same_text_keeps_position() {
        let mut session = load_document("# A\n# B\n");
        session.next();

        assert!(!session.replace(Document::from_text("# A\n# B\n")));
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.rev(), 1);
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"# One\n\nfirst\n\n# Two\n\nsecond\n")?;

        let doc = Document::load(file.path())?;
        assert!(doc.path().is_some());
        assert!(doc.mtime.is_some());

        let session = Session::new(doc);
        assert_eq!(session.labels(), ["1. One", "2. Two"]);

        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = Document::load(Path::new("/definitely/not/here.md"));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_from_reader() -> Result<()> {
        let doc = Document::read_from("**A**\nx\n**B**\ny\n".as_bytes())?;
        assert_eq!(doc.source, Source::Stdin);
        assert_eq!(doc.display_name(), "<stdin>");
        assert_eq!(Session::new(doc).page_count(), 2);
        Ok(())
    }

    #[test]
    fn test_crlf_file_splits_on_separators() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"Intro\r\n---\r\nChapter 1\r\n---\r\nChapter 2\r\n")?;
        file.flush()?;

        let doc = Document::load(file.path())?;
        assert_eq!(doc.text, "Intro\n---\nChapter 1\n---\nChapter 2\n");

        let session = Session::new(doc);
        assert_eq!(session.strategy(), Strategy::ExplicitSeparator);
        assert_eq!(session.pages(), ["Intro\n", "Chapter 1\n", "Chapter 2\n"]);
        assert_eq!(session.labels(), ["1. Intro", "2. Chapter 1", "3. Chapter 2"]);
        Ok(())
    }

    #[test]
    fn test_crlf_stdin_is_normalized() -> Result<()> {
        let doc = Document::read_from("# A\r\nx\r\n---\r\n# B\r\n".as_bytes())?;
        assert!(!doc.text.contains('\r'));
        assert_eq!(Session::new(doc).page_count(), 2);
        Ok(())
    }

    #[test]
    fn test_reload_picks_up_changes() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"# A\n# B\n")?;
        file.flush()?;

        let mut session = Session::new(Document::load(file.path())?);
        session.next();
        assert!(!session.reload()?);
        assert_eq!(session.current_index(), 1);

        file.write_all(b"# C\n")?;
        file.flush()?;

        assert!(session.reload()?);
        assert_eq!(session.page_count(), 3);
        assert_eq!(session.current_index(), 0);

        Ok(())
    }
}

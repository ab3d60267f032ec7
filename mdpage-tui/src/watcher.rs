//! Debounced file watching for the open document

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Watches one document file and reports changes once they settle
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    changes: Receiver<()>,
    path: PathBuf,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl FileWatcher {
    /// Start watching `path`; changes are reported after `debounce` of quiet
    pub fn new(path: &Path, debounce: Duration) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let target = path.to_path_buf();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else { return };
            let relevant = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                && event.paths.iter().any(|p| p == &target);
            if relevant {
                let _ = tx.send(());
            }
        })
        .context("Failed to create file watcher")?;

        // Editors that save by renaming replace the file, so watch its directory too
        let watch_root = path.parent().unwrap_or(path);
        watcher
            .watch(watch_root, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch: {}", watch_root.display()))?;

        Ok(Self {
            _watcher: watcher,
            changes: rx,
            path: path.to_path_buf(),
            debounce,
            pending_since: None,
        })
    }

    /// True once a change has been seen and no further change arrived
    /// within the debounce window
    pub fn poll_changed(&mut self) -> bool {
        while self.changes.try_recv().is_ok() {
            self.pending_since = Some(Instant::now());
        }

        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    /// A change was seen but is still inside the debounce window
    pub fn has_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

//! Debounced watch on the override config file.
//!
//! External edits (a user opening the file in their editor) surface as
//! discrete [`ChangeEvent`]s on an mpsc channel rather than a callback fired
//! from watcher internals: the store's owner drains the channel at its single
//! synchronization point and calls `reload` there. Watcher errors are
//! reported as events and do not stop the watch.
//!
//! The parent directory is observed non-recursively and events are filtered
//! to the override file's name, so the watch keeps working when the file is
//! created or atomically replaced after startup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::RecommendedWatcher;
use notify_debouncer_mini::{DebounceEventResult, DebouncedEventKind, Debouncer, new_debouncer};
use tracing::debug;

use crate::error::ConfigError;

/// A change observed on the override file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The file was created, modified, or replaced. There is no payload;
    /// consumers reload and re-read.
    Modified,
    /// The underlying watcher reported an error. Watching continues.
    Error(String),
}

/// Cancelable subscription to override-file changes.
///
/// Dropping the watcher cancels the subscription and closes the channel.
pub struct OverrideWatcher {
    events: Receiver<ChangeEvent>,
    debouncer: Mutex<Option<Debouncer<RecommendedWatcher>>>,
}

impl OverrideWatcher {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

    /// Start watching `file` for external modification, coalescing rapid
    /// changes within `debounce`.
    pub fn start(file: &Path, debounce: Duration) -> Result<OverrideWatcher, ConfigError> {
        let dir = file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name: Option<OsString> = file.file_name().map(OsString::from);
        let (tx, rx) = mpsc::channel();

        let mut debouncer = new_debouncer(debounce, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let relevant = events.iter().any(|event| {
                        matches!(
                            event.kind,
                            DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
                        ) && event.path.file_name().map(OsString::from) == file_name
                    });
                    if relevant {
                        let _ = tx.send(ChangeEvent::Modified);
                    }
                }
                Err(error) => {
                    let _ = tx.send(ChangeEvent::Error(error.to_string()));
                }
            }
        })?;

        debouncer
            .watcher()
            .watch(&dir, notify::RecursiveMode::NonRecursive)?;
        debug!(file = %file.display(), "watching override config");

        Ok(OverrideWatcher {
            events: rx,
            debouncer: Mutex::new(Some(debouncer)),
        })
    }

    /// Start watching with the default debounce.
    pub fn start_default(file: &Path) -> Result<OverrideWatcher, ConfigError> {
        OverrideWatcher::start(file, OverrideWatcher::DEFAULT_DEBOUNCE)
    }

    /// The channel change events arrive on.
    pub fn events(&self) -> &Receiver<ChangeEvent> {
        &self.events
    }

    /// Stop observing and release the OS watch. Idempotent: calling it again
    /// (or after drop-order games) is a no-op.
    pub fn cancel(&self) {
        if let Ok(mut guard) = self.debouncer.lock() {
            if guard.take().is_some() {
                debug!("override config watch canceled");
            }
        }
    }

    /// True while the underlying OS watch is still held.
    pub fn is_active(&self) -> bool {
        self.debouncer.lock().map(|g| g.is_some()).unwrap_or(false)
    }
}

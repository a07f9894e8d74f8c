//! Config file watching for the live preview.
//!
//! The watcher observes the directory holding the config file rather than the
//! file itself, since editors often save by writing a new file and renaming it
//! over the old one. Every create, modify or remove event naming the config
//! file is forwarded; collapsing bursts of events is the debouncer's job.

use crate::{Error, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// One observed change to the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChange {
    /// Path as reported by the platform watcher
    pub path: PathBuf,
}

/// Streams changes of one config file
pub struct ConfigWatcher {
    // Dropping the watcher stops the event stream
    _watcher: RecommendedWatcher,
    changes: mpsc::UnboundedReceiver<ConfigChange>,
    config_path: PathBuf,
}

impl ConfigWatcher {
    /// Start watching `config_path`. Its directory must exist; the file itself
    /// may appear later.
    pub fn new(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();
        let file_name = config_path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| Error::InvalidFileName(config_path.display().to_string()))?;
        let dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, changes) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    log::warn!("config watcher error: {}", e);
                    return;
                }
            };
            if !is_content_change(&event.kind) {
                return;
            }
            for path in event.paths {
                if path.file_name() == Some(file_name.as_os_str()) {
                    // The receiver is gone once the watcher is dropped
                    let _ = tx.send(ConfigChange { path });
                }
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        log::info!("watching {} for config changes", config_path.display());

        Ok(Self {
            _watcher: watcher,
            changes,
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Wait for the next change; `None` once the watcher has shut down
    pub async fn changed(&mut self) -> Option<ConfigChange> {
        self.changes.recv().await
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

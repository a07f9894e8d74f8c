//! Debounced live preview.
//!
//! Every edit calls [`LivePreview::request`] with a snapshot of the document.
//! The render only happens once the edits have been quiet for the configured
//! window; a newer request cancels the pending one, so superseded snapshots
//! never reach the render hooks.
//!
//! [`LivePreview::follow`] drives requests from a [`ConfigWatcher`], so saves
//! made by any editor reach the preview.
//!
//! Scheduling spawns onto the current tokio runtime, so requests must be
//! made from within one.

use crate::backend::ConfigStore;
use crate::config::ConfigDocument;
use crate::rendering::RenderTree;
use crate::watch::ConfigWatcher;
use crate::RenderEnv;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::AbortHandle;

/// Quiescence window used by [`LivePreview::new`]
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(800);

type RenderHook = Arc<dyn Fn(&RenderTree) + Send + Sync>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Handle to one scheduled run
#[derive(Debug)]
pub struct DebounceHandle {
    abort: AbortHandle,
}

impl DebounceHandle {
    /// Cancel the run if it has not started yet
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the run completed or was cancelled
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

/// Runs at most one pending closure; scheduling again replaces it
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Mutex<Option<AbortHandle>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` after `delay`, cancelling whatever was scheduled before
    pub fn schedule<F>(&self, f: F, delay: Duration) -> DebounceHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });
        let abort = task.abort_handle();
        if let Some(previous) = lock(&self.pending).replace(task.abort_handle()) {
            previous.abort();
        }
        DebounceHandle { abort }
    }

    /// Cancel the pending run, if any
    pub fn cancel(&self) {
        if let Some(pending) = lock(&self.pending).take() {
            pending.abort();
        }
    }
}

/// Re-renders a document after edits settle and hands the tree to hooks
pub struct LivePreview {
    debouncer: Debouncer,
    quiescence: Duration,
    hooks: Arc<Mutex<Vec<RenderHook>>>,
}

impl Default for LivePreview {
    fn default() -> Self {
        Self::new()
    }
}

impl LivePreview {
    pub fn new() -> Self {
        Self::with_quiescence(DEFAULT_QUIESCENCE)
    }

    pub fn with_quiescence(quiescence: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(),
            quiescence,
            hooks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn quiescence(&self) -> Duration {
        self.quiescence
    }

    /// Register a callback invoked with every rendered tree
    pub fn on_render<F>(&self, cb: F)
    where
        F: Fn(&RenderTree) + Send + Sync + 'static,
    {
        lock(&self.hooks).push(Arc::new(cb));
    }

    /// Remove all render callbacks
    pub fn clear_on_render(&self) {
        lock(&self.hooks).clear();
    }

    /// Schedule a render of `doc` once edits have been quiet for the window
    pub fn request(&self, doc: &ConfigDocument, env: &RenderEnv) -> DebounceHandle {
        let doc = doc.clone();
        let env = env.clone();
        let hooks = Arc::clone(&self.hooks);
        self.debouncer.schedule(
            move || {
                let tree = crate::render(&doc, &env);
                run_hooks(&hooks, &tree);
            },
            self.quiescence,
        )
    }

    /// Render immediately, dropping any pending request
    pub fn render_now(&self, doc: &ConfigDocument, env: &RenderEnv) -> RenderTree {
        self.debouncer.cancel();
        let tree = crate::render(doc, env);
        run_hooks(&self.hooks, &tree);
        tree
    }

    /// Drop the pending request without rendering
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    /// Reload `store` and request a render on every change `watcher` reports,
    /// until the watcher shuts down. A config that fails to load is skipped
    /// and the last good preview stays up.
    pub async fn follow<S>(&self, watcher: &mut ConfigWatcher, store: &S, env: &RenderEnv)
    where
        S: ConfigStore + ?Sized,
    {
        while let Some(change) = watcher.changed().await {
            log::debug!("config changed: {}", change.path.display());
            match store.load() {
                Ok(doc) => {
                    self.request(&doc, env);
                }
                Err(e) => log::warn!("config not reloaded: {}", e),
            }
        }
    }
}

fn run_hooks(hooks: &Mutex<Vec<RenderHook>>, tree: &RenderTree) {
    // Call outside the lock so a hook may register or clear hooks
    let snapshot: Vec<RenderHook> = lock(hooks).clone();
    log::debug!("preview rendered; notifying {} hook(s)", snapshot.len());
    for hook in snapshot {
        hook(tree);
    }
}

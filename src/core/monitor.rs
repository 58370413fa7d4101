//! Debounced filesystem monitoring for a git working tree.
//!
//! [`RepositoryMonitor`] subscribes to native change notifications below a working
//! tree root, buffers the raw paths for one debounce window and then publishes at most
//! two deduplicated change sets per window to a [`ChangeSink`]:
//! - **repository changed**: paths inside the metadata directory (`.git`), except lock files
//! - **working tree changed**: every other changed file
//!
//! Directories are never reported. After [`RepositoryMonitor::dispose`] nothing is
//! published, and native events still in flight are dropped.
//!
//! The native watcher sits behind [`WatchProvider`] so the classification and
//! debouncing logic can be driven by synthetic events in tests.

use crate::core::error::{GitPulseError, Result};
use crate::core::path::CanonicalPath;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Callback receiving the paths of one native change event
pub type WatchHandler = Box<dyn Fn(Vec<PathBuf>) + Send + Sync>;

/// Keeps a native watch alive; dropping it stops notifications
pub trait WatchGuard: Send {}

/// Source of recursive filesystem change notifications
pub trait WatchProvider: Send + Sync {
    fn watch(&self, root: &Path, handler: WatchHandler) -> Result<Box<dyn WatchGuard>>;
}

/// [`WatchProvider`] backed by the platform's native watcher
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyWatchProvider;

struct NotifyGuard {
    _watcher: RecommendedWatcher,
}

impl WatchGuard for NotifyGuard {}

impl WatchProvider for NotifyWatchProvider {
    fn watch(&self, root: &Path, handler: WatchHandler) -> Result<Box<dyn WatchGuard>> {
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) => {
                    if matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) {
                        handler(event.paths);
                    }
                }
                Err(e) => log::warn!("Filesystem watcher error: {e}"),
            }
        })?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| GitPulseError::watch_path(root, e))?;

        Ok(Box::new(NotifyGuard { _watcher: watcher }))
    }
}

/// Receiver of the two debounced change channels
pub trait ChangeSink: Send + Sync {
    fn repository_changed(&self, paths: HashSet<CanonicalPath>);
    fn working_tree_changed(&self, paths: HashSet<CanonicalPath>);
}

/// One published change set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    RepositoryChanged(HashSet<CanonicalPath>),
    WorkingTreeChanged(HashSet<CanonicalPath>),
}

impl ChangeSink for mpsc::Sender<MonitorEvent> {
    fn repository_changed(&self, paths: HashSet<CanonicalPath>) {
        let _ = self.send(MonitorEvent::RepositoryChanged(paths));
    }

    fn working_tree_changed(&self, paths: HashSet<CanonicalPath>) {
        let _ = self.send(MonitorEvent::WorkingTreeChanged(paths));
    }
}

#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub debounce: Duration,
    /// Metadata directory name below the working tree root
    pub metadata_dir: String,
    /// Extension of transient lock files inside the metadata directory
    pub lock_extension: String,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            metadata_dir: ".git".to_string(),
            lock_extension: "lock".to_string(),
        }
    }
}

/// Splits changed paths into metadata and working tree sets
#[derive(Debug, Clone)]
pub struct ChangeClassifier {
    metadata_dir: CanonicalPath,
    lock_extension: String,
}

impl ChangeClassifier {
    pub fn new(metadata_dir: CanonicalPath, lock_extension: impl Into<String>) -> Self {
        Self {
            metadata_dir,
            lock_extension: lock_extension.into(),
        }
    }

    pub fn metadata_dir(&self) -> &CanonicalPath {
        &self.metadata_dir
    }

    /// Returns `(repository, working_tree)` change sets
    pub fn classify<I>(&self, paths: I) -> (HashSet<CanonicalPath>, HashSet<CanonicalPath>)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut repository = HashSet::new();
        let mut working_tree = HashSet::new();

        for raw in paths {
            let path = match CanonicalPath::try_from(raw.as_path()) {
                Ok(path) => path,
                Err(e) => {
                    log::debug!("Ignoring change event: {e}");
                    continue;
                }
            };
            if path.is_directory() {
                continue;
            }

            if self.metadata_dir.is_parent_of(&path) {
                let is_lock = path
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case(&self.lock_extension));
                if !is_lock {
                    repository.insert(path);
                }
            } else {
                working_tree.insert(path);
            }
        }

        (repository, working_tree)
    }
}

/// State shared by the native event handler and the flusher thread
struct Debouncer {
    pending: Mutex<HashSet<PathBuf>>,
    disposed: AtomicBool,
    classifier: ChangeClassifier,
    sink: Arc<dyn ChangeSink>,
}

impl Debouncer {
    fn record(&self, paths: Vec<PathBuf>) {
        if self.disposed.load(Ordering::Acquire) {
            log::trace!("Dropping {} change(s) after dispose", paths.len());
            return;
        }
        self.pending.lock().extend(paths);
    }

    /// Drain the window and publish its change sets
    fn flush(&self) {
        if self.disposed.load(Ordering::Acquire) {
            return;
        }

        let raw = std::mem::take(&mut *self.pending.lock());
        if raw.is_empty() {
            return;
        }

        let (repository, working_tree) = self.classifier.classify(raw);
        log::debug!(
            "Change window: {} repository path(s), {} working tree path(s)",
            repository.len(),
            working_tree.len()
        );

        if !repository.is_empty() && !self.disposed.load(Ordering::Acquire) {
            self.sink.repository_changed(repository);
        }
        if !working_tree.is_empty() && !self.disposed.load(Ordering::Acquire) {
            self.sink.working_tree_changed(working_tree);
        }
    }
}

pub struct RepositoryMonitor {
    root: CanonicalPath,
    debouncer: Arc<Debouncer>,
    watcher: Mutex<Option<Box<dyn WatchGuard>>>,
    shutdown: Mutex<Option<mpsc::Sender<()>>>,
    flusher: Mutex<Option<JoinHandle<()>>>,
}

impl RepositoryMonitor {
    /// Start watching `root`; the monitor is armed on return
    pub fn new(
        root: CanonicalPath,
        provider: &dyn WatchProvider,
        sink: Arc<dyn ChangeSink>,
        options: MonitorOptions,
    ) -> Result<Self> {
        let metadata_dir = root.combine([options.metadata_dir.as_str()])?;
        let debouncer = Arc::new(Debouncer {
            pending: Mutex::new(HashSet::new()),
            disposed: AtomicBool::new(false),
            classifier: ChangeClassifier::new(metadata_dir, options.lock_extension),
            sink,
        });

        let handler_state = Arc::clone(&debouncer);
        let watcher = provider.watch(
            root.as_std_path(),
            Box::new(move |paths| handler_state.record(paths)),
        )?;

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let flusher_state = Arc::clone(&debouncer);
        let debounce = options.debounce;
        let flusher = thread::Builder::new()
            .name("git-pulse-monitor".to_string())
            .spawn(move || loop {
                match shutdown_rx.recv_timeout(debounce) {
                    Err(RecvTimeoutError::Timeout) => flusher_state.flush(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        log::debug!("Monitoring {root}");
        Ok(Self {
            root,
            debouncer,
            watcher: Mutex::new(Some(watcher)),
            shutdown: Mutex::new(Some(shutdown_tx)),
            flusher: Mutex::new(Some(flusher)),
        })
    }

    pub fn root(&self) -> &CanonicalPath {
        &self.root
    }

    pub fn metadata_directory(&self) -> &CanonicalPath {
        self.debouncer.classifier.metadata_dir()
    }

    pub fn is_disposed(&self) -> bool {
        self.debouncer.disposed.load(Ordering::Acquire)
    }

    /// Stop watching; idempotent and irreversible
    pub fn dispose(&self) {
        if self.debouncer.disposed.swap(true, Ordering::AcqRel) {
            return;
        }

        self.watcher.lock().take();
        self.shutdown.lock().take();
        self.debouncer.pending.lock().clear();

        if let Some(flusher) = self.flusher.lock().take() {
            // A sink may dispose the monitor from inside a publish.
            if flusher.thread().id() != thread::current().id() && flusher.join().is_err() {
                log::warn!("Monitor thread for {} panicked", self.root);
            }
        }
        log::debug!("Stopped monitoring {}", self.root);
    }
}

impl Drop for RepositoryMonitor {
    fn drop(&mut self) {
        self.dispose();
    }
}

//! Live state of one git working tree.
//!
//! [`RepositoryState`] owns three lazily hydrated caches (status, current branch and
//! branch list), arms a [`RepositoryMonitor`] on the open working tree and turns the
//! monitor's change sets into targeted cache invalidation plus upward notifications
//! for [`RepositoryListener`]s.
//!
//! # Invalidation rules
//! - A change below `refs/heads` (or to `packed-refs`) invalidates the branch list
//! - A change to `HEAD` invalidates the current branch
//! - Any change invalidates status, unless every changed path is already known to be
//!   ignored; the ignored check reads the cached status without hydrating it
//! - A change set of `None` means "cause unknown" and invalidates everything

use crate::core::cached_value::CachedValue;
use crate::core::config::Config;
use crate::core::error::{GitPulseError, Result};
use crate::core::file_status::FileStatus;
use crate::core::monitor::{
    ChangeSink, MonitorOptions, NotifyWatchProvider, RepositoryMonitor, WatchProvider,
};
use crate::core::path::CanonicalPath;
use crate::core::status::{StatusCollection, StatusEntry};
use crate::git::{
    Add, Branch, BranchEntry, Checkout, Clean, Commit, Diff, GetBranches, GitApplication,
    Launcher, Reset, RevParse, RevParseQuery, Status, SymbolicRef, SystemLauncher,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

/// Upward notifications; every method defaults to doing nothing
pub trait RepositoryListener: Send + Sync {
    /// Metadata changed; `None` means the cause is unknown
    fn repository_changed(&self, _paths: Option<&HashSet<CanonicalPath>>) {}

    /// Cached status was invalidated; re-read it
    fn status_changed(&self) {}

    fn current_branch_changed(&self) {}

    fn branches_changed(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryEvent {
    RepositoryChanged(Option<HashSet<CanonicalPath>>),
    StatusChanged,
    CurrentBranchChanged,
    BranchesChanged,
}

impl RepositoryListener for mpsc::Sender<RepositoryEvent> {
    fn repository_changed(&self, paths: Option<&HashSet<CanonicalPath>>) {
        let _ = self.send(RepositoryEvent::RepositoryChanged(paths.cloned()));
    }

    fn status_changed(&self) {
        let _ = self.send(RepositoryEvent::StatusChanged);
    }

    fn current_branch_changed(&self) {
        let _ = self.send(RepositoryEvent::CurrentBranchChanged);
    }

    fn branches_changed(&self) {
        let _ = self.send(RepositoryEvent::BranchesChanged);
    }
}

struct OpenRepository {
    git: GitApplication,
    repository_dir: CanonicalPath,
}

type Context = Arc<RwLock<Option<OpenRepository>>>;

fn current_git(context: &Context) -> Option<GitApplication> {
    context.read().as_ref().map(|open| open.git.clone())
}

/// Caches and listeners; also the monitor's change sink
struct Shared {
    context: Context,
    status: CachedValue<StatusCollection>,
    current_branch: CachedValue<Option<String>>,
    branches: CachedValue<Vec<BranchEntry>>,
    listeners: RwLock<Vec<Arc<dyn RepositoryListener>>>,
}

impl Shared {
    fn new(context: Context) -> Self {
        let status_context = Arc::clone(&context);
        let status = CachedValue::new(move || {
            let Some(git) = current_git(&status_context) else {
                return Ok(StatusCollection::new());
            };

            let mut collection: StatusCollection = git.execute(&Status::new())?.into_iter().collect();
            let ignored = git.execute(&Clean::ignored_files())?;
            collection.extend(
                ignored
                    .into_iter()
                    .map(|path| StatusEntry::new(path, FileStatus::IGNORED)),
            );
            Ok(collection)
        });

        let branch_context = Arc::clone(&context);
        let current_branch = CachedValue::new(move || match current_git(&branch_context) {
            Some(git) => git.execute(&SymbolicRef::head()),
            None => Ok(None),
        });

        let branches_context = Arc::clone(&context);
        let branches = CachedValue::new(move || match current_git(&branches_context) {
            Some(git) => git.execute(&GetBranches),
            None => Ok(Vec::new()),
        });

        Self {
            context,
            status,
            current_branch,
            branches,
            listeners: RwLock::new(Vec::new()),
        }
    }

    fn notify(&self, event: impl Fn(&dyn RepositoryListener)) {
        let listeners = self.listeners.read().clone();
        for listener in &listeners {
            event(listener.as_ref());
        }
    }

    fn on_repository_changed(&self, paths: Option<&HashSet<CanonicalPath>>) {
        self.notify(|listener| listener.repository_changed(paths));

        let repository_dir = match self.context.read().as_ref() {
            Some(open) => open.repository_dir.clone(),
            None => return,
        };

        let (branches_touched, head_touched) = match paths {
            None => (true, true),
            Some(paths) => {
                let refs_heads = repository_dir.combine(["refs", "heads"]).ok();
                let packed_refs = repository_dir.combine(["packed-refs"]).ok();
                let head = repository_dir.combine(["HEAD"]).ok();
                (
                    paths.iter().any(|path| {
                        refs_heads.as_ref().is_some_and(|dir| dir.is_parent_of(path))
                            || packed_refs.as_ref() == Some(path)
                    }),
                    head.is_some_and(|head| paths.contains(&head)),
                )
            }
        };

        if branches_touched {
            self.branches.invalidate();
            self.notify(|listener| listener.branches_changed());
        }
        if head_touched {
            self.current_branch.invalidate();
            self.notify(|listener| listener.current_branch_changed());
        }

        self.on_working_tree_changed(paths);
    }

    fn on_working_tree_changed(&self, paths: Option<&HashSet<CanonicalPath>>) {
        let Some(current) = self.status.peek() else {
            // Nothing has read status since the last change; a hydration
            // may still be in flight, so make sure its result is not kept.
            self.status.invalidate();
            return;
        };

        if let Some(paths) = paths {
            let relevant = paths.iter().any(|path| !current.is_ignored(path));
            if !relevant {
                log::debug!("Skipping {} change(s) to ignored files", paths.len());
                return;
            }
        }

        self.status.invalidate();
        self.notify(|listener| listener.status_changed());
    }

    fn clear(&self) {
        self.status.clear();
        self.current_branch.clear();
        self.branches.clear();
    }
}

impl ChangeSink for Shared {
    fn repository_changed(&self, paths: HashSet<CanonicalPath>) {
        self.on_repository_changed(Some(&paths));
    }

    fn working_tree_changed(&self, paths: HashSet<CanonicalPath>) {
        self.on_working_tree_changed(Some(&paths));
    }
}

pub struct RepositoryState {
    shared: Arc<Shared>,
    monitor: Mutex<Option<RepositoryMonitor>>,
    executable: PathBuf,
    launcher: Arc<dyn Launcher>,
    watch_provider: Arc<dyn WatchProvider>,
    options: MonitorOptions,
}

impl RepositoryState {
    /// Real git processes and native filesystem notifications
    pub fn new(config: &Config) -> Self {
        Self::with_collaborators(
            config.git_executable.clone(),
            Arc::new(SystemLauncher),
            Arc::new(NotifyWatchProvider),
            config.monitor_options(),
        )
    }

    pub fn with_collaborators(
        executable: impl Into<PathBuf>,
        launcher: Arc<dyn Launcher>,
        watch_provider: Arc<dyn WatchProvider>,
        options: MonitorOptions,
    ) -> Self {
        Self {
            shared: Arc::new(Shared::new(Arc::new(RwLock::new(None)))),
            monitor: Mutex::new(None),
            executable: executable.into(),
            launcher,
            watch_provider,
            options,
        }
    }

    /// Open the working tree containing `path`
    ///
    /// Returns `Ok(false)` for a folder that is not under version control; that
    /// is the normal plain-folder case, not an error.
    pub fn open(&self, path: &CanonicalPath) -> Result<bool> {
        self.close();

        let locator = GitApplication::with_launcher(&self.executable, path.clone(), Arc::clone(&self.launcher));
        let top_level = match locator.execute(&RevParse::new(RevParseQuery::TopLevelDirectory)) {
            Ok(top_level) if !top_level.is_empty() => top_level,
            Ok(_) => return Ok(false),
            Err(e) => {
                log::debug!("{path} is not a git working tree: {e}");
                return Ok(false);
            }
        };

        let root = CanonicalPath::with_style(&top_level, path.style())?;
        let repository_dir = root.combine([self.options.metadata_dir.as_str()])?;
        *self.shared.context.write() = Some(OpenRepository {
            git: locator.at(root.clone()),
            repository_dir,
        });

        let sink: Arc<dyn ChangeSink> = Arc::clone(&self.shared) as Arc<dyn ChangeSink>;
        let monitor = match RepositoryMonitor::new(
            root.clone(),
            self.watch_provider.as_ref(),
            sink,
            self.options.clone(),
        ) {
            Ok(monitor) => monitor,
            Err(e) => {
                self.shared.context.write().take();
                return Err(e);
            }
        };
        *self.monitor.lock() = Some(monitor);

        log::info!("Opened git repository at {root}");
        self.shared.on_repository_changed(None);
        Ok(true)
    }

    /// Stop monitoring and reset every cache to the closed, empty state
    pub fn close(&self) {
        let monitor = self.monitor.lock().take();
        if let Some(monitor) = monitor {
            monitor.dispose();
            log::info!("Closed git repository at {}", monitor.root());
        }
        self.shared.context.write().take();
        self.shared.clear();
    }

    pub fn subscribe(&self, listener: Arc<dyn RepositoryListener>) {
        self.shared.listeners.write().push(listener);
    }

    pub fn is_git_repository(&self) -> bool {
        self.shared.context.read().is_some()
    }

    /// Root of the open working tree
    pub fn working_directory(&self) -> Option<CanonicalPath> {
        current_git(&self.shared.context).map(|git| git.working_directory().clone())
    }

    /// Metadata directory of the open working tree
    pub fn repository_directory(&self) -> Option<CanonicalPath> {
        self.shared
            .context
            .read()
            .as_ref()
            .map(|open| open.repository_dir.clone())
    }

    pub fn status(&self) -> Result<Arc<StatusCollection>> {
        self.shared.status.value()
    }

    /// Checked-out branch, `None` on a detached HEAD or when closed
    pub fn current_branch(&self) -> Result<Option<String>> {
        let branch = self.shared.current_branch.value()?;
        Ok((*branch).clone())
    }

    pub fn branches(&self) -> Result<Arc<Vec<BranchEntry>>> {
        self.shared.branches.value()
    }

    pub fn create_branch(&self, name: &str, checkout: bool) -> Result<()> {
        let git = self.git()?;
        if checkout {
            git.execute(&Checkout::branch(name).create(true))?;
            self.shared.current_branch.invalidate();
        } else {
            git.execute(&Branch::new(name))?;
        }
        self.shared.branches.invalidate();
        Ok(())
    }

    /// Switch branches; blocked by local changes unless `force` is set
    pub fn checkout(&self, name: &str, force: bool) -> Result<()> {
        self.git()?.execute(&Checkout::branch(name).force(force))?;
        self.shared.current_branch.invalidate();
        self.shared.branches.invalidate();
        self.shared.status.invalidate();
        Ok(())
    }

    /// Discard working tree changes to `paths`
    pub fn reset_changes(&self, paths: &[CanonicalPath]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        self.git()?.execute(&Checkout::files(paths.to_vec()))?;
        self.shared.status.invalidate();
        Ok(())
    }

    pub fn stage(&self, paths: &[CanonicalPath]) -> Result<()> {
        self.git()?.execute(&Add::files(paths.to_vec()))?;
        self.shared.status.invalidate();
        Ok(())
    }

    pub fn unstage(&self, paths: &[CanonicalPath]) -> Result<()> {
        self.git()?.execute(&Reset::paths(paths.to_vec()))?;
        self.shared.status.invalidate();
        Ok(())
    }

    pub fn commit(&self, message: &str) -> Result<String> {
        let output = self.git()?.execute(&Commit::with_message(message))?;
        self.shared.status.invalidate();
        self.shared.branches.invalidate();
        Ok(output)
    }

    /// Open unstaged changes in the configured diff tool without waiting
    pub fn display_unstaged_changes_async(&self, path: Option<&CanonicalPath>) -> Result<()> {
        self.git()?.execute_async(&Diff {
            view_in_tool: true,
            path: path.cloned(),
        })
    }

    /// Text diff of unstaged changes
    pub fn unstaged_changes(&self, path: Option<&CanonicalPath>) -> Result<String> {
        self.git()?.execute(&Diff {
            view_in_tool: false,
            path: path.cloned(),
        })
    }

    fn git(&self) -> Result<GitApplication> {
        current_git(&self.shared.context).ok_or(GitPulseError::NotInGitRepo)
    }
}

impl Drop for RepositoryState {
    fn drop(&mut self) {
        self.close();
    }
}

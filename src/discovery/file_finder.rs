use super::cancel::{CancelToken, FirstFailure};
use crate::config::{Config, DEFAULT_QUEUE_CAPACITY};
use crate::error::AuditError;
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use std::sync::mpsc::{sync_channel, SyncSender};
use std::thread;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Directory name of vendored dependencies, never traversed
pub const VENDOR_DIR: &str = "vendor";

/// Suffix of Go source files
pub const GO_SOURCE_SUFFIX: &str = ".go";

/// Check if a path names a Go source file
pub fn is_go_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(GO_SOURCE_SUFFIX))
}

fn trim_separators(path: &Path) -> String {
    path.to_string_lossy()
        .trim_end_matches(MAIN_SEPARATOR)
        .to_string()
}

/// Decides which subtrees are cut from a traversal
#[derive(Debug, Clone)]
struct PruneRule {
    excluded: Vec<String>,
}

impl PruneRule {
    fn new(excluded: &[PathBuf]) -> Self {
        Self {
            excluded: excluded.iter().map(|p| trim_separators(p)).collect(),
        }
    }

    fn prunes(&self, path: &Path) -> bool {
        let vendored = path
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name == VENDOR_DIR));
        if vendored {
            trace!("Skipping vendored path: {}", path.display());
            return true;
        }

        let trimmed = trim_separators(path);
        if self.excluded.iter().any(|ex| *ex == trimmed) {
            trace!("Excluding: {}", path.display());
            return true;
        }

        false
    }
}

/// Walks source trees and feeds every Go file to a consumer.
///
/// Each walk runs the directory traversal on its own thread and hands
/// file paths over a bounded queue to the consumer, which runs on the
/// calling thread. The first failure on either side cancels the other.
#[derive(Debug, Clone)]
pub struct SourceTreeWalker {
    respect_ignore_files: bool,
    queue_capacity: usize,
    cancel: CancelToken,
}

impl SourceTreeWalker {
    pub fn new() -> Self {
        Self {
            respect_ignore_files: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            cancel: CancelToken::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_ignore_files(config.respect_ignore_files)
            .with_queue_capacity(config.queue_capacity())
    }

    /// Also prune paths matched by ignore files and hidden entries
    pub fn with_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore_files = respect;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Share an externally owned cancellation token
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Call `visit` once for every Go file beneath `roots`.
    ///
    /// Subtrees containing a `vendor` component and paths equal to one of
    /// `excluded` are pruned. A failing root aborts the whole call.
    pub fn walk<F>(&self, roots: &[PathBuf], excluded: &[PathBuf], mut visit: F) -> Result<(), AuditError>
    where
        F: FnMut(&Path) -> Result<(), AuditError>,
    {
        // Failures cancel only this walk; `self.cancel` is the external signal
        let stop = CancelToken::new();
        let failure = FirstFailure::new(stop.clone());
        let rule = PruneRule::new(excluded);
        let (tx, rx) = sync_channel::<PathBuf>(self.queue_capacity);
        let mut visited = 0usize;

        thread::scope(|scope| {
            let failure = &failure;
            let rule = &rule;
            let stop = &stop;
            scope.spawn(move || {
                if let Err(e) = self.produce(roots, rule, stop, &tx) {
                    failure.record(e);
                }
                // tx drops here and closes the queue
            });

            for path in rx.iter() {
                if self.stopped(stop) {
                    failure.record(AuditError::Cancelled);
                    break;
                }
                if let Err(e) = visit(&path) {
                    failure.record(e);
                    break;
                }
                visited += 1;
            }
            // Unblocks a producer waiting on a full queue
            drop(rx);
        });

        debug!("Visited {} Go files", visited);
        failure.into_result()
    }

    fn stopped(&self, stop: &CancelToken) -> bool {
        self.cancel.is_cancelled() || stop.is_cancelled()
    }

    fn produce(
        &self,
        roots: &[PathBuf],
        rule: &PruneRule,
        stop: &CancelToken,
        tx: &SyncSender<PathBuf>,
    ) -> Result<(), AuditError> {
        for root in roots {
            if self.stopped(stop) {
                return Err(AuditError::Cancelled);
            }
            if rule.prunes(root) {
                continue;
            }
            debug!("Scanning for files in: {}", root.display());
            if self.respect_ignore_files {
                self.walk_with_ignore_files(root, rule, stop, tx)?;
            } else {
                self.walk_plain(root, rule, stop, tx)?;
            }
        }
        Ok(())
    }

    fn walk_plain(
        &self,
        root: &Path,
        rule: &PruneRule,
        stop: &CancelToken,
        tx: &SyncSender<PathBuf>,
    ) -> Result<(), AuditError> {
        let entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !rule.prunes(entry.path()));

        for entry in entries {
            if self.stopped(stop) {
                return Err(AuditError::Cancelled);
            }
            let entry = entry.map_err(|e| AuditError::Walk {
                root: root.to_path_buf(),
                source: Box::new(e),
            })?;
            if entry.file_type().is_dir() || !is_go_source(entry.path()) {
                continue;
            }
            send(tx, entry.into_path())?;
        }
        Ok(())
    }

    fn walk_with_ignore_files(
        &self,
        root: &Path,
        rule: &PruneRule,
        stop: &CancelToken,
        tx: &SyncSender<PathBuf>,
    ) -> Result<(), AuditError> {
        let filter = rule.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(true)
            .require_git(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| !filter.prunes(entry.path()))
            .build();

        for entry in walker {
            if self.stopped(stop) {
                return Err(AuditError::Cancelled);
            }
            let entry = entry.map_err(|e| AuditError::Walk {
                root: root.to_path_buf(),
                source: Box::new(e),
            })?;
            let is_dir = entry.file_type().map_or(true, |t| t.is_dir());
            if is_dir || !is_go_source(entry.path()) {
                continue;
            }
            send(tx, entry.into_path())?;
        }
        Ok(())
    }
}

impl Default for SourceTreeWalker {
    fn default() -> Self {
        Self::new()
    }
}

fn send(tx: &SyncSender<PathBuf>, path: PathBuf) -> Result<(), AuditError> {
    trace!("Found Go file: {}", path.display());
    // A closed queue means the consumer has stopped
    tx.send(path).map_err(|_| AuditError::Cancelled)
}

//! TreeWalker - builds the full tree snapshot in memory

use std::collections::HashSet;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use log::{debug, trace};

use crate::error::{Result, TreeError};

use super::classify::{classify, denied_note};
use super::config::WalkerConfig;
use super::filter::ExclusionFilter;
use super::node::{NodeKind, NodeMetadata, TreeNode};
use super::progress::{CancelToken, ProgressSink};

/// How a walk ended. A cancelled walk still hands back what it built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    Complete(TreeNode),
    Cancelled(TreeNode),
}

impl WalkOutcome {
    pub fn tree(&self) -> &TreeNode {
        match self {
            WalkOutcome::Complete(t) | WalkOutcome::Cancelled(t) => t,
        }
    }

    pub fn into_tree(self) -> TreeNode {
        match self {
            WalkOutcome::Complete(t) | WalkOutcome::Cancelled(t) => t,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, WalkOutcome::Cancelled(_))
    }
}

/// A listed directory entry that survived exclusion.
#[derive(Debug)]
struct Entry {
    name: String,
    path: PathBuf,
}

/// Per-walk mutable state, threaded through the recursion.
#[derive(Debug, Default)]
struct WalkState {
    visited: u64,
    /// Canonical paths of directories on the current recursion stack.
    active: HashSet<PathBuf>,
    cancelled: bool,
}

/// Tree walker that builds the whole tree in memory, one directory at a time.
pub struct TreeWalker {
    config: WalkerConfig,
    filter: ExclusionFilter,
    progress: Option<Box<dyn ProgressSink>>,
    cancel: CancelToken,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        let filter = ExclusionFilter::new(&config.exclusions);
        Self {
            config,
            filter,
            progress: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Walk `root` and build its tree.
    ///
    /// Fails only when the root itself is missing, not a directory, or
    /// unreadable. Problems further down become nodes in the tree.
    pub fn walk(&self, root: &Path) -> Result<WalkOutcome> {
        let started = Instant::now();

        let meta = fs::metadata(root).map_err(|e| TreeError::RootInvalid {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !meta.is_dir() {
            return Err(TreeError::RootInvalid {
                path: root.to_path_buf(),
                reason: "Not a directory".to_string(),
            });
        }

        let name = root_name(root);
        debug!("walking {} (max depth {:?})", root.display(), self.config.max_depth);

        let mut state = WalkState::default();
        if self.cancel.is_cancelled() {
            return Ok(WalkOutcome::Cancelled(TreeNode::directory(name, Vec::new())));
        }

        let entries = self
            .read_entries(root)
            .map_err(|source| TreeError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            })?;

        if let Ok(real) = fs::canonicalize(root) {
            state.active.insert(real);
        }
        self.visit(&mut state, root);

        let children = self.walk_entries(entries, 1, &mut state);
        let tree = TreeNode::directory(name, children);

        debug!(
            "walked {} nodes under {} in {}{}",
            state.visited,
            root.display(),
            humantime::format_duration(started.elapsed()),
            if state.cancelled { " (cancelled)" } else { "" }
        );

        Ok(if state.cancelled {
            WalkOutcome::Cancelled(tree)
        } else {
            WalkOutcome::Complete(tree)
        })
    }

    fn visit(&self, state: &mut WalkState, path: &Path) {
        state.visited += 1;
        trace!("visit #{} {}", state.visited, path.display());
        if let Some(sink) = &self.progress {
            sink.node_visited(state.visited, path);
        }
    }

    fn walk_entries(&self, entries: Vec<Entry>, depth: usize, state: &mut WalkState) -> Vec<TreeNode> {
        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.walk_entry(entry, depth, state) {
                Some(node) => children.push(node),
                None => break,
            }
        }
        children
    }

    /// Build the node for one entry. Returns `None` once cancellation has
    /// been observed; no filesystem access happens after that.
    fn walk_entry(&self, entry: Entry, depth: usize, state: &mut WalkState) -> Option<TreeNode> {
        if state.cancelled || self.cancel.is_cancelled() {
            state.cancelled = true;
            return None;
        }

        let class = classify(&entry.path);
        self.visit(state, &entry.path);

        let node = match class.kind {
            NodeKind::Denied => {
                debug!("cannot stat {}: {:?}", entry.path.display(), class.note);
                TreeNode::denied(entry.name, class.note)
            }
            kind if kind.is_symlink() => {
                if kind == NodeKind::BrokenSymlink {
                    debug!("broken symlink {}", entry.path.display());
                }
                TreeNode::symlink(entry.name, kind, class.symlink_target)
            }
            NodeKind::Directory => self.walk_dir(entry, depth, state),
            _ => {
                let metadata = if self.config.show_metadata {
                    class.metadata.as_ref().and_then(file_metadata)
                } else {
                    None
                };
                TreeNode::file(entry.name).with_metadata(metadata)
            }
        };
        Some(node)
    }

    fn walk_dir(&self, entry: Entry, depth: usize, state: &mut WalkState) -> TreeNode {
        if self.at_max_depth(depth) {
            return match self.has_visible_entries(&entry.path) {
                Ok(true) => TreeNode::truncated_directory(entry.name),
                Ok(false) => TreeNode::directory(entry.name, Vec::new()),
                Err(e) => self.denied_dir(entry, &e),
            };
        }

        let real = fs::canonicalize(&entry.path).ok();
        if let Some(real) = &real {
            if !state.active.insert(real.clone()) {
                debug!("refusing to re-enter {}", real.display());
                return TreeNode::directory(entry.name, Vec::new()).with_note("Circular Link");
            }
        }

        let node = match self.read_entries(&entry.path) {
            Ok(entries) => {
                let children = self.walk_entries(entries, depth + 1, state);
                TreeNode::directory(entry.name, children)
            }
            Err(e) => self.denied_dir(entry, &e),
        };

        if let Some(real) = real {
            state.active.remove(&real);
        }
        node
    }

    fn denied_dir(&self, entry: Entry, err: &io::Error) -> TreeNode {
        debug!("cannot list {}: {}", entry.path.display(), err);
        TreeNode::denied(entry.name, denied_note(err))
    }

    fn at_max_depth(&self, depth: usize) -> bool {
        self.config.max_depth.is_some_and(|max| depth >= max)
    }

    /// List a directory, drop excluded entries, and sort what remains by
    /// case-insensitive name (raw name breaks ties).
    fn read_entries(&self, path: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for dent in fs::read_dir(path)? {
            let dent = match dent {
                Ok(d) => d,
                Err(e) => {
                    debug!("skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };
            let name = dent.file_name().to_string_lossy().into_owned();
            let is_dir = dent.file_type().is_ok_and(|t| t.is_dir());
            if self.filter.should_exclude(&name, is_dir) {
                continue;
            }
            entries.push(Entry {
                name,
                path: dent.path(),
            });
        }
        entries.sort_by_cached_key(|e| (e.name.to_lowercase(), e.name.clone()));
        Ok(entries)
    }

    /// Whether a directory holds at least one non-excluded entry. Stops at
    /// the first one found.
    fn has_visible_entries(&self, path: &Path) -> io::Result<bool> {
        for dent in fs::read_dir(path)?.flatten() {
            let name = dent.file_name().to_string_lossy().into_owned();
            let is_dir = dent.file_type().is_ok_and(|t| t.is_dir());
            if !self.filter.should_exclude(&name, is_dir) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Display name for the root: its base name, or the path as given when it
/// has none (`.`, `/`).
fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

fn file_metadata(meta: &Metadata) -> Option<NodeMetadata> {
    let modified = meta.modified().ok()?;
    Some(NodeMetadata {
        size: meta.len(),
        modified: to_utc(modified)?,
    })
}

/// Convert a file time to UTC, or `None` when chrono cannot represent it.
fn to_utc(time: SystemTime) -> Option<DateTime<Utc>> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => (secs.checked_neg()?, 0),
                n => (secs.checked_neg()?.checked_sub(1)?, 1_000_000_000 - n),
            }
        }
    };
    let converted = DateTime::<Utc>::from_timestamp(secs, nanos);
    if converted.is_none() {
        debug!("modification time out of range: {time:?}");
    }
    converted
}

//! The tree snapshot produced by the walker and consumed by every renderer

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a node stands for on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    File,
    Directory,
    SymlinkToDir,
    SymlinkToFile,
    BrokenSymlink,
    Denied,
}

impl NodeKind {
    pub fn is_symlink(&self) -> bool {
        matches!(
            self,
            NodeKind::SymlinkToDir | NodeKind::SymlinkToFile | NodeKind::BrokenSymlink
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
            NodeKind::SymlinkToDir => "symlinkToDir",
            NodeKind::SymlinkToFile => "symlinkToFile",
            NodeKind::BrokenSymlink => "brokenSymlink",
            NodeKind::Denied => "denied",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size and modification time of a regular file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// One entry of a walked directory tree.
///
/// Only `Directory` nodes carry children. Symlinks are never descended into,
/// so symlink kinds always have an empty `children` list. `truncated` marks a
/// directory whose contents exist but were not listed because of the depth
/// limit, which keeps it distinct from a genuinely empty directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    pub metadata: Option<NodeMetadata>,
    pub symlink_target: Option<String>,
    pub truncated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            metadata: None,
            symlink_target: None,
            truncated: false,
            note: None,
            children: Vec::new(),
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::leaf(name, NodeKind::File)
    }

    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            children,
            ..Self::leaf(name, NodeKind::Directory)
        }
    }

    /// A directory whose listing was cut off by the depth limit.
    pub fn truncated_directory(name: impl Into<String>) -> Self {
        Self {
            truncated: true,
            ..Self::leaf(name, NodeKind::Directory)
        }
    }

    /// A symlink node. `kind` must be one of the symlink variants; anything
    /// else is treated as a broken link.
    pub fn symlink(name: impl Into<String>, kind: NodeKind, target: Option<String>) -> Self {
        let kind = if kind.is_symlink() {
            kind
        } else {
            NodeKind::BrokenSymlink
        };
        Self {
            symlink_target: target,
            ..Self::leaf(name, kind)
        }
    }

    pub fn denied(name: impl Into<String>, note: Option<String>) -> Self {
        Self {
            note,
            ..Self::leaf(name, NodeKind::Denied)
        }
    }

    pub fn with_metadata(mut self, metadata: Option<NodeMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Depth of the deepest node below `self` (a lone node has depth 0).
    pub fn max_depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Count (directories, files) below `self`, not counting `self`.
    /// Symlinks and denied entries count as files, as `tree` does.
    pub fn counts(&self) -> (usize, usize) {
        self.children.iter().fold((0, 0), |(dirs, files), child| {
            let (d, f) = child.counts();
            if child.is_dir() {
                (dirs + d + 1, files + f)
            } else {
                (dirs + d, files + f + 1)
            }
        })
    }
}

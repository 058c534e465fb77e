//! Classification of a single directory entry

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

use super::node::NodeKind;

/// Result of inspecting one path without descending into it.
#[derive(Debug)]
pub struct Classification {
    pub kind: NodeKind,
    /// Raw link text for symlink kinds, `None` if the link could not be read.
    pub symlink_target: Option<String>,
    /// I/O message for `Denied` entries that failed for a reason other than
    /// missing permissions (e.g. the entry vanished between listing and stat).
    pub note: Option<String>,
    /// The entry's own (not followed) metadata, when it could be read.
    pub metadata: Option<Metadata>,
}

impl Classification {
    fn denied(err: &io::Error) -> Self {
        Self {
            kind: NodeKind::Denied,
            symlink_target: None,
            note: denied_note(err),
            metadata: None,
        }
    }
}

/// Inspect `path` and decide what kind of node it becomes.
///
/// Directory symlinks are not followed; only the link target's type is
/// checked so the node can say where it points.
pub fn classify(path: &Path) -> Classification {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) => return Classification::denied(&e),
    };

    if meta.file_type().is_symlink() {
        let symlink_target = fs::read_link(path)
            .ok()
            .map(|t| t.to_string_lossy().into_owned());
        // fs::metadata follows the link; any failure (missing target, loop,
        // unreadable target) makes it a broken link.
        let kind = match fs::metadata(path) {
            Ok(target) if target.is_dir() => NodeKind::SymlinkToDir,
            Ok(_) => NodeKind::SymlinkToFile,
            Err(_) => NodeKind::BrokenSymlink,
        };
        return Classification {
            kind,
            symlink_target,
            note: None,
            metadata: Some(meta),
        };
    }

    // Sockets, fifos and devices are shown as plain leaves.
    let kind = if meta.is_dir() {
        NodeKind::Directory
    } else {
        NodeKind::File
    };
    Classification {
        kind,
        symlink_target: None,
        note: None,
        metadata: Some(meta),
    }
}

/// Whether a base name is hidden: a leading `.` on every platform.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Note attached to a denied node. Permission failures need none since the
/// node kind already says it.
pub fn denied_note(err: &io::Error) -> Option<String> {
    if err.kind() == io::ErrorKind::PermissionDenied {
        None
    } else {
        Some(err.to_string())
    }
}

//! Progress reporting and cancellation hooks for the walker
//!
//! The walker knows nothing about how progress is displayed. It calls a
//! [`ProgressSink`] once per visited node and polls a [`CancelToken`] before
//! each step.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

/// Receives one notification per visited node.
pub trait ProgressSink: Send {
    /// `visited` is the running node count, starting at 1 for the root.
    fn node_visited(&self, visited: u64, path: &Path);
}

impl<F> ProgressSink for F
where
    F: Fn(u64, &Path) + Send,
{
    fn node_visited(&self, visited: u64, path: &Path) {
        self(visited, path)
    }
}

/// Progress message sent over a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub visited: u64,
    pub path: PathBuf,
}

impl ProgressSink for Sender<Progress> {
    fn node_visited(&self, visited: u64, path: &Path) {
        // A dropped receiver just means nobody is watching anymore
        let _ = self.send(Progress {
            visited,
            path: path.to_path_buf(),
        });
    }
}

/// Shared flag a caller sets to stop a walk early.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_channel_sink_sends_progress() {
        let (tx, rx) = mpsc::channel();
        tx.node_visited(3, Path::new("a/b"));
        assert_eq!(
            rx.recv().unwrap(),
            Progress {
                visited: 3,
                path: PathBuf::from("a/b")
            }
        );
    }

    #[test]
    fn test_channel_sink_ignores_dropped_receiver() {
        let (tx, rx) = mpsc::channel::<Progress>();
        drop(rx);
        tx.node_visited(1, Path::new("."));
    }
}

//! Background walks
//!
//! Runs a [`TreeWalker`] on its own thread so a caller (a terminal spinner, a
//! UI event loop) stays responsive. Progress and the final result travel over
//! one channel; the walker thread is the only sender.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::error::{Result, TreeError};
use crate::tree::{CancelToken, Progress, TreeWalker, WalkOutcome, WalkerConfig};

/// Message from the walker thread.
#[derive(Debug)]
pub enum WalkEvent {
    Progress(Progress),
    Finished(Result<WalkOutcome>),
}

/// Handle to a walk running in the background.
pub struct WalkHandle {
    events: Receiver<WalkEvent>,
    cancel: CancelToken,
    thread: Option<JoinHandle<()>>,
}

/// Extra controls for a background walk.
#[derive(Debug, Clone, Default)]
pub struct WalkControl {
    /// Token the caller can cancel to stop the walk early.
    pub token: CancelToken,
    /// Cancel automatically once this many nodes have been visited.
    pub node_limit: Option<u64>,
}

/// Start walking `root` on a new thread.
pub fn spawn_walk(root: impl Into<PathBuf>, config: WalkerConfig) -> Result<WalkHandle> {
    spawn_walk_with(root, config, WalkControl::default())
}

/// Start walking `root` on a new thread with the given controls.
pub fn spawn_walk_with(
    root: impl Into<PathBuf>,
    config: WalkerConfig,
    control: WalkControl,
) -> Result<WalkHandle> {
    let root = root.into();
    let (tx, rx) = mpsc::channel();
    let WalkControl { token, node_limit } = control;
    let walker_token = token.clone();
    let limit_token = token.clone();

    let thread = thread::Builder::new()
        .name("canopy-walk".to_string())
        .spawn(move || {
            let progress_tx = tx.clone();
            let sink = move |visited: u64, path: &Path| {
                // Checked on the walker thread so the limit is exact
                if node_limit.is_some_and(|limit| visited >= limit) {
                    limit_token.cancel();
                }
                let _ = progress_tx.send(WalkEvent::Progress(Progress {
                    visited,
                    path: path.to_path_buf(),
                }));
            };
            let result = TreeWalker::new(config)
                .with_cancel_token(walker_token)
                .with_progress(sink)
                .walk(&root);
            let _ = tx.send(WalkEvent::Finished(result));
        })?;

    Ok(WalkHandle {
        events: rx,
        cancel: token,
        thread: Some(thread),
    })
}

impl WalkHandle {
    /// Ask the walker to stop. It finishes the node it is on and reports a
    /// cancelled outcome with the partial tree.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Wait up to `timeout` for the next event. `None` on timeout or once the
    /// walker thread is gone.
    pub fn next_event(&self, timeout: Duration) -> Option<WalkEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Block until the walk finishes, discarding progress.
    pub fn wait(self) -> Result<WalkOutcome> {
        self.wait_with(|_| {})
    }

    /// Block until the walk finishes, passing every progress event to
    /// `on_progress` on the calling thread.
    pub fn wait_with(mut self, mut on_progress: impl FnMut(&Progress)) -> Result<WalkOutcome> {
        let result = loop {
            match self.events.recv() {
                Ok(WalkEvent::Progress(p)) => on_progress(&p),
                Ok(WalkEvent::Finished(result)) => break result,
                Err(_) => break Err(TreeError::WorkerPanicked),
            }
        };
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                debug!("walk thread panicked after reporting");
            }
        }
        result
    }
}

impl Drop for WalkHandle {
    fn drop(&mut self) {
        // Abandoned walks should not keep scanning in the background
        if self.thread.is_some() {
            self.cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), "").unwrap();
        fs::write(dir.path().join("Cargo.toml"), "").unwrap();
        dir
    }

    #[test]
    fn test_background_walk_matches_direct_walk() {
        let dir = sample_dir();
        let direct = TreeWalker::new(WalkerConfig::default())
            .walk(dir.path())
            .unwrap();
        let background = spawn_walk(dir.path(), WalkerConfig::default())
            .unwrap()
            .wait()
            .unwrap();
        assert_eq!(direct, background);
    }

    #[test]
    fn test_progress_events_reach_caller_in_order() {
        let dir = sample_dir();
        let mut seen = Vec::new();
        let outcome = spawn_walk(dir.path(), WalkerConfig::default())
            .unwrap()
            .wait_with(|p| seen.push(p.visited))
            .unwrap();

        let total = outcome.tree().node_count() as u64;
        assert_eq!(seen, (1..=total).collect::<Vec<_>>());
    }

    #[test]
    fn test_root_error_is_forwarded() {
        let dir = TempDir::new().unwrap();
        let result = spawn_walk(dir.path().join("missing"), WalkerConfig::default())
            .unwrap()
            .wait();
        assert!(matches!(result, Err(TreeError::RootInvalid { .. })));
    }

    #[test]
    fn test_cancelled_token_yields_cancelled_outcome() {
        let dir = sample_dir();
        let token = CancelToken::new();
        token.cancel();
        let control = WalkControl {
            token,
            node_limit: None,
        };
        let outcome = spawn_walk_with(dir.path(), WalkerConfig::default(), control)
            .unwrap()
            .wait()
            .unwrap();
        assert!(outcome.is_cancelled());
        assert!(outcome.tree().children.is_empty());
    }

    #[test]
    fn test_node_limit_is_exact() {
        let dir = TempDir::new().unwrap();
        for i in 0..20 {
            fs::write(dir.path().join(format!("f{i:02}")), "").unwrap();
        }
        let control = WalkControl {
            node_limit: Some(5),
            ..WalkControl::default()
        };
        let mut last = 0;
        let outcome = spawn_walk_with(dir.path(), WalkerConfig::default(), control)
            .unwrap()
            .wait_with(|p| last = p.visited)
            .unwrap();
        assert!(outcome.is_cancelled());
        assert_eq!(outcome.tree().node_count(), 5);
        assert_eq!(last, 5);
    }

    #[test]
    fn test_node_limit_above_total_completes() {
        let dir = sample_dir();
        let control = WalkControl {
            node_limit: Some(1_000),
            ..WalkControl::default()
        };
        let outcome = spawn_walk_with(dir.path(), WalkerConfig::default(), control)
            .unwrap()
            .wait()
            .unwrap();
        assert!(!outcome.is_cancelled());
    }

    #[test]
    fn test_next_event_ends_with_finished() {
        let dir = sample_dir();
        let handle = spawn_walk(dir.path(), WalkerConfig::default()).unwrap();
        let mut finished = false;
        while let Some(event) = handle.next_event(Duration::from_secs(5)) {
            if let WalkEvent::Finished(result) = event {
                assert!(result.is_ok());
                finished = true;
                break;
            }
        }
        assert!(finished);
    }
}

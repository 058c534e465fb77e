//! Error types for canopy
//!
//! Only failures that stop a walk from producing a tree at all cross the
//! engine boundary. Everything below the root is folded into the tree itself
//! (denied nodes, broken links, missing metadata).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    /// The root does not exist or is not a directory.
    #[error("cannot access '{}': {reason}", path.display())]
    RootInvalid { path: PathBuf, reason: String },

    /// The root exists but its listing could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A settings document carried a value outside its allowed range.
    #[error("invalid settings: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The background walk thread exited without sending a result.
    #[error("walk worker stopped before reporting a result")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, TreeError>;

//! Directory tree walking logic
//!
//! `TreeWalker` classifies each entry, applies the exclusion filter before
//! anything is listed, and builds a sorted, acyclic `TreeNode` snapshot that
//! every output format is rendered from.

mod classify;
mod config;
mod filter;
mod node;
mod progress;
mod walker;

// Re-export public types
pub use classify::{Classification, classify, is_hidden};
pub use config::WalkerConfig;
pub use filter::{DEFAULT_EXCLUSIONS, ExclusionConfig, ExclusionFilter, parse_exclusion_list};
pub use node::{NodeKind, NodeMetadata, TreeNode};
pub use progress::{CancelToken, Progress, ProgressSink};
pub use walker::{TreeWalker, WalkOutcome};

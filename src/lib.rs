//! Canopy - folder trees as text, JSON, HTML or Markdown snapshots

pub mod error;
pub mod output;
pub mod settings;
pub mod tree;
pub mod worker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Result, TreeError};
pub use output::{
    OutputFormat, RenderOptions, SymbolStyle, TextRenderer, parse_json, render, render_html,
    render_json, render_markdown, render_text,
};
pub use settings::Settings;
pub use tree::{
    CancelToken, ExclusionConfig, NodeKind, NodeMetadata, TreeNode, TreeWalker, WalkOutcome,
    WalkerConfig,
};
pub use worker::{WalkControl, WalkEvent, WalkHandle, spawn_walk, spawn_walk_with};

/// Walk `root` and return the finished (or cancelled) tree.
pub fn walk(root: &std::path::Path, config: WalkerConfig) -> Result<WalkOutcome> {
    TreeWalker::new(config).walk(root)
}

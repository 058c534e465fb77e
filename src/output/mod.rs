//! Tree formatting and display
//!
//! This module renders a `TreeNode` snapshot into each export format:
//! - Text (connector glyphs, optionally colored on a terminal)
//! - JSON
//! - HTML
//! - Markdown
//!
//! Every renderer is a pure function of the tree and its options.

mod config;
mod html;
mod json;
mod markdown;
mod text;
mod utils;

use std::path::Path;

use clap::ValueEnum;

use crate::tree::TreeNode;

// Re-export public types and functions
pub use config::{RenderOptions, SymbolStyle, TreeSymbols};
pub use html::render_html;
pub use json::{parse_json, render_json};
pub use markdown::render_markdown;
pub use text::{TextRenderer, render_text};
pub use utils::{escape_html, format_metadata, format_size, plain_label};

/// Export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
    Markdown,
}

impl OutputFormat {
    /// Pick a format from a file extension, defaulting to text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => OutputFormat::Json,
            "html" | "htm" => OutputFormat::Html,
            "md" | "markdown" => OutputFormat::Markdown,
            _ => OutputFormat::Text,
        }
    }
}

/// Render `node` in the requested format.
pub fn render(node: &TreeNode, format: OutputFormat, options: &RenderOptions) -> String {
    match format {
        OutputFormat::Text => render_text(node, options),
        OutputFormat::Json => render_json(node),
        OutputFormat::Html => render_html(node),
        OutputFormat::Markdown => render_markdown(node, options),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{TimeZone, Utc};

    use crate::tree::{NodeKind, NodeMetadata};

    use super::*;

    const ALL_FORMATS: [OutputFormat; 4] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Html,
        OutputFormat::Markdown,
    ];

    /// Helper to build a tree holding every node kind.
    fn build_integration_test_tree() -> TreeNode {
        let modified = Utc.with_ymd_and_hms(2023, 11, 2, 9, 15, 0).unwrap();
        TreeNode::directory(
            "test_project",
            vec![
                TreeNode::file("simple.txt").with_metadata(Some(NodeMetadata {
                    size: 42,
                    modified,
                })),
                TreeNode::directory(
                    "src",
                    vec![TreeNode::file("lib.rs"), TreeNode::file("config.rs")],
                ),
                TreeNode::truncated_directory("vendor"),
                TreeNode::symlink("docs", NodeKind::SymlinkToDir, Some("../docs".into())),
                TreeNode::symlink("old.rs", NodeKind::BrokenSymlink, None),
                TreeNode::denied("private", None),
            ],
        )
    }

    #[test]
    fn test_all_formats_contain_same_names() {
        let tree = build_integration_test_tree();
        let options = RenderOptions::default();
        for format in ALL_FORMATS {
            let output = render(&tree, format, &options);
            for name in ["simple.txt", "src", "lib.rs", "config.rs", "vendor", "docs", "old.rs", "private"] {
                assert!(output.contains(name), "{format:?} output lacks {name}");
            }
        }
    }

    #[test]
    fn test_every_renderer_handles_every_kind_alone() {
        let kinds = [
            NodeKind::File,
            NodeKind::Directory,
            NodeKind::SymlinkToDir,
            NodeKind::SymlinkToFile,
            NodeKind::BrokenSymlink,
            NodeKind::Denied,
        ];
        for kind in kinds {
            let node = TreeNode {
                kind,
                ..TreeNode::file("lonely")
            };
            for format in ALL_FORMATS {
                let output = render(&node, format, &RenderOptions::default());
                assert!(output.contains("lonely"), "{format:?}/{kind:?}");
            }
        }
    }

    #[test]
    fn test_denied_marker_in_every_format() {
        let node = TreeNode::denied("locked", None);
        for format in ALL_FORMATS {
            let output = render(&node, format, &RenderOptions::default()).to_lowercase();
            assert!(output.contains("denied"), "{format:?}: {output}");
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(&PathBuf::from("t.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(&PathBuf::from("t.HTML")), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path(&PathBuf::from("t.htm")), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path(&PathBuf::from("t.md")), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_path(&PathBuf::from("t.txt")), OutputFormat::Text);
        assert_eq!(OutputFormat::from_path(&PathBuf::from("tree")), OutputFormat::Text);
    }
}

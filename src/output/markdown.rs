//! Markdown output formatting
//!
//! The text tree inside a fenced code block, so it survives Markdown
//! rendering with its alignment intact.

use crate::tree::TreeNode;

use super::config::RenderOptions;
use super::text::render_text;

/// Render the tree as a fenced Markdown code block.
pub fn render_markdown(node: &TreeNode, options: &RenderOptions) -> String {
    let text = render_text(node, options);
    format!("```\n{}\n```\n", text.trim_end_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::SymbolStyle;

    #[test]
    fn test_fenced_text_tree() {
        let tree = TreeNode::directory("root", vec![TreeNode::file("a.txt")]);
        let md = render_markdown(&tree, &RenderOptions::default());
        assert_eq!(md, "```\nroot\n└── a.txt\n```\n");
    }

    #[test]
    fn test_uses_selected_symbols() {
        let tree = TreeNode::directory("root", vec![TreeNode::file("a.txt")]);
        let md = render_markdown(&tree, &RenderOptions::with_symbols(SymbolStyle::Ascii));
        assert!(md.contains("`-- a.txt"));
    }

    #[test]
    fn test_denied_marker_survives() {
        let md = render_markdown(&TreeNode::denied("x", None), &RenderOptions::default());
        assert!(md.contains("[Permission Denied]"));
        assert!(md.starts_with("```\n") && md.ends_with("```\n"));
    }
}

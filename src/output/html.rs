//! HTML output formatting
//!
//! Produces a `<ul>` fragment with one `<li>` per node. Each item carries the
//! node kind as its class so a stylesheet can tell links from directories.

use crate::tree::TreeNode;

use super::utils::{TRUNCATED_MARKER, escape_html, plain_label};

/// Render the tree as a nested unordered list.
pub fn render_html(node: &TreeNode) -> String {
    let mut out = String::from("<ul>\n");
    write_item(&mut out, node);
    out.push_str("</ul>\n");
    out
}

fn write_item(out: &mut String, node: &TreeNode) {
    out.push_str("<li class=\"");
    out.push_str(node.kind.as_str());
    out.push_str("\">");
    out.push_str(&escape_html(&plain_label(node)));

    if node.truncated {
        out.push_str("\n<ul>\n<li class=\"truncated\">");
        out.push_str(TRUNCATED_MARKER);
        out.push_str("</li>\n</ul>\n");
    } else if !node.children.is_empty() {
        out.push_str("\n<ul>\n");
        for child in &node.children {
            write_item(out, child);
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</li>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    #[test]
    fn test_nested_lists() {
        let tree = TreeNode::directory(
            "root",
            vec![
                TreeNode::file("a.txt"),
                TreeNode::directory("b", vec![TreeNode::file("c.rs")]),
            ],
        );
        let expected = "\
<ul>
<li class=\"directory\">root
<ul>
<li class=\"file\">a.txt</li>
<li class=\"directory\">b
<ul>
<li class=\"file\">c.rs</li>
</ul>
</li>
</ul>
</li>
</ul>
";
        assert_eq!(render_html(&tree), expected);
    }

    #[test]
    fn test_names_are_escaped() {
        let tree = TreeNode::directory(
            "root",
            vec![
                TreeNode::file("<script>alert('x')</script>.html"),
                TreeNode::symlink("a&b", NodeKind::SymlinkToFile, Some("\"q\"".into())),
            ],
        );
        let html = render_html(&tree);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;.html"));
        assert!(html.contains("a&amp;b -&gt; &quot;q&quot;"));
    }

    #[test]
    fn test_truncated_and_denied_items() {
        let tree = TreeNode::directory(
            "root",
            vec![
                TreeNode::truncated_directory("deep"),
                TreeNode::denied("locked", None),
            ],
        );
        let html = render_html(&tree);
        assert!(html.contains("<li class=\"truncated\">...</li>"));
        assert!(html.contains("<li class=\"denied\">locked [Permission Denied]</li>"));
    }

    #[test]
    fn test_lone_denied_node() {
        let html = render_html(&TreeNode::denied("x", None));
        assert_eq!(html, "<ul>\n<li class=\"denied\">x [Permission Denied]</li>\n</ul>\n");
    }
}

//! JSON output formatting

use crate::error::Result;
use crate::tree::TreeNode;

/// Serialize the tree as pretty-printed, newline-terminated JSON.
///
/// Every node carries `name`, `kind`, `metadata`, `symlinkTarget`,
/// `truncated` and `children`; `note` appears only when set.
pub fn render_json(node: &TreeNode) -> String {
    // TreeNode has string keys and plain data only, so serialization
    // cannot fail; fall back to an empty object rather than panic.
    let mut json = serde_json::to_string_pretty(node).unwrap_or_else(|_| "{}".to_string());
    json.push('\n');
    json
}

/// Rebuild a tree from [`render_json`] output.
pub fn parse_json(json: &str) -> Result<TreeNode> {
    Ok(serde_json::from_str(json)?)
}

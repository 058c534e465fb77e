//! Plain text tree output
//!
//! `TextRenderer` draws the tree with connector glyphs, either into a string
//! (for export) or straight to stdout with colors.

use std::io::{self, Write};

use termcolor::{ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::tree::TreeNode;

use super::config::RenderOptions;
use super::utils::{TRUNCATED_MARKER, write_label};

/// Formatter for text tree output.
pub struct TextRenderer {
    options: RenderOptions,
}

impl TextRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render the tree as newline-terminated text without colors.
    pub fn render(&self, node: &TreeNode) -> String {
        let mut out = NoColor::new(Vec::new());
        // In-memory writes cannot fail
        let _ = self.write_node(&mut out, node, "", true, true);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    /// Print the tree to stdout, colored when `use_color` is set.
    pub fn print(&self, node: &TreeNode) -> io::Result<()> {
        let choice = if self.options.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_node(&mut stdout, node, "", true, true)?;
        stdout.flush()
    }

    fn write_node<W: WriteColor>(
        &self,
        w: &mut W,
        node: &TreeNode,
        prefix: &str,
        is_last: bool,
        is_root: bool,
    ) -> io::Result<()> {
        let symbols = self.options.symbols.symbols();

        if !is_root {
            let connector = if is_last { symbols.last } else { symbols.branch };
            write!(w, "{}{}", prefix, connector)?;
        }
        write_label(w, node)?;
        writeln!(w)?;

        let child_prefix = if is_root {
            String::new()
        } else if is_last {
            format!("{}{}", prefix, symbols.blank)
        } else {
            format!("{}{}", prefix, symbols.indent)
        };

        if node.truncated {
            write!(w, "{}{}", child_prefix, symbols.last)?;
            let mut dim = ColorSpec::new();
            dim.set_dimmed(true);
            w.set_color(&dim)?;
            write!(w, "{}", TRUNCATED_MARKER)?;
            w.reset()?;
            writeln!(w)?;
            return Ok(());
        }

        for (i, child) in node.children.iter().enumerate() {
            let child_is_last = i == node.children.len() - 1;
            self.write_node(w, child, &child_prefix, child_is_last, false)?;
        }
        Ok(())
    }
}

/// Render `node` as a text tree.
pub fn render_text(node: &TreeNode, options: &RenderOptions) -> String {
    TextRenderer::new(options.clone()).render(node)
}

//! Shared utility functions for output formatting

use std::io::{self, Write};

use chrono::Local;
use termcolor::{Color, ColorSpec, NoColor, WriteColor};

use crate::tree::{NodeKind, NodeMetadata, TreeNode};

pub const DENIED_MARKER: &str = "[Permission Denied]";
pub const BROKEN_MARKER: &str = "[Broken Link]";
pub const INVALID_LINK_MARKER: &str = "[Invalid Symlink]";
pub const TRUNCATED_MARKER: &str = "...";

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}

/// `(SIZE, YYYY-MM-DD HH:MM:SS)` in local time.
pub fn format_metadata(meta: &NodeMetadata) -> String {
    format!(
        "({}, {})",
        format_size(meta.size),
        meta.modified
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    )
}

fn write_styled<W: WriteColor>(w: &mut W, text: &str, spec: &ColorSpec) -> io::Result<()> {
    w.set_color(spec)?;
    write!(w, "{}", text)?;
    w.reset()
}

fn fg(color: Color) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color));
    spec
}

/// Write a node's display label: its name plus whatever annotation its kind
/// calls for. Colors are dropped by non-color writers.
pub fn write_label<W: WriteColor>(w: &mut W, node: &TreeNode) -> io::Result<()> {
    match node.kind {
        NodeKind::Directory => {
            let mut spec = fg(Color::Blue);
            spec.set_bold(true);
            write_styled(w, &node.name, &spec)?;
        }
        NodeKind::File => write!(w, "{}", node.name)?,
        NodeKind::SymlinkToDir | NodeKind::SymlinkToFile | NodeKind::BrokenSymlink => {
            write_styled(w, &node.name, &fg(Color::Cyan))?;
            write!(w, " -> ")?;
            match &node.symlink_target {
                Some(target) => write!(w, "{}", target)?,
                None => write_styled(w, INVALID_LINK_MARKER, &fg(Color::Red))?,
            }
            if node.kind == NodeKind::BrokenSymlink {
                write!(w, " ")?;
                write_styled(w, BROKEN_MARKER, &fg(Color::Red))?;
            }
        }
        NodeKind::Denied => {
            write_styled(w, &node.name, &fg(Color::Red))?;
            let marker = match &node.note {
                Some(note) => format!(" [Permission Denied: {}]", note),
                None => format!(" {}", DENIED_MARKER),
            };
            write_styled(w, &marker, &fg(Color::Red))?;
        }
    }

    if let Some(meta) = &node.metadata {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        write!(w, " ")?;
        write_styled(w, &format_metadata(meta), &spec)?;
    }

    if node.kind != NodeKind::Denied {
        if let Some(note) = &node.note {
            write!(w, " ")?;
            write_styled(w, &format!("[{}]", note), &fg(Color::Yellow))?;
        }
    }
    Ok(())
}

/// The label as plain text.
pub fn plain_label(node: &TreeNode) -> String {
    let mut out = NoColor::new(Vec::new());
    // In-memory writes cannot fail
    let _ = write_label(&mut out, node);
    String::from_utf8_lossy(&out.into_inner()).into_owned()
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

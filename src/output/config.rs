//! Output configuration types

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Connector glyph set used by the text renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum SymbolStyle {
    /// Box-drawing characters (`├──`, `└──`, `│`)
    #[default]
    Classic,
    /// Pipes and backslashes (`|--`, `\--`)
    Simple,
    /// Plain ASCII (`+--`, `` `-- ``)
    #[serde(rename = "ASCII")]
    #[value(name = "ascii")]
    Ascii,
}

/// The four strings that make up one indentation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeSymbols {
    /// Connector for a child that has siblings after it.
    pub branch: &'static str,
    /// Connector for the last child.
    pub last: &'static str,
    /// Indentation below a non-last child.
    pub indent: &'static str,
    /// Indentation below the last child.
    pub blank: &'static str,
}

impl SymbolStyle {
    pub fn symbols(self) -> TreeSymbols {
        match self {
            SymbolStyle::Classic => TreeSymbols {
                branch: "├── ",
                last: "└── ",
                indent: "│   ",
                blank: "    ",
            },
            SymbolStyle::Simple => TreeSymbols {
                branch: "|-- ",
                last: "\\-- ",
                indent: "|   ",
                blank: "    ",
            },
            SymbolStyle::Ascii => TreeSymbols {
                branch: "+-- ",
                last: "`-- ",
                indent: "|   ",
                blank: "    ",
            },
        }
    }
}

/// Configuration for output formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub symbols: SymbolStyle,
    /// Only used when printing straight to a terminal.
    pub use_color: bool,
}

impl RenderOptions {
    pub fn with_symbols(symbols: SymbolStyle) -> Self {
        Self {
            symbols,
            use_color: false,
        }
    }
}

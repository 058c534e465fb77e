//! Persisted settings document
//!
//! A JSON file holding the same fields a user configures for a walk:
//!
//! ```json
//! {
//!   "defaultExclusions": [".git", "node_modules"],
//!   "extraExclusions": ["target"],
//!   "maxDepth": 3,
//!   "showMetadata": false,
//!   "symbolStyle": "Classic",
//!   "hideHidden": true
//! }
//! ```
//!
//! Missing fields fall back to their defaults.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};
use crate::output::{RenderOptions, SymbolStyle};
use crate::tree::{ExclusionConfig, WalkerConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub default_exclusions: BTreeSet<String>,
    pub extra_exclusions: BTreeSet<String>,
    pub max_depth: Option<usize>,
    pub show_metadata: bool,
    pub symbol_style: SymbolStyle,
    pub hide_hidden: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let exclusions = ExclusionConfig::default();
        Self {
            default_exclusions: exclusions.default_exclusions,
            extra_exclusions: exclusions.extra_exclusions,
            max_depth: None,
            show_metadata: false,
            symbol_style: SymbolStyle::default(),
            hide_hidden: exclusions.hide_hidden,
        }
    }
}

impl Settings {
    /// Read and validate a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let settings = Self::from_json(&raw)?;
        debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write the settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json)?;
        debug!("saved settings to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(TreeError::Settings(
                "maxDepth must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn exclusions(&self) -> ExclusionConfig {
        ExclusionConfig {
            default_exclusions: self.default_exclusions.clone(),
            extra_exclusions: self.extra_exclusions.clone(),
            hide_hidden: self.hide_hidden,
        }
    }

    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            max_depth: self.max_depth,
            exclusions: self.exclusions(),
            show_metadata: self.show_metadata,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::with_symbols(self.symbol_style)
    }
}

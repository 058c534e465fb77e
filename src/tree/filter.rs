//! Name-based exclusion of directory entries
//!
//! Exclusion happens before an entry is classified or listed, so an excluded
//! directory costs nothing no matter how large it is.

use std::collections::BTreeSet;

use glob::Pattern;
use serde::{Deserialize, Serialize};

use super::classify::is_hidden;

/// Build and version-control artifacts skipped unless the user turns them off.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "dist",
    "__pycache__",
    ".venv",
];

/// Exclusion settings as the user configures them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExclusionConfig {
    /// Enabled subset of the default exclusions (may be edited by the user).
    pub default_exclusions: BTreeSet<String>,
    /// User-supplied names or patterns.
    pub extra_exclusions: BTreeSet<String>,
    /// Skip entries whose name starts with a dot.
    pub hide_hidden: bool,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            default_exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            extra_exclusions: BTreeSet::new(),
            hide_hidden: true,
        }
    }
}

impl ExclusionConfig {
    /// No default exclusions, nothing hidden.
    pub fn none() -> Self {
        Self {
            default_exclusions: BTreeSet::new(),
            extra_exclusions: BTreeSet::new(),
            hide_hidden: false,
        }
    }

    pub fn with_extra<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_exclusions
            .extend(names.into_iter().map(Into::into));
        self
    }
}

/// Split comma-separated user input into exclusion entries.
pub fn parse_exclusion_list(input: &str) -> BTreeSet<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A user pattern with glob metacharacters, compiled once.
#[derive(Debug, Clone)]
struct GlobRule {
    pattern: Pattern,
    dirs_only: bool,
}

/// Compiled form of [`ExclusionConfig`] used by the walker.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    names: BTreeSet<String>,
    dir_names: BTreeSet<String>,
    globs: Vec<GlobRule>,
    hide_hidden: bool,
}

impl ExclusionFilter {
    pub fn new(config: &ExclusionConfig) -> Self {
        let mut names = BTreeSet::new();
        let mut dir_names = BTreeSet::new();
        let mut globs = Vec::new();

        for raw in config
            .default_exclusions
            .iter()
            .chain(config.extra_exclusions.iter())
        {
            let (entry, dirs_only) = match raw.strip_suffix('/') {
                Some(stripped) if !stripped.is_empty() => (stripped, true),
                _ => (raw.as_str(), false),
            };

            if has_glob_meta(entry) {
                // An invalid pattern still works as a literal name
                if let Ok(pattern) = Pattern::new(entry) {
                    globs.push(GlobRule { pattern, dirs_only });
                    continue;
                }
            }

            if dirs_only {
                dir_names.insert(entry.to_string());
            } else {
                names.insert(entry.to_string());
            }
        }

        Self {
            names,
            dir_names,
            globs,
            hide_hidden: config.hide_hidden,
        }
    }

    /// Decide whether an entry is skipped. Names match exactly and
    /// case-sensitively; patterns ending in `/` only apply to directories.
    pub fn should_exclude(&self, name: &str, is_dir: bool) -> bool {
        if self.hide_hidden && is_hidden(name) {
            return true;
        }
        if self.names.contains(name) || (is_dir && self.dir_names.contains(name)) {
            return true;
        }
        self.globs
            .iter()
            .any(|rule| (is_dir || !rule.dirs_only) && rule.pattern.matches(name))
    }
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

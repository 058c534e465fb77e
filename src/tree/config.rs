//! Configuration types for the tree walker

use super::filter::ExclusionConfig;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Directories deeper than this are shown but not listed.
    /// The root's own entries are always listed.
    pub max_depth: Option<usize>,
    pub exclusions: ExclusionConfig,
    /// Read size and modification time for files.
    pub show_metadata: bool,
}

impl WalkerConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionConfig) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_metadata(mut self, show: bool) -> Self {
        self.show_metadata = show;
        self
    }
}

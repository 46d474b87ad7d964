//! Configuration types for tree rendering

use crate::ignore_rules::DEFAULT_IGNORE_PATTERNS;

/// Configuration for tree rendering behavior.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Name rules: literal names, `*.ext` suffixes, or name globs.
    pub ignore_patterns: Vec<String>,
    /// Load `<root>/.gitignore` and apply it after the name rules.
    pub use_gitignore: bool,
    /// Descend at most this many levels below the root (root children are level 1).
    pub max_depth: Option<usize>,
}

impl RenderConfig {
    /// A configuration with no name rules at all.
    pub fn empty() -> Self {
        Self {
            ignore_patterns: Vec::new(),
            ..Default::default()
        }
    }

    /// Append extra ignore patterns after the existing ones.
    pub fn with_extra_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Whether a directory at `depth` may be descended into.
    pub fn can_descend(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            use_gitignore: true,
            max_depth: None,
        }
    }
}

//! Name-based ignore rules (defaults plus `-I` patterns)

use glob::Pattern;

use crate::diagnostics::Diagnostic;

/// Names and patterns hidden unless the caller opts out.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    ".env",
    ".idea",
    ".vscode",
    "*.pyc",
    "*.pyo",
    "*.pyd",
    ".DS_Store",
];

/// A single rule, matched against an entry's bare file name.
#[derive(Debug, Clone)]
pub enum IgnoreRule {
    /// Exact name, e.g. `.git`.
    Name(String),
    /// `*.ext` stored as `.ext`; matches any name ending with it.
    Suffix(String),
    /// Any other wildcard pattern, e.g. `test_*` or `[ab].txt`.
    Glob(Pattern),
}

impl IgnoreRule {
    /// Classify a raw pattern string.
    ///
    /// A pattern that looks like a glob but fails to compile is kept as a
    /// literal name rule and reported.
    pub fn parse(pattern: &str, diagnostics: &mut Vec<Diagnostic>) -> Self {
        if let Some(ext) = pattern.strip_prefix("*.") {
            if !ext.is_empty() && !has_glob_meta(ext) {
                return IgnoreRule::Suffix(format!(".{}", ext));
            }
        }

        if !has_glob_meta(pattern) {
            return IgnoreRule::Name(pattern.to_string());
        }

        match Pattern::new(pattern) {
            Ok(p) => IgnoreRule::Glob(p),
            Err(e) => {
                diagnostics.push(Diagnostic::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                });
                IgnoreRule::Name(pattern.to_string())
            }
        }
    }
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Immutable set of name rules for one traversal.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    names: Vec<String>,
    suffixes: Vec<String>,
    globs: Vec<Pattern>,
}

impl IgnoreRules {
    pub fn new<S: AsRef<str>>(patterns: &[S], diagnostics: &mut Vec<Diagnostic>) -> Self {
        let mut rules = Self::default();
        for pattern in patterns {
            match IgnoreRule::parse(pattern.as_ref(), diagnostics) {
                IgnoreRule::Name(n) => rules.names.push(n),
                IgnoreRule::Suffix(s) => rules.suffixes.push(s),
                IgnoreRule::Glob(g) => rules.globs.push(g),
            }
        }
        rules
    }

    /// The built-in default set.
    pub fn defaults() -> Self {
        // Defaults contain no invalid globs, nothing to report.
        Self::new(DEFAULT_IGNORE_PATTERNS, &mut Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.suffixes.is_empty() && self.globs.is_empty()
    }

    /// Literal name match (rule 1).
    pub fn matches_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// `*.ext` match (rule 2).
    pub fn matches_suffix(&self, name: &str) -> bool {
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    /// Wildcard match against the bare name.
    pub fn matches_glob(&self, name: &str) -> bool {
        self.globs.iter().any(|p| p.matches(name))
    }

    /// Any rule matches the bare name, in precedence order.
    pub fn matches(&self, name: &str) -> bool {
        self.matches_name(name) || self.matches_suffix(name) || self.matches_glob(name)
    }
}

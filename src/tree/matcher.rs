//! Ignore decisions for directory entries

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::diagnostics::Diagnostic;
use crate::gitignore::GitignoreSpec;
use crate::ignore_rules::IgnoreRules;

use super::config::RenderConfig;

/// Decide whether `path` is excluded from the tree.
///
/// Name rules are checked first (literal, then `*.ext`, then name globs) and
/// always win. Only if none of them match is the gitignore spec consulted,
/// with the path made relative to `root`; its verdict is final, including
/// re-inclusion by `!pattern`.
///
/// A path that is not under `root` is kept and reported.
pub fn should_ignore(
    path: &Path,
    is_dir: bool,
    root: &Path,
    rules: &IgnoreRules,
    gitignore: &GitignoreSpec,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    if rules.matches(&name) {
        trace!(path = %path.display(), "ignored by name rule");
        return true;
    }

    if !gitignore.is_present() {
        return false;
    }

    match path.strip_prefix(root) {
        Ok(relative) => {
            let ignored = gitignore.matches(relative, is_dir);
            if ignored {
                trace!(path = %path.display(), "ignored by .gitignore");
            }
            ignored
        }
        Err(_) => {
            diagnostics.push(Diagnostic::PathOutsideRoot {
                path: path.to_path_buf(),
                root: root.to_path_buf(),
            });
            false
        }
    }
}

/// Rule set and gitignore spec bound to one traversal root.
#[derive(Debug)]
pub struct Matcher {
    root: PathBuf,
    rules: IgnoreRules,
    gitignore: GitignoreSpec,
}

impl Matcher {
    pub fn new(root: &Path, rules: IgnoreRules, gitignore: GitignoreSpec) -> Self {
        Self {
            root: root.to_path_buf(),
            rules,
            gitignore,
        }
    }

    /// Build the matcher for a render, loading `.gitignore` if configured.
    pub fn from_config(root: &Path, config: &RenderConfig, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let rules = IgnoreRules::new(config.ignore_patterns.as_slice(), diagnostics);
        let gitignore = if config.use_gitignore {
            GitignoreSpec::load(root, diagnostics)
        } else {
            GitignoreSpec::Absent
        };
        Self::new(root, rules, gitignore)
    }

    pub fn has_gitignore(&self) -> bool {
        self.gitignore.is_present()
    }

    pub fn should_ignore(&self, path: &Path, is_dir: bool, diagnostics: &mut Vec<Diagnostic>) -> bool {
        should_ignore(
            path,
            is_dir,
            &self.root,
            &self.rules,
            &self.gitignore,
            diagnostics,
        )
    }
}

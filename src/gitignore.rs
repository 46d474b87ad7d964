//! `.gitignore` loading and matching

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::debug;

use crate::diagnostics::Diagnostic;

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Compiled gitignore rules for a traversal root, or nothing.
#[derive(Debug, Clone, Default)]
pub enum GitignoreSpec {
    #[default]
    Absent,
    Compiled(Gitignore),
}

impl GitignoreSpec {
    /// Load `<root>/.gitignore`.
    ///
    /// A missing file is not an error. Read and parse failures leave the spec
    /// absent and push exactly one diagnostic.
    pub fn load(root: &Path, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let path = root.join(GITIGNORE_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %root.display(), "no .gitignore");
                return GitignoreSpec::Absent;
            }
            Err(e) => {
                diagnostics.push(Diagnostic::GitignoreRead {
                    path,
                    reason: e.to_string(),
                });
                return GitignoreSpec::Absent;
            }
        };

        match Self::compile(root, &path, &contents) {
            Ok(spec) => spec,
            Err(diag) => {
                diagnostics.push(diag);
                GitignoreSpec::Absent
            }
        }
    }

    /// Compile gitignore-syntax lines as if they lived in `<root>/.gitignore`.
    pub fn from_lines(root: &Path, contents: &str) -> Result<Self, Diagnostic> {
        Self::compile(root, &root.join(GITIGNORE_FILE), contents)
    }

    fn compile(root: &Path, source: &Path, contents: &str) -> Result<Self, Diagnostic> {
        let mut builder = GitignoreBuilder::new(root);
        for (idx, line) in contents.lines().enumerate() {
            if let Err(e) = builder.add_line(Some(source.to_path_buf()), line) {
                return Err(parse_error(source, idx + 1, line, &e));
            }
        }

        let gitignore = builder
            .build()
            .map_err(|e| parse_error(source, 0, "", &e))?;

        debug!(
            path = %source.display(),
            rules = gitignore.num_ignores() + gitignore.num_whitelists(),
            "compiled .gitignore"
        );
        Ok(GitignoreSpec::Compiled(gitignore))
    }

    pub fn is_present(&self) -> bool {
        matches!(self, GitignoreSpec::Compiled(_))
    }

    /// Whether `relative` (a path relative to the root) is ignored.
    ///
    /// Later rules win, so a `!pattern` after an ignoring rule re-includes
    /// the path.
    pub fn matches(&self, relative: &Path, is_dir: bool) -> bool {
        match self {
            GitignoreSpec::Absent => false,
            GitignoreSpec::Compiled(gi) => gi.matched(relative, is_dir).is_ignore(),
        }
    }
}

fn parse_error(source: &Path, line: usize, pattern: &str, err: &ignore::Error) -> Diagnostic {
    let reason = if pattern.is_empty() {
        err.to_string()
    } else {
        format!("'{}': {}", pattern, err)
    };
    Diagnostic::GitignoreParse {
        path: PathBuf::from(source),
        line,
        reason,
    }
}

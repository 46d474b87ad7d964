//! Non-fatal problems reported while building and walking a tree
//!
//! Nothing in the traversal raises these as errors. They are pushed onto a
//! `Vec<Diagnostic>` threaded through the call chain so a failing directory
//! only loses its own subtree.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("could not read .gitignore file {}: {reason}", path.display())]
    GitignoreRead { path: PathBuf, reason: String },

    #[error(
        "invalid pattern in {} (line {line}): {reason}; gitignore filtering disabled",
        path.display()
    )]
    GitignoreParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("invalid ignore pattern '{pattern}': {reason}; matching it by name only")]
    InvalidPattern { pattern: String, reason: String },

    #[error("error processing path {}: not under {}", path.display(), root.display())]
    PathOutsideRoot { path: PathBuf, root: PathBuf },

    #[error("permission denied or unreadable directory {}: {reason}", path.display())]
    ReadDir { path: PathBuf, reason: String },

    #[error("{} points back to {}; not descending", path.display(), target.display())]
    SymlinkCycle { path: PathBuf, target: PathBuf },

    #[error("could not read metadata for {}: {reason}", path.display())]
    Metadata { path: PathBuf, reason: String },

    #[error("cannot access root directory {}: {reason}", path.display())]
    RootUnreadable { path: PathBuf, reason: String },
}

impl Diagnostic {
    /// Whether this diagnostic means the whole render failed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Diagnostic::RootUnreadable { .. })
    }
}

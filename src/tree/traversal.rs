//! Directory listing, filtering and ordering for one tree level.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostics::Diagnostic;

use super::config::RenderConfig;
use super::matcher::Matcher;

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const PIPE_INDENT: &str = "│   ";
pub const SPACE_INDENT: &str = "    ";

/// A directory entry as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub file_name: OsString,
    pub name: String,
    pub path: PathBuf,
    /// Symlinks are followed, so a link to a directory counts as a directory.
    pub is_dir: bool,
}

impl DirEntryInfo {
    /// The name as drawn in the tree: directories get a trailing `/`.
    pub fn display_name(&self) -> String {
        display_name(&self.name, self.is_dir)
    }
}

/// Common traversal state for rendering one root.
pub struct BaseTraversal<'a> {
    pub config: &'a RenderConfig,
    pub matcher: &'a Matcher,
}

impl<'a> BaseTraversal<'a> {
    pub fn new(config: &'a RenderConfig, matcher: &'a Matcher) -> Self {
        Self { config, matcher }
    }

    /// Check if a directory at `depth` should have its children listed
    pub fn can_descend(&self, depth: usize) -> bool {
        self.config.can_descend(depth)
    }

    /// Read, filter, and sort directory entries.
    ///
    /// Failing to open the directory is returned to the caller. Failures on
    /// individual entries drop that entry and are reported.
    pub fn read_and_filter_entries(
        &self,
        path: &Path,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    diagnostics.push(Diagnostic::ReadDir {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let entry_path = entry.path();
            // Follows symlinks; a dangling link falls back to its own file type.
            let is_dir = match fs::metadata(&entry_path) {
                Ok(meta) => meta.is_dir(),
                Err(_) => match entry.file_type() {
                    Ok(ft) => ft.is_dir(),
                    Err(e) => {
                        diagnostics.push(Diagnostic::Metadata {
                            path: entry_path,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                },
            };

            if self.matcher.should_ignore(&entry_path, is_dir, diagnostics) {
                continue;
            }

            let file_name = entry.file_name();
            entries.push(DirEntryInfo {
                name: file_name.to_string_lossy().to_string(),
                file_name,
                path: entry_path,
                is_dir,
            });
        }

        sort_entries(&mut entries);
        debug!(dir = %path.display(), entries = entries.len(), "listed directory");
        Ok(entries)
    }
}

/// Sort entries by file name in byte order of the platform string.
///
/// On Unix this is plain byte order, which for UTF-8 names equals Unicode
/// code point order. No locale or case folding is applied, so `B` sorts
/// before `a`.
pub fn sort_entries(entries: &mut [DirEntryInfo]) {
    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
}

pub fn connector(is_last: bool) -> &'static str {
    if is_last { LAST_BRANCH } else { BRANCH }
}

pub fn child_prefix(current_prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}{}", current_prefix, SPACE_INDENT)
    } else {
        format!("{}{}", current_prefix, PIPE_INDENT)
    }
}

pub fn display_name(name: &str, is_dir: bool) -> String {
    if is_dir {
        format!("{}/", name)
    } else {
        name.to_string()
    }
}

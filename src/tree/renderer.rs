//! TreeRenderer - renders a directory as prefixed tree lines

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostics::Diagnostic;

use super::config::RenderConfig;
use super::matcher::Matcher;
use super::traversal::{BaseTraversal, DirEntryInfo, child_prefix, connector};

/// Directory and file counts for a render (root excluded).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub dirs: usize,
    pub files: usize,
}

/// Result of rendering a root.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    /// One `\n`-terminated line per entry, root first. Empty if the root could not be listed.
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: RenderStats,
}

impl Rendered {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the root itself could not be listed.
    pub fn root_failed(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }
}

/// Renders directory trees with a fixed configuration.
///
/// Each call to [`TreeRenderer::render`] builds a fresh matcher (and reads
/// `.gitignore` again), so repeated renders of an unchanged directory give
/// identical output.
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    config: RenderConfig,
}

impl TreeRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, root: &Path) -> Rendered {
        let mut rendered = Rendered::default();
        let matcher = Matcher::from_config(root, &self.config, &mut rendered.diagnostics);
        let traversal = BaseTraversal::new(&self.config, &matcher);

        debug!(
            root = %root.display(),
            gitignore = matcher.has_gitignore(),
            "rendering tree"
        );

        let entries = match traversal.read_and_filter_entries(root, &mut rendered.diagnostics) {
            Ok(e) => e,
            Err(e) => {
                rendered.diagnostics.push(Diagnostic::RootUnreadable {
                    path: root.to_path_buf(),
                    reason: e.to_string(),
                });
                return rendered;
            }
        };

        rendered.text.push_str(&root_display_name(root));
        rendered.text.push('\n');

        let mut ancestors = vec![canonical_or_self(root)];
        self.render_entries(&traversal, entries, "", 1, &mut ancestors, &mut rendered);

        debug!(
            dirs = rendered.stats.dirs,
            files = rendered.stats.files,
            diagnostics = rendered.diagnostics.len(),
            "rendered tree"
        );
        rendered
    }

    fn render_entries(
        &self,
        traversal: &BaseTraversal<'_>,
        entries: Vec<DirEntryInfo>,
        prefix: &str,
        depth: usize,
        ancestors: &mut Vec<PathBuf>,
        out: &mut Rendered,
    ) {
        let count = entries.len();
        for (i, entry) in entries.into_iter().enumerate() {
            let is_last = i == count - 1;

            out.text.push_str(prefix);
            out.text.push_str(connector(is_last));
            out.text.push_str(&entry.display_name());
            out.text.push('\n');

            if !entry.is_dir {
                out.stats.files += 1;
                continue;
            }
            out.stats.dirs += 1;

            if !traversal.can_descend(depth) {
                continue;
            }

            // A symlink back into the current branch is drawn but not entered.
            let canonical = canonical_or_self(&entry.path);
            if ancestors.contains(&canonical) {
                out.diagnostics.push(Diagnostic::SymlinkCycle {
                    path: entry.path.clone(),
                    target: canonical,
                });
                continue;
            }

            // An unreadable directory keeps its own line but has no children.
            let children = match traversal.read_and_filter_entries(&entry.path, &mut out.diagnostics) {
                Ok(c) => c,
                Err(e) => {
                    out.diagnostics.push(Diagnostic::ReadDir {
                        path: entry.path.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            ancestors.push(canonical);
            let child_prefix = child_prefix(prefix, is_last);
            self.render_entries(traversal, children, &child_prefix, depth + 1, ancestors, out);
            ancestors.pop();
        }
    }
}

fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Render `root` with the default configuration.
pub fn render(root: &Path) -> Rendered {
    TreeRenderer::default().render(root)
}

/// The first line of the tree: the root's own name with a trailing `/`.
///
/// Paths without a final component (`.`, `..`, `/`) are canonicalized to
/// find one, falling back to the path as given.
pub fn root_display_name(root: &Path) -> String {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            root.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| root.display().to_string());
    format!("{}/", name.trim_end_matches('/'))
}

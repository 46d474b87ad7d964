//! treecopy - render a directory tree that respects ignore rules

pub mod clipboard;
pub mod diagnostics;
pub mod gitignore;
pub mod ignore_rules;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use clipboard::{ClipboardError, copy_to_clipboard, run_daemon_if_requested};
pub use diagnostics::Diagnostic;
pub use gitignore::GitignoreSpec;
pub use ignore_rules::{DEFAULT_IGNORE_PATTERNS, IgnoreRule, IgnoreRules};
pub use tree::{Matcher, RenderConfig, RenderStats, Rendered, TreeRenderer, render};

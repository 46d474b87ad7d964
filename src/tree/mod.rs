//! Directory tree rendering
//!
//! This module turns a directory into the familiar `tree`-style text:
//!
//! - `matcher`: decides which entries are hidden (name rules, then `.gitignore`)
//! - `traversal`: lists, filters and sorts one directory level
//! - `renderer`: depth-first rendering with `├──`/`└──` connectors

mod config;
mod matcher;
mod renderer;
mod traversal;

// Re-export public types
pub use config::RenderConfig;
pub use matcher::{Matcher, should_ignore};
pub use renderer::{RenderStats, Rendered, TreeRenderer, render, root_display_name};
pub use traversal::{DirEntryInfo, child_prefix, connector, display_name, sort_entries};

//! CLI entry point for treecopy

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use treecopy::{
    Diagnostic, RenderConfig, TreeRenderer, copy_to_clipboard, run_daemon_if_requested,
};

#[derive(Parser, Debug)]
#[command(name = "treecopy")]
#[command(about = "Print a directory tree that respects .gitignore and copy it to the clipboard")]
#[command(version)]
struct Args {
    /// Directory to display
    #[arg(default_value = ".", value_parser = parse_root_dir)]
    path: PathBuf,

    /// Copy the tree to the clipboard (default)
    #[arg(long = "clipboard", overrides_with = "no_clipboard")]
    clipboard: bool,

    /// Do not copy the tree to the clipboard
    #[arg(long = "no-clipboard", overrides_with = "clipboard")]
    no_clipboard: bool,

    /// Ignore entries whose name matches pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore", visible_short_alias = 'i', value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Do not read the root's .gitignore
    #[arg(long = "no-gitignore")]
    no_gitignore: bool,

    /// Start from an empty ignore list instead of the built-in defaults
    #[arg(long = "no-default-ignores")]
    no_default_ignores: bool,

    /// Suppress warnings and the clipboard notice
    #[arg(short, long)]
    quiet: bool,
}

/// The root must exist and be a directory before any rendering starts.
fn parse_root_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if !path.exists() {
        return Err(format!("'{}': No such file or directory", s));
    }
    if !path.is_dir() {
        return Err(format!("'{}': Not a directory", s));
    }
    Ok(path)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn report(diagnostic: &Diagnostic, quiet: bool) {
    if diagnostic.is_fatal() {
        eprintln!("treecopy: error: {}", diagnostic);
    } else if !quiet {
        eprintln!("treecopy: warning: {}", diagnostic);
    }
}

fn main() {
    // Background clipboard owner started by an earlier run.
    if run_daemon_if_requested() {
        return;
    }

    init_tracing();
    let args = Args::parse();

    let base = if args.no_default_ignores {
        RenderConfig::empty()
    } else {
        RenderConfig::default()
    };
    let config = RenderConfig {
        use_gitignore: !args.no_gitignore,
        max_depth: args.level,
        ..base
    }
    .with_extra_patterns(args.ignore.iter().cloned());

    let rendered = TreeRenderer::new(config).render(&args.path);
    for diagnostic in &rendered.diagnostics {
        report(diagnostic, args.quiet);
    }

    if rendered.root_failed() || rendered.is_empty() {
        process::exit(1);
    }

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout
        .write_all(rendered.text.as_bytes())
        .and_then(|()| stdout.flush())
    {
        eprintln!("treecopy: error writing output: {}", e);
        process::exit(1);
    }

    // Both flags override each other, so at most one is set.
    if args.clipboard || !args.no_clipboard {
        match copy_to_clipboard(&rendered.text) {
            Ok(()) => {
                if !args.quiet {
                    eprintln!("Tree structure copied to clipboard!");
                }
            }
            Err(e) => {
                if !args.quiet {
                    eprintln!("treecopy: warning: failed to copy to clipboard: {}", e);
                }
            }
        }
    }
}

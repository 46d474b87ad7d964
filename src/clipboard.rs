//! System clipboard access
//!
//! On X11 and Wayland a selection lives only as long as the process that owns
//! it. `copy_to_clipboard` therefore hands the text to a background copy of
//! this binary, started with `CLIPBOARD_DAEMON_ENV` set, which keeps serving
//! it until another application takes the clipboard over.

use arboard::Clipboard;
use thiserror::Error;
use tracing::debug;

/// Set in the environment of the background process that owns the selection.
pub const CLIPBOARD_DAEMON_ENV: &str = "TREECOPY_CLIPBOARD_DAEMON";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[source] arboard::Error),
    #[error("clipboard access denied: {0}")]
    Write(#[source] arboard::Error),
    #[error("could not start clipboard owner process: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Place `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    // Fails fast when there is no display to talk to.
    let clipboard = Clipboard::new().map_err(ClipboardError::Unavailable)?;
    imp::copy(clipboard, text)?;
    debug!(bytes = text.len(), "copied tree to clipboard");
    Ok(())
}

/// Serve the clipboard from stdin if this process was started as the
/// background owner. Returns `true` when it did, and the caller should exit.
pub fn run_daemon_if_requested() -> bool {
    if std::env::var_os(CLIPBOARD_DAEMON_ENV).is_none() {
        return false;
    }
    imp::serve_stdin();
    true
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
mod imp {
    use std::env;
    use std::io::{self, Read, Write};
    use std::process::{Command, Stdio};

    use arboard::{Clipboard, SetExtLinux};
    use tracing::debug;

    use super::{CLIPBOARD_DAEMON_ENV, ClipboardError};

    pub(super) fn copy(connection: Clipboard, text: &str) -> Result<(), ClipboardError> {
        // The owner process opens its own connection.
        drop(connection);

        let exe = env::current_exe().map_err(ClipboardError::Spawn)?;
        let mut child = Command::new(exe)
            .env(CLIPBOARD_DAEMON_ENV, "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ClipboardError::Spawn)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ClipboardError::Spawn(io::Error::other("child stdin not captured")))?;
        stdin
            .write_all(text.as_bytes())
            .map_err(ClipboardError::Spawn)?;
        // Closing stdin lets the owner start serving; it is not waited on.
        drop(stdin);
        debug!(pid = child.id(), "started clipboard owner");
        Ok(())
    }

    pub(super) fn serve_stdin() {
        let mut text = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut text) {
            debug!(error = %e, "clipboard owner could not read input");
            return;
        }
        let result = Clipboard::new().and_then(|mut clipboard| clipboard.set().wait().text(text));
        if let Err(e) = result {
            debug!(error = %e, "clipboard owner failed");
        }
    }
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
mod imp {
    use arboard::Clipboard;

    use super::ClipboardError;

    pub(super) fn copy(mut clipboard: Clipboard, text: &str) -> Result<(), ClipboardError> {
        clipboard
            .set_text(text.to_owned())
            .map_err(ClipboardError::Write)
    }

    pub(super) fn serve_stdin() {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_daemon_by_default() {
        if std::env::var_os(CLIPBOARD_DAEMON_ENV).is_none() {
            assert!(!run_daemon_if_requested());
        }
    }

    #[test]
    fn test_errors_describe_the_failure() {
        let err = ClipboardError::Spawn(std::io::Error::other("no exe"));
        assert!(err.to_string().contains("clipboard owner"), "{}", err);
    }
}

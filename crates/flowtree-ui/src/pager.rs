//! Pager support for long terminal output.
//!
//! Pipes content through `less -RFX` (or `$PAGER`) when it would not fit on
//! one screen.

use std::env;
use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::terminal::{is_tty, terminal_height};

/// Environment variable naming the preferred pager.
pub const PAGER_ENV: &str = "FLOWTREE_PAGER";

/// Environment variable disabling the pager when set.
pub const NO_PAGER_ENV: &str = "FLOWTREE_NO_PAGER";

/// Returns `true` if the content exceeds the terminal height and should be paged.
///
/// Returns `false` if:
/// - `FLOWTREE_NO_PAGER` environment variable is set
/// - stdout is not a TTY
/// - terminal height cannot be determined
/// - content fits within the terminal
pub fn should_page(content: &str) -> bool {
    if env::var_os(NO_PAGER_ENV).is_some() {
        return false;
    }

    if !is_tty() {
        return false;
    }

    exceeds_height(content, terminal_height())
}

/// Pipes content through a pager if appropriate, otherwise prints directly.
///
/// The pager command is `FLOWTREE_PAGER`, then `PAGER`, then `less`. When
/// `LESS` is unset it is given `-RFX` so colors pass through and short output
/// does not clear the screen.
pub fn page(content: &str) {
    if !should_page(content) {
        print!("{content}");
        return;
    }

    let pager_cmd = pager_command(env::var(PAGER_ENV).ok(), env::var("PAGER").ok());
    let mut parts = pager_cmd.split_whitespace();
    let Some(program) = parts.next() else {
        print!("{content}");
        return;
    };

    let mut cmd = Command::new(program);
    cmd.args(parts);
    cmd.stdin(Stdio::piped());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());

    if env::var_os("LESS").is_none() {
        cmd.env("LESS", "-RFX");
    }

    match cmd.spawn() {
        Ok(mut child) => {
            if let Some(ref mut stdin) = child.stdin {
                // Broken pipe when the user quits early is expected.
                let _ = stdin.write_all(content.as_bytes());
            }
            drop(child.stdin.take());
            let _ = child.wait();
        }
        Err(err) => {
            debug!(pager = %pager_cmd, error = %err, "pager failed to start");
            print!("{content}");
        }
    }
}

fn pager_command(preferred: Option<String>, fallback: Option<String>) -> String {
    preferred
        .filter(|p| !p.trim().is_empty())
        .or_else(|| fallback.filter(|p| !p.trim().is_empty()))
        .unwrap_or_else(|| "less".to_string())
}

fn exceeds_height(content: &str, height: usize) -> bool {
    if height == 0 {
        return false;
    }
    // Leave one line for the shell prompt.
    content.lines().count() > height.saturating_sub(1)
}

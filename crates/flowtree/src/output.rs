//! Output helpers for the `flowtree` CLI.

use std::io::{self, Write};

use flowtree_core::Diagnostic;
use serde::Serialize;

use crate::context::RuntimeContext;

/// Print a value as pretty JSON to stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print diagnostics to stderr as warnings, unless `--quiet`.
pub fn warn_diagnostics(ctx: &RuntimeContext, diagnostics: &[Diagnostic]) {
    if ctx.quiet {
        return;
    }
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    for diagnostic in diagnostics {
        let _ = writeln!(handle, "warning: {}", diagnostic);
    }
}

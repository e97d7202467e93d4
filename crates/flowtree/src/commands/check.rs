//! `flowtree check` -- report problems in a flow document.
//!
//! Always builds leniently so every problem is listed, not just the first.

use anyhow::{Result, bail};
use flowtree_core::{BuildMode, Diagnostic};
use serde::Serialize;

use crate::cli::CheckArgs;
use crate::commands::build_input;
use crate::context::RuntimeContext;
use crate::output::output_json;

#[derive(Serialize)]
struct CheckReport<'a> {
    file: String,
    errors: usize,
    notes: usize,
    diagnostics: &'a [Diagnostic],
}

/// Execute the `flowtree check` command.
pub fn run(ctx: &RuntimeContext, args: &CheckArgs) -> Result<()> {
    let mut options = ctx.build_options();
    options.mode = BuildMode::Lenient;
    let output = build_input(&args.input, options)?;

    let errors = output
        .diagnostics
        .iter()
        .filter(|d| d.is_authoring_error())
        .count();
    let notes = output.diagnostics.len() - errors;

    if ctx.json {
        output_json(&CheckReport {
            file: args.input.file.display().to_string(),
            errors,
            notes,
            diagnostics: &output.diagnostics,
        });
    } else {
        for diagnostic in &output.diagnostics {
            let severity = if diagnostic.is_authoring_error() { "error" } else { "note" };
            println!("{severity}: {diagnostic}");
        }
        if !ctx.quiet && errors == 0 {
            println!("{}: no problems found", args.input.file.display());
        }
    }

    if errors > 0 {
        bail!(
            "{} has {} problem{}",
            args.input.file.display(),
            errors,
            if errors == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
